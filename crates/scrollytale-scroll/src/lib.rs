//! Scrollytale — scroll observation.
//!
//! Turns raw scroll offsets into the `(scene, progress, direction)` reports
//! the narrative presenter consumes, at most one per rendered frame.

pub mod coalesce;
pub mod direction;
pub mod observer;
pub mod offset;
pub mod windows;
