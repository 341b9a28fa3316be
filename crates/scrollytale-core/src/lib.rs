//! Scrollytale Core — shared abstractions.
//!
//! This crate defines the traits and small value types that the narrative,
//! scroll, and player crates agree on. It contains no rendering or storage
//! code of its own.

pub mod beat;
pub mod clock;
pub mod error;
pub mod progress;
pub mod render;
pub mod store;
