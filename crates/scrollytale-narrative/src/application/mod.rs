//! Application services for the narrative context.

pub mod loader;
pub mod presenter;
pub mod snapshot;
