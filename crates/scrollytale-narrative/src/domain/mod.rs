//! Domain model for the narrative context.

pub mod commands;
pub mod mapper;
pub mod mehdi_and_shelly;
pub mod state;
pub mod story;
