//! Scrollytale player — error types.

use scrollytale_core::error::StoryError;
use thiserror::Error;

/// Startup and runtime errors for the player.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// An input line was not a usable scroll offset.
    #[error("invalid scroll input: {0}")]
    Input(String),

    /// Reading input or writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The story or presenter could not be set up.
    #[error(transparent)]
    Story(#[from] StoryError),
}
