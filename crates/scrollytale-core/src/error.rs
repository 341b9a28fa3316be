//! Story error types.

use thiserror::Error;

/// Top-level error type shared by every Scrollytale crate.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A required collaborator or the story table is missing. Fatal.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A scene index outside `1..=5`.
    #[error("invalid scene index {0}: expected 1..=5")]
    InvalidScene(u8),

    /// A progress value outside `[0, 1]` (or not a number).
    #[error("invalid progress {0}: expected a value in [0, 1]")]
    InvalidProgress(f64),

    /// A persisted snapshot that is stale or cannot be decoded.
    #[error("restore corruption: {0}")]
    RestoreCorruption(String),

    /// The renderer failed to show or clear text.
    #[error("render failure: {0}")]
    RenderFailure(String),

    /// The session store failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A story definition failed to parse or validate.
    #[error("story format error: {0}")]
    StoryFormat(String),
}

impl StoryError {
    /// Returns `true` for errors the caller should surface and stop on.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::StoryFormat(_))
    }
}
