//! Session-scoped key/value storage abstraction.

use serde_json::Value;

use crate::error::StoryError;

/// Storage key for the presenter's restoration snapshot.
pub const TEXT_STATE_KEY: &str = "storyTextState";

/// Storage key for the last raw scroll offset.
pub const SCROLL_POSITION_KEY: &str = "storyScrollPosition";

/// Key/value store whose lifetime is tied to the reading session.
///
/// Values are overwritten wholesale; there are no partial updates.
pub trait SessionStore: Send + Sync {
    /// Reads the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Storage` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, StoryError>;

    /// Replaces the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Storage` if the backing store cannot be written.
    fn set(&self, key: &str, value: Value) -> Result<(), StoryError>;

    /// Deletes `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Storage` if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoryError>;
}
