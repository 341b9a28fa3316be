//! Restoration snapshot persisted in the session store.

use chrono::Duration;
use scrollytale_core::beat::{Beat, BeatId};
use scrollytale_core::error::StoryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshots older than this are discarded on restore.
pub const DEFAULT_STALENESS: Duration = Duration::minutes(5);

/// The text state as written to the session store after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStateSnapshot {
    /// The current beat, if any.
    pub beat_id: Option<BeatId>,
    /// A copy of the beat as it was shown.
    pub beat_snapshot: Option<Beat>,
    /// Whether the text box was showing.
    pub is_text_visible: bool,
    /// When the snapshot was taken, Unix milliseconds.
    pub timestamp_millis: i64,
}

impl TextStateSnapshot {
    /// Encodes the snapshot for the store.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Storage` if encoding fails.
    pub fn to_value(&self) -> Result<Value, StoryError> {
        serde_json::to_value(self)
            .map_err(|e| StoryError::Storage(format!("snapshot encoding failed: {e}")))
    }

    /// Decodes a stored value.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::RestoreCorruption` if the value is not a
    /// well-formed snapshot, if its beat id and beat copy disagree, or if it
    /// marks a beat visible without carrying the beat copy.
    pub fn from_value(value: Value) -> Result<Self, StoryError> {
        let snapshot: Self = serde_json::from_value(value)
            .map_err(|e| StoryError::RestoreCorruption(format!("malformed snapshot: {e}")))?;
        if let (Some(id), Some(beat)) = (&snapshot.beat_id, &snapshot.beat_snapshot) {
            if *id != beat.id {
                return Err(StoryError::RestoreCorruption(format!(
                    "snapshot beat id `{id}` does not match its beat copy `{}`",
                    beat.id
                )));
            }
        }
        if snapshot.is_text_visible && snapshot.beat_snapshot.is_none() {
            if let Some(id) = &snapshot.beat_id {
                return Err(StoryError::RestoreCorruption(format!(
                    "snapshot shows beat `{id}` without a beat copy"
                )));
            }
        }
        Ok(snapshot)
    }

    /// Returns `true` if the snapshot is older than `window` at `now_millis`.
    #[must_use]
    pub fn is_stale(&self, now_millis: i64, window: Duration) -> bool {
        now_millis.saturating_sub(self.timestamp_millis) > window.num_milliseconds()
    }

    /// The beat to re-show, if the snapshot says one was visible.
    #[must_use]
    pub fn visible_beat(&self) -> Option<&Beat> {
        if self.is_text_visible && self.beat_id.is_some() {
            self.beat_snapshot.as_ref()
        } else {
            None
        }
    }
}
