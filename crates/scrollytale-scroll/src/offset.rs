//! Raw scroll offset persistence.

use std::sync::Arc;

use scrollytale_core::store::{SCROLL_POSITION_KEY, SessionStore};
use tracing::{debug, warn};

/// Offsets closer than this to the last persisted one are not written.
pub const DEFAULT_THRESHOLD_PX: f64 = 10.0;

/// Persists the raw scroll offset whenever it moves by more than a
/// threshold, so a reload can jump back to where the reader was.
pub struct ScrollOffsetTracker {
    store: Arc<dyn SessionStore>,
    threshold: f64,
    last_known: f64,
}

impl std::fmt::Debug for ScrollOffsetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollOffsetTracker")
            .field("threshold", &self.threshold)
            .field("last_known", &self.last_known)
            .finish_non_exhaustive()
    }
}

impl ScrollOffsetTracker {
    /// Creates a tracker with the default 10 px threshold.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_threshold(store, DEFAULT_THRESHOLD_PX)
    }

    /// Creates a tracker with a custom threshold.
    #[must_use]
    pub fn with_threshold(store: Arc<dyn SessionStore>, threshold: f64) -> Self {
        Self {
            store,
            threshold,
            last_known: 0.0,
        }
    }

    /// Records `offset`, persisting it if it moved far enough. Returns
    /// whether it was persisted.
    pub fn observe(&mut self, offset: f64) -> bool {
        if (offset - self.last_known).abs() <= self.threshold {
            return false;
        }
        self.last_known = offset;
        match self.store.set(SCROLL_POSITION_KEY, serde_json::json!(offset)) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "could not persist scroll offset");
                false
            }
        }
    }

    /// Reads the last persisted offset. Missing or malformed values yield
    /// `None`.
    pub fn restore(&mut self) -> Option<f64> {
        let value = match self.store.get(SCROLL_POSITION_KEY) {
            Ok(value) => value?,
            Err(e) => {
                warn!(error = %e, "could not read scroll offset");
                return None;
            }
        };
        let Some(offset) = value.as_f64().filter(|o| o.is_finite() && *o >= 0.0) else {
            debug!(%value, "ignoring malformed scroll offset");
            return None;
        };
        self.last_known = offset;
        Some(offset)
    }

    /// The last offset that was persisted or restored.
    #[must_use]
    pub fn last_known(&self) -> f64 {
        self.last_known
    }
}
