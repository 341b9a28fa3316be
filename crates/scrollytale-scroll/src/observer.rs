//! The scroll observer: raw offsets in, progress reports out.

use std::sync::Arc;

use scrollytale_core::progress::ProgressReport;
use scrollytale_core::store::SessionStore;
use tracing::trace;

use crate::direction::DirectionTracker;
use crate::offset::ScrollOffsetTracker;
use crate::windows::SceneWindows;

/// Converts each frame's scroll offset into a [`ProgressReport`].
#[derive(Debug, Default)]
pub struct ScrollObserver {
    windows: SceneWindows,
    direction: DirectionTracker,
    offsets: Option<ScrollOffsetTracker>,
}

impl ScrollObserver {
    /// Creates an observer that does not persist offsets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an observer that persists offsets to `store`.
    #[must_use]
    pub fn with_store(store: Arc<dyn SessionStore>) -> Self {
        Self {
            offsets: Some(ScrollOffsetTracker::new(store)),
            ..Self::default()
        }
    }

    /// Evaluates one frame. `max_offset` is the largest reachable scroll
    /// offset (page height minus viewport height).
    pub fn observe(&mut self, offset: f64, max_offset: f64) -> ProgressReport {
        let direction = self.direction.observe(offset);
        if let Some(offsets) = &mut self.offsets {
            offsets.observe(offset);
        }

        let fraction = if max_offset > 0.0 {
            offset / max_offset
        } else {
            0.0
        };
        let (scene, progress) = self.windows.locate(fraction);
        trace!(offset, fraction, scene = scene.get(), progress, ?direction, "scroll frame");

        ProgressReport {
            scene,
            progress,
            direction,
        }
    }

    /// Reads back the last persisted offset and primes direction tracking
    /// with it, so the first frame after a reload is not misread.
    pub fn restore_offset(&mut self) -> Option<f64> {
        let offset = self.offsets.as_mut()?.restore()?;
        self.direction.observe(offset);
        Some(offset)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use scrollytale_core::progress::ScrollDirection;
    use scrollytale_core::store::SCROLL_POSITION_KEY;
    use scrollytale_test_support::MemoryStore;

    use super::ScrollObserver;

    #[test]
    fn test_observe_maps_offset_into_scene_and_direction() {
        let mut observer = ScrollObserver::new();

        let down = observer.observe(1350.0, 5000.0);
        let up = observer.observe(1100.0, 5000.0);

        assert_eq!(down.scene.get(), 2);
        assert!((down.progress - 0.35).abs() < 1e-9);
        assert_eq!(down.direction, ScrollDirection::Forward);
        assert_eq!(up.scene.get(), 2);
        assert!((up.progress - 0.1).abs() < 1e-9);
        assert_eq!(up.direction, ScrollDirection::Backward);
    }

    #[test]
    fn test_observe_with_zero_height_page_is_scene_one() {
        let mut observer = ScrollObserver::new();

        let report = observer.observe(300.0, 0.0);

        assert_eq!(report.scene.get(), 1);
        assert_eq!(report.progress, 0.0);
    }

    #[test]
    fn test_observe_persists_offsets() {
        let store = Arc::new(MemoryStore::new());
        let mut observer = ScrollObserver::with_store(store.clone());

        observer.observe(4750.0, 5000.0);

        assert_eq!(store.peek(SCROLL_POSITION_KEY), Some(serde_json::json!(4750.0)));
    }

    #[test]
    fn test_restore_offset_primes_direction() {
        let store = Arc::new(MemoryStore::with_entry(
            SCROLL_POSITION_KEY,
            serde_json::json!(3000.0),
        ));
        let mut observer = ScrollObserver::with_store(store);

        assert_eq!(observer.restore_offset(), Some(3000.0));
        let report = observer.observe(2900.0, 5000.0);

        assert_eq!(report.direction, ScrollDirection::Backward);
    }
}
