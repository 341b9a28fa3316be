//! Scroll direction tracking.

use scrollytale_core::progress::ScrollDirection;

/// Derives the scroll direction from successive offsets.
///
/// An unchanged offset keeps the previous direction.
#[derive(Debug, Clone, Default)]
pub struct DirectionTracker {
    last_offset: Option<f64>,
    direction: ScrollDirection,
}

impl DirectionTracker {
    /// Creates a tracker that starts out scrolling forward.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `offset` and returns the resulting direction.
    pub fn observe(&mut self, offset: f64) -> ScrollDirection {
        if let Some(last) = self.last_offset {
            if offset > last {
                self.direction = ScrollDirection::Forward;
            } else if offset < last {
                self.direction = ScrollDirection::Backward;
            }
        }
        self.last_offset = Some(offset);
        self.direction
    }

    /// The direction of the latest movement.
    #[must_use]
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }
}
