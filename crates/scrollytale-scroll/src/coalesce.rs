//! Per-frame, last-write-wins coalescing of scroll events.

/// Holds at most one pending event. Pushing replaces whatever was pending,
/// so only the latest event between two frames is evaluated.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    dropped: u64,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            dropped: 0,
        }
    }
}

impl<T> FrameCoalescer<T> {
    /// Creates an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `event`, dropping any event still pending.
    pub fn push(&mut self, event: T) {
        if self.pending.replace(event).is_some() {
            self.dropped += 1;
        }
    }

    /// Takes the pending event for this frame, if any.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Whether an event is waiting for the next frame.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total events replaced before they were evaluated.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
