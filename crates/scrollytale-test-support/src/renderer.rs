//! Test renderers — mock `Renderer` implementations for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use scrollytale_core::beat::{Beat, BeatId};
use scrollytale_core::error::StoryError;
use scrollytale_core::render::{AnimationHandle, Renderer};

/// One call observed by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    /// `show_animated` was called with this beat.
    Animated(BeatId),
    /// `show_instant` was called with this beat.
    Instant(BeatId),
    /// `clear` was called.
    Clear,
}

#[derive(Debug)]
struct RecordingHandle {
    finished: Arc<AtomicBool>,
    cancelled: Arc<Mutex<Vec<BeatId>>>,
    beat_id: BeatId,
}

impl AnimationHandle for RecordingHandle {
    fn cancel(&mut self) {
        if !self.finished.swap(true, Ordering::SeqCst) {
            self.cancelled.lock().unwrap().push(self.beat_id.clone());
        }
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

/// A renderer that records every call. Animated reveals stay "running"
/// until [`RecordingRenderer::finish_animations`] is called, so tests can
/// observe cancellation.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Mutex<Vec<RenderCall>>,
    visible: AtomicBool,
    running: Mutex<Vec<Arc<AtomicBool>>>,
    cancelled: Arc<Mutex<Vec<BeatId>>>,
}

impl RecordingRenderer {
    /// Creates an empty recording renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all calls so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `show_animated` calls so far.
    pub fn animated_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, RenderCall::Animated(_)))
            .count()
    }

    /// Number of `show_instant` calls so far.
    pub fn instant_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, RenderCall::Instant(_)))
            .count()
    }

    /// Beats whose running animation was cancelled, in cancellation order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn cancelled(&self) -> Vec<BeatId> {
        self.cancelled.lock().unwrap().clone()
    }

    /// Marks every outstanding animation as complete.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn finish_animations(&self) {
        for finished in self.running.lock().unwrap().drain(..) {
            finished.store(true, Ordering::SeqCst);
        }
    }
}

impl Renderer for RecordingRenderer {
    fn show_animated(&self, beat: &Beat) -> Result<Box<dyn AnimationHandle>, StoryError> {
        self.calls
            .lock()
            .unwrap()
            .push(RenderCall::Animated(beat.id.clone()));
        self.visible.store(true, Ordering::SeqCst);

        let finished = Arc::new(AtomicBool::new(false));
        self.running.lock().unwrap().push(Arc::clone(&finished));
        Ok(Box::new(RecordingHandle {
            finished,
            cancelled: Arc::clone(&self.cancelled),
            beat_id: beat.id.clone(),
        }))
    }

    fn show_instant(&self, beat: &Beat) -> Result<(), StoryError> {
        self.calls
            .lock()
            .unwrap()
            .push(RenderCall::Instant(beat.id.clone()));
        self.visible.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoryError> {
        self.calls.lock().unwrap().push(RenderCall::Clear);
        self.visible.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

/// A renderer that fails every call. Useful for testing that the presenter
/// still commits its transitions when the visual effect is lost.
#[derive(Debug, Default)]
pub struct FailingRenderer {
    attempts: Mutex<usize>,
}

impl FailingRenderer {
    /// Number of render calls attempted so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    fn fail(&self) -> StoryError {
        *self.attempts.lock().unwrap() += 1;
        StoryError::RenderFailure("text box detached".into())
    }
}

impl Renderer for FailingRenderer {
    fn show_animated(&self, _beat: &Beat) -> Result<Box<dyn AnimationHandle>, StoryError> {
        Err(self.fail())
    }

    fn show_instant(&self, _beat: &Beat) -> Result<(), StoryError> {
        Err(self.fail())
    }

    fn clear(&self) -> Result<(), StoryError> {
        Err(self.fail())
    }

    fn is_visible(&self) -> bool {
        false
    }
}
