//! The story text presenter: decides how the text box reacts to each
//! progress report, and persists that decision for restoration.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use scrollytale_core::beat::Beat;
use scrollytale_core::clock::{Clock, SystemClock};
use scrollytale_core::error::StoryError;
use scrollytale_core::progress::{ProgressReport, SceneIndex, ScrollDirection};
use scrollytale_core::render::{AnimationHandle, Renderer};
use scrollytale_core::store::{SCROLL_POSITION_KEY, SessionStore, TEXT_STATE_KEY};
use tracing::{debug, error, info, instrument, warn};

use crate::application::snapshot::{DEFAULT_STALENESS, TextStateSnapshot};
use crate::domain::commands::{RenderCommand, Reveal};
use crate::domain::mapper::NarrativeProgressMapper;
use crate::domain::state::PresentationState;
use crate::domain::story::StoryTable;

/// Assembles a [`StoryTextPresenter`] from its collaborators.
pub struct PresenterBuilder {
    story: Option<Arc<StoryTable>>,
    renderer: Option<Arc<dyn Renderer>>,
    store: Option<Arc<dyn SessionStore>>,
    clock: Arc<dyn Clock>,
    staleness: Duration,
}

impl Default for PresenterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenterBuilder {
    /// Starts a builder with the system clock and a five minute staleness
    /// window. Story and renderer are required.
    #[must_use]
    pub fn new() -> Self {
        Self {
            story: None,
            renderer: None,
            store: None,
            clock: Arc::new(SystemClock),
            staleness: DEFAULT_STALENESS,
        }
    }

    /// Sets the story table.
    #[must_use]
    pub fn story(mut self, story: Arc<StoryTable>) -> Self {
        self.story = Some(story);
        self
    }

    /// Sets the text box renderer.
    #[must_use]
    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Sets the session store. Without one, nothing is persisted.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replaces the clock used for snapshot timestamps.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the restore staleness window.
    #[must_use]
    pub fn staleness(mut self, window: Duration) -> Self {
        self.staleness = window;
        self
    }

    /// Builds the presenter in the `Idle` state.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Configuration` if the story table or renderer
    /// was not provided.
    pub fn build(self) -> Result<StoryTextPresenter, StoryError> {
        let Some(story) = self.story else {
            let err = StoryError::Configuration("story table is missing".into());
            error!(error = %err, "cannot start story text presenter");
            return Err(err);
        };
        let Some(renderer) = self.renderer else {
            let err = StoryError::Configuration("text box renderer is missing".into());
            error!(error = %err, "cannot start story text presenter");
            return Err(err);
        };

        Ok(StoryTextPresenter {
            mapper: NarrativeProgressMapper::new(story),
            renderer,
            store: self.store,
            clock: self.clock,
            staleness: self.staleness,
            state: PresentationState::default(),
            shown: None,
            pending: None,
        })
    }
}

/// State machine between scroll progress and the story text box.
///
/// Runs on the single event loop thread; every method takes `&mut self` and
/// completes synchronously. Animated reveals keep running in the renderer
/// after a method returns, tracked by the pending animation handle.
pub struct StoryTextPresenter {
    mapper: NarrativeProgressMapper,
    renderer: Arc<dyn Renderer>,
    store: Option<Arc<dyn SessionStore>>,
    clock: Arc<dyn Clock>,
    staleness: Duration,
    state: PresentationState,
    shown: Option<Beat>,
    pending: Option<Box<dyn AnimationHandle>>,
}

impl fmt::Debug for StoryTextPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoryTextPresenter")
            .field("state", &self.state)
            .field("staleness", &self.staleness)
            .field("has_store", &self.store.is_some())
            .field("animating", &self.is_animating())
            .finish_non_exhaustive()
    }
}

impl StoryTextPresenter {
    /// Shortcut for [`PresenterBuilder::new`].
    #[must_use]
    pub fn builder() -> PresenterBuilder {
        PresenterBuilder::new()
    }

    /// The current presentation state.
    #[must_use]
    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// The mapper used to resolve beats.
    #[must_use]
    pub fn mapper(&self) -> &NarrativeProgressMapper {
        &self.mapper
    }

    /// Whether an animated reveal handed to the renderer is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Evaluates one progress report from the scroll observer.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvalidScene` or `StoryError::InvalidProgress`
    /// for out-of-range input. The event is rejected and state is unchanged.
    #[instrument(skip(self))]
    pub fn on_progress(
        &mut self,
        scene: u8,
        progress: f64,
        direction: ScrollDirection,
    ) -> Result<RenderCommand, StoryError> {
        let report = ProgressReport {
            scene: SceneIndex::new(scene)?,
            progress,
            direction,
        };
        self.evaluate(report, Reveal::FollowDirection)
    }

    /// Evaluates a report already carrying a validated scene.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvalidProgress` for progress outside `[0, 1]`.
    pub fn on_report(&mut self, report: ProgressReport) -> Result<RenderCommand, StoryError> {
        self.evaluate(report, Reveal::FollowDirection)
    }

    /// Evaluates a report, forcing any new beat to appear instantly.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvalidProgress` for progress outside `[0, 1]`.
    pub fn on_report_instant(
        &mut self,
        report: ProgressReport,
    ) -> Result<RenderCommand, StoryError> {
        self.evaluate(report, Reveal::Instant)
    }

    fn evaluate(
        &mut self,
        report: ProgressReport,
        reveal: Reveal,
    ) -> Result<RenderCommand, StoryError> {
        let beat = self
            .mapper
            .beat_for(report.scene, report.progress)
            .inspect_err(|e| warn!(error = %e, "rejecting progress report"))?
            .cloned();
        self.state.scroll_direction = report.direction;

        if beat.as_ref().map(|b| &b.id) == self.state.last_shown_beat_id.as_ref() {
            return Ok(RenderCommand::NoOp);
        }

        let command = match beat {
            None => RenderCommand::Clear,
            Some(beat) => {
                let instant =
                    reveal == Reveal::Instant || report.direction == ScrollDirection::Backward;
                if instant {
                    RenderCommand::ShowInstant(beat)
                } else {
                    RenderCommand::ShowAnimated(beat)
                }
            }
        };

        debug!(
            scene = report.scene.get(),
            progress = report.progress,
            command = command.name(),
            beat_id = command.beat().map(|b| b.id.as_str()),
            "text state transition"
        );
        self.commit(&command);
        Ok(command)
    }

    /// Re-shows the text that was visible before a reload, without replaying
    /// any transition logic.
    ///
    /// Missing, malformed, or stale snapshots leave the presenter `Idle` and
    /// return `None`; malformed and stale ones are also removed.
    #[instrument(skip(self))]
    pub fn restore(&mut self) -> Option<RenderCommand> {
        let store = Arc::clone(self.store.as_ref()?);
        let value = match store.get(TEXT_STATE_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("no persisted text state");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "could not read persisted text state");
                return None;
            }
        };

        let snapshot = match TextStateSnapshot::from_value(value) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "discarding persisted text state");
                forget(store.as_ref(), TEXT_STATE_KEY);
                return None;
            }
        };

        if snapshot.is_stale(self.clock.now_millis(), self.staleness) {
            let err = StoryError::RestoreCorruption(format!(
                "snapshot from {} ms is older than {} s",
                snapshot.timestamp_millis,
                self.staleness.num_seconds()
            ));
            info!(error = %err, "discarding persisted text state");
            forget(store.as_ref(), TEXT_STATE_KEY);
            return None;
        }

        let saved = snapshot.visible_beat()?;
        let beat = self
            .mapper
            .story()
            .beat(&saved.id)
            .cloned()
            .unwrap_or_else(|| saved.clone());

        let command = RenderCommand::ShowInstant(beat);
        self.commit(&command);
        info!(beat_id = %command.beat().map_or("", |b| b.id.as_str()), "restored text state");
        Some(command)
    }

    /// Hides the text box while keeping the current beat, so scrolling
    /// within the same window does not bring it back.
    pub fn dismiss(&mut self) -> RenderCommand {
        if !self.state.is_text_visible {
            return RenderCommand::NoOp;
        }
        self.cancel_pending();
        if let Err(e) = self.renderer.clear() {
            warn!(error = %e, "renderer failed to hide text box");
        }
        self.state.is_text_visible = false;
        self.persist();
        debug!("text box dismissed");
        RenderCommand::Clear
    }

    /// Returns to `Idle` as if the story had just started.
    pub fn reset(&mut self) {
        self.cancel_pending();
        if let Err(e) = self.renderer.clear() {
            warn!(error = %e, "renderer failed to clear text box");
        }
        self.state = PresentationState::default();
        self.shown = None;
        if let Some(store) = &self.store {
            forget(store.as_ref(), TEXT_STATE_KEY);
        }
        info!("story text presenter reset");
    }

    /// Tears the presenter down: cancels any running reveal, clears the
    /// text box, and removes everything persisted for this session.
    pub fn destroy(mut self) {
        self.cancel_pending();
        if let Err(e) = self.renderer.clear() {
            warn!(error = %e, "renderer failed to clear text box");
        }
        if let Some(store) = &self.store {
            forget(store.as_ref(), TEXT_STATE_KEY);
            forget(store.as_ref(), SCROLL_POSITION_KEY);
        }
        info!("story text presenter destroyed");
    }

    /// Applies a state-changing command: cancel the superseded reveal,
    /// update state, call the renderer, persist.
    fn commit(&mut self, command: &RenderCommand) {
        self.cancel_pending();

        let rendered = match command {
            RenderCommand::ShowAnimated(beat) => {
                self.state.show(beat.id.clone());
                self.shown = Some(beat.clone());
                self.renderer.show_animated(beat).map(|handle| {
                    self.pending = Some(handle);
                })
            }
            RenderCommand::ShowInstant(beat) => {
                self.state.show(beat.id.clone());
                self.shown = Some(beat.clone());
                self.renderer.show_instant(beat)
            }
            RenderCommand::Clear => {
                self.state.clear();
                self.shown = None;
                self.renderer.clear()
            }
            RenderCommand::NoOp => return,
        };

        // Text state stays authoritative even when the visual effect fails.
        if let Err(e) = rendered {
            warn!(error = %e, command = command.name(), "renderer failed");
        }

        self.persist();
    }

    fn cancel_pending(&mut self) {
        if let Some(mut handle) = self.pending.take() {
            if !handle.is_finished() {
                handle.cancel();
                debug!("cancelled running reveal");
            }
        }
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        let snapshot = TextStateSnapshot {
            beat_id: self.state.last_shown_beat_id.clone(),
            beat_snapshot: self.shown.clone(),
            is_text_visible: self.state.is_text_visible,
            timestamp_millis: self.clock.now_millis(),
        };
        let written = snapshot
            .to_value()
            .and_then(|value| store.set(TEXT_STATE_KEY, value));
        if let Err(e) = written {
            warn!(error = %e, "could not persist text state");
        }
    }
}

fn forget(store: &dyn SessionStore, key: &str) {
    if let Err(e) = store.remove(key) {
        warn!(error = %e, key, "could not remove persisted state");
    }
}
