//! Presentation state owned by the story text presenter.

use scrollytale_core::beat::BeatId;
use scrollytale_core::progress::ScrollDirection;

/// The presenter's two states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No beat shown yet, or the last one was cleared.
    Idle,
    /// A beat is current.
    Showing(BeatId),
}

/// Mutable, single-instance record of what the text box shows.
///
/// `last_shown_beat_id` and `is_text_visible` are tracked independently: a
/// dismissed text box keeps its beat current so re-entering the same window
/// stays a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresentationState {
    /// The current beat, if any.
    pub last_shown_beat_id: Option<BeatId>,
    /// Whether the text box is meant to be showing.
    pub is_text_visible: bool,
    /// The direction of the last evaluated progress report.
    pub scroll_direction: ScrollDirection,
}

impl PresentationState {
    /// Returns the state machine phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match &self.last_shown_beat_id {
            Some(id) => Phase::Showing(id.clone()),
            None => Phase::Idle,
        }
    }

    pub(crate) fn show(&mut self, id: BeatId) {
        self.last_shown_beat_id = Some(id);
        self.is_text_visible = true;
    }

    pub(crate) fn clear(&mut self) {
        self.last_shown_beat_id = None;
        self.is_text_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle_and_hidden() {
        let state = PresentationState::default();

        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.is_text_visible);
        assert_eq!(state.scroll_direction, ScrollDirection::Forward);
    }

    #[test]
    fn test_show_then_clear_round_trips_to_idle() {
        let mut state = PresentationState::default();

        state.show(BeatId::new("mehdiEnters"));
        assert_eq!(state.phase(), Phase::Showing(BeatId::new("mehdiEnters")));
        assert!(state.is_text_visible);

        state.clear();
        assert_eq!(state, PresentationState::default());
    }
}
