//! Render commands produced by the presenter.

use scrollytale_core::beat::Beat;

/// What the text box should do in response to one progress report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Reveal a new beat with the typing/appear effect.
    ShowAnimated(Beat),
    /// Show a new beat immediately, with no effect.
    ShowInstant(Beat),
    /// Hide the text box.
    Clear,
    /// Nothing changed.
    NoOp,
}

impl RenderCommand {
    /// The beat this command shows, if any.
    #[must_use]
    pub fn beat(&self) -> Option<&Beat> {
        match self {
            Self::ShowAnimated(beat) | Self::ShowInstant(beat) => Some(beat),
            Self::Clear | Self::NoOp => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowAnimated(_) => "show_animated",
            Self::ShowInstant(_) => "show_instant",
            Self::Clear => "clear",
            Self::NoOp => "no_op",
        }
    }
}

/// How a new beat should be revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reveal {
    /// Animated when scrolling forward, instant when scrolling backward.
    #[default]
    FollowDirection,
    /// Always instant, e.g. while jumping to a restored position.
    Instant,
}
