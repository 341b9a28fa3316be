//! Renderer abstraction for the story text box.

use crate::beat::Beat;
use crate::error::StoryError;

/// A running reveal effect started by [`Renderer::show_animated`].
///
/// Every handle handed out by a renderer must eventually be either finished
/// or cancelled by its owner.
pub trait AnimationHandle: Send {
    /// Stops the effect. Calling this on a finished handle is a no-op.
    fn cancel(&mut self);

    /// Returns `true` once the effect has completed or been cancelled.
    fn is_finished(&self) -> bool;
}

/// The text box that displays beats.
///
/// The presenter calls exactly one of `show_animated`, `show_instant`, or
/// `clear` per transition.
pub trait Renderer: Send + Sync {
    /// Reveals the beat with a typing/appear effect. Returns immediately;
    /// the effect runs until the returned handle finishes.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::RenderFailure` if the effect cannot be started.
    fn show_animated(&self, beat: &Beat) -> Result<Box<dyn AnimationHandle>, StoryError>;

    /// Shows the beat's full text at once.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::RenderFailure` if the text cannot be shown.
    fn show_instant(&self, beat: &Beat) -> Result<(), StoryError>;

    /// Hides the text box and empties it.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::RenderFailure` if the text box cannot be cleared.
    fn clear(&self) -> Result<(), StoryError>;

    /// Returns whether the text box is currently showing text.
    fn is_visible(&self) -> bool;
}
