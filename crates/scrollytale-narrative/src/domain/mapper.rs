//! Scroll progress to narrative beat mapping.

use std::sync::Arc;

use scrollytale_core::beat::Beat;
use scrollytale_core::error::StoryError;
use scrollytale_core::progress::{SceneIndex, validate_progress};

use super::story::StoryTable;

/// Translates `(scene, progress)` into the beat that should be current.
///
/// Pure and deterministic: the mapper owns no mutable state and the story
/// table it reads is never mutated.
#[derive(Debug, Clone)]
pub struct NarrativeProgressMapper {
    story: Arc<StoryTable>,
}

impl NarrativeProgressMapper {
    /// Creates a mapper over a shared story table.
    #[must_use]
    pub fn new(story: Arc<StoryTable>) -> Self {
        Self { story }
    }

    /// Returns the story table this mapper reads.
    #[must_use]
    pub fn story(&self) -> &Arc<StoryTable> {
        &self.story
    }

    /// Returns the beat of the greatest threshold `<= progress` in `scene`,
    /// or `None` if progress is below every threshold.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvalidProgress` if `progress` is outside
    /// `[0, 1]`. Callers clamp before calling; the mapper does not.
    pub fn beat_for(&self, scene: SceneIndex, progress: f64) -> Result<Option<&Beat>, StoryError> {
        let progress = validate_progress(progress)?;
        let beat = self
            .story
            .scene(scene)
            .cues
            .iter()
            .rev()
            .find(|cue| cue.at <= progress)
            .and_then(|cue| self.story.beat(&cue.beat));
        Ok(beat)
    }

    /// Same as [`Self::beat_for`] with an unchecked scene number.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvalidScene` if `scene` is outside `1..=5`, or
    /// `StoryError::InvalidProgress` as for [`Self::beat_for`].
    pub fn beat_for_index(&self, scene: u8, progress: f64) -> Result<Option<&Beat>, StoryError> {
        self.beat_for(SceneIndex::new(scene)?, progress)
    }
}
