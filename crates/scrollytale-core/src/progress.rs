//! Scroll progress vocabulary: scenes, directions, and per-frame reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoryError;

/// Number of scenes in a story.
pub const SCENE_COUNT: u8 = 5;

/// One of the five ordinal scenes, `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SceneIndex(u8);

impl SceneIndex {
    /// The first scene.
    pub const FIRST: Self = Self(1);
    /// The last scene.
    pub const LAST: Self = Self(SCENE_COUNT);

    /// Creates a scene index.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvalidScene` if `index` is outside `1..=5`.
    pub fn new(index: u8) -> Result<Self, StoryError> {
        if (1..=SCENE_COUNT).contains(&index) {
            Ok(Self(index))
        } else {
            Err(StoryError::InvalidScene(index))
        }
    }

    /// Returns the 1-based index.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Returns the 0-based position, for indexing scene tables.
    #[must_use]
    pub fn position(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Iterates over all scenes in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=SCENE_COUNT).map(Self)
    }
}

impl TryFrom<u8> for SceneIndex {
    type Error = StoryError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<SceneIndex> for u8 {
    fn from(scene: SceneIndex) -> Self {
        scene.0
    }
}

impl fmt::Display for SceneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene {}", self.0)
    }
}

/// Which way the reader is scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Down the page; the story unfolds.
    #[default]
    Forward,
    /// Up the page; the story rewinds.
    Backward,
}

/// A single evaluation request from the scroll observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    /// The scene whose window contains the scroll cursor.
    pub scene: SceneIndex,
    /// Normalized position within that scene, `[0, 1]`.
    pub progress: f64,
    /// The direction of the latest scroll movement.
    pub direction: ScrollDirection,
}

/// Rejects progress values outside `[0, 1]`, including NaN.
///
/// # Errors
///
/// Returns `StoryError::InvalidProgress` for any out-of-range value.
pub fn validate_progress(progress: f64) -> Result<f64, StoryError> {
    if (0.0..=1.0).contains(&progress) {
        Ok(progress)
    } else {
        Err(StoryError::InvalidProgress(progress))
    }
}
