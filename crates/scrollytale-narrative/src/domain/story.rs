//! The static story table: beats and the cue points that select them.

use std::collections::{BTreeMap, BTreeSet};

use scrollytale_core::beat::{Beat, BeatId, BeatKind};
use scrollytale_core::error::StoryError;
use scrollytale_core::progress::{SCENE_COUNT, SceneIndex};
use serde::{Deserialize, Serialize};

/// A cue point: once a scene's progress reaches `at`, `beat` is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Progress threshold in `[0, 1)`.
    pub at: f64,
    /// The beat selected from this threshold on.
    pub beat: BeatId,
}

impl Cue {
    /// Creates a cue.
    #[must_use]
    pub fn new(at: f64, beat: &str) -> Self {
        Self {
            at,
            beat: BeatId::new(beat),
        }
    }
}

/// One scene's cue points, strictly increasing by threshold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Ordered cue points.
    pub cues: Vec<Cue>,
}

impl Scene {
    /// Creates a scene from its cue points.
    #[must_use]
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues }
    }
}

/// Read-only story table shared by every component that needs beats.
///
/// Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryTable {
    beats: BTreeMap<BeatId, Beat>,
    scenes: Vec<Scene>,
}

impl StoryTable {
    /// Builds and validates a story table.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::StoryFormat` if there are not exactly five
    /// scenes, a scene has no cues, thresholds are outside `[0, 1)` or not
    /// strictly increasing, a cue names an undefined beat, beat ids repeat,
    /// a beat has empty text, or a dialogue beat has no speaker.
    pub fn new(beats: Vec<Beat>, scenes: Vec<Scene>) -> Result<Self, StoryError> {
        let mut by_id = BTreeMap::new();
        for beat in beats {
            validate_beat(&beat)?;
            let id = beat.id.clone();
            if by_id.insert(id.clone(), beat).is_some() {
                return Err(StoryError::StoryFormat(format!("duplicate beat id `{id}`")));
            }
        }

        if scenes.len() != usize::from(SCENE_COUNT) {
            return Err(StoryError::StoryFormat(format!(
                "expected {SCENE_COUNT} scenes, found {}",
                scenes.len()
            )));
        }

        for (scene, index) in scenes.iter().zip(SceneIndex::all()) {
            validate_scene(scene, index, &by_id)?;
        }

        Ok(Self {
            beats: by_id,
            scenes,
        })
    }

    /// Looks up a beat by id.
    #[must_use]
    pub fn beat(&self, id: &BeatId) -> Option<&Beat> {
        self.beats.get(id)
    }

    /// Returns the cue points of `scene`.
    #[must_use]
    pub fn scene(&self, scene: SceneIndex) -> &Scene {
        &self.scenes[scene.position()]
    }

    /// Iterates over all beats in id order.
    pub fn beats(&self) -> impl Iterator<Item = &Beat> {
        self.beats.values()
    }

    /// Beats that are defined but never cued by any scene.
    #[must_use]
    pub fn uncued_beats(&self) -> Vec<&BeatId> {
        let cued: BTreeSet<&BeatId> = self
            .scenes
            .iter()
            .flat_map(|scene| scene.cues.iter().map(|cue| &cue.beat))
            .collect();
        self.beats.keys().filter(|id| !cued.contains(id)).collect()
    }
}

fn validate_beat(beat: &Beat) -> Result<(), StoryError> {
    if beat.id.as_str().is_empty() {
        return Err(StoryError::StoryFormat("beat id must not be empty".into()));
    }
    if beat.display_text.trim().is_empty() {
        return Err(StoryError::StoryFormat(format!(
            "beat `{}` has no display text",
            beat.id
        )));
    }
    if beat.kind == BeatKind::Dialogue
        && beat.speaker.as_deref().is_none_or(|s| s.trim().is_empty())
    {
        return Err(StoryError::StoryFormat(format!(
            "dialogue beat `{}` has no speaker",
            beat.id
        )));
    }
    Ok(())
}

fn validate_scene(
    scene: &Scene,
    index: SceneIndex,
    beats: &BTreeMap<BeatId, Beat>,
) -> Result<(), StoryError> {
    if scene.cues.is_empty() {
        return Err(StoryError::StoryFormat(format!("{index} has no cues")));
    }

    let mut previous: Option<f64> = None;
    for cue in &scene.cues {
        if !(0.0..1.0).contains(&cue.at) {
            return Err(StoryError::StoryFormat(format!(
                "{index}: threshold {} for `{}` is outside [0, 1)",
                cue.at, cue.beat
            )));
        }
        if previous.is_some_and(|prev| cue.at <= prev) {
            return Err(StoryError::StoryFormat(format!(
                "{index}: thresholds must be strictly increasing (at `{}`)",
                cue.beat
            )));
        }
        if !beats.contains_key(&cue.beat) {
            return Err(StoryError::StoryFormat(format!(
                "{index}: cue refers to undefined beat `{}`",
                cue.beat
            )));
        }
        previous = Some(cue.at);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_cue_scenes(beat: &str) -> Vec<Scene> {
        (0..5).map(|_| Scene::new(vec![Cue::new(0.0, beat)])).collect()
    }

    #[test]
    fn test_new_accepts_minimal_table() {
        // Arrange
        let beats = vec![Beat::narrator("only", "Once upon a time")];

        // Act
        let table = StoryTable::new(beats, one_cue_scenes("only")).unwrap();

        // Assert
        assert_eq!(table.beats().count(), 1);
        assert_eq!(table.scene(SceneIndex::LAST).cues.len(), 1);
        assert!(table.uncued_beats().is_empty());
    }

    #[test]
    fn test_new_rejects_wrong_scene_count() {
        let beats = vec![Beat::narrator("only", "text")];
        let mut scenes = one_cue_scenes("only");
        scenes.pop();

        let result = StoryTable::new(beats, scenes);

        match result.unwrap_err() {
            StoryError::StoryFormat(message) => assert!(message.contains("expected 5 scenes")),
            other => panic!("expected StoryFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_non_increasing_thresholds() {
        let beats = vec![Beat::narrator("a", "A"), Beat::narrator("b", "B")];
        let mut scenes = one_cue_scenes("a");
        scenes[2] = Scene::new(vec![Cue::new(0.5, "a"), Cue::new(0.5, "b")]);

        let result = StoryTable::new(beats, scenes);

        assert!(matches!(result, Err(StoryError::StoryFormat(_))));
    }

    #[test]
    fn test_new_rejects_threshold_of_one() {
        let beats = vec![Beat::narrator("a", "A")];
        let mut scenes = one_cue_scenes("a");
        scenes[0] = Scene::new(vec![Cue::new(1.0, "a")]);

        assert!(StoryTable::new(beats, scenes).is_err());
    }

    #[test]
    fn test_new_rejects_undefined_beat() {
        let beats = vec![Beat::narrator("a", "A")];
        let mut scenes = one_cue_scenes("a");
        scenes[4] = Scene::new(vec![Cue::new(0.0, "ghost")]);

        match StoryTable::new(beats, scenes).unwrap_err() {
            StoryError::StoryFormat(message) => assert!(message.contains("ghost")),
            other => panic!("expected StoryFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_duplicate_beat_ids() {
        let beats = vec![Beat::narrator("a", "A"), Beat::narrator("a", "again")];

        assert!(StoryTable::new(beats, one_cue_scenes("a")).is_err());
    }

    #[test]
    fn test_new_rejects_dialogue_without_speaker() {
        let mut line = Beat::dialogue("line", "Mehdi", "Hello");
        line.speaker = None;

        assert!(StoryTable::new(vec![line], one_cue_scenes("line")).is_err());
    }

    #[test]
    fn test_new_rejects_empty_scene() {
        let beats = vec![Beat::narrator("a", "A")];
        let mut scenes = one_cue_scenes("a");
        scenes[1] = Scene::default();

        assert!(StoryTable::new(beats, scenes).is_err());
    }

    #[test]
    fn test_uncued_beats_lists_orphans() {
        let beats = vec![Beat::narrator("a", "A"), Beat::narrator("spare", "unused")];

        let table = StoryTable::new(beats, one_cue_scenes("a")).unwrap();

        assert_eq!(table.uncued_beats(), vec![&BeatId::new("spare")]);
    }
}
