//! Story file loading.

use std::path::Path;

use scrollytale_core::beat::Beat;
use scrollytale_core::error::StoryError;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::story::{Scene, StoryTable};

/// On-disk story layout: a beat list and five scenes of cues.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoryFile {
    beats: Vec<Beat>,
    scenes: Vec<Scene>,
}

/// Parses and validates a YAML story.
///
/// # Errors
///
/// Returns `StoryError::StoryFormat` if the YAML is malformed or the story
/// fails validation.
pub fn load_story_yaml(source: &str) -> Result<StoryTable, StoryError> {
    let file: StoryFile = serde_yaml::from_str(source)
        .map_err(|e| StoryError::StoryFormat(format!("story yaml is malformed: {e}")))?;
    let story = StoryTable::new(file.beats, file.scenes)?;

    let uncued = story.uncued_beats();
    if !uncued.is_empty() {
        warn!(?uncued, "story defines beats that no scene cues");
    }
    debug!(beats = story.beats().count(), "story loaded");
    Ok(story)
}

/// Reads and validates a YAML story file.
///
/// # Errors
///
/// Returns `StoryError::Configuration` if the file cannot be read, or
/// `StoryError::StoryFormat` as for [`load_story_yaml`].
pub fn load_story_file(path: &Path) -> Result<StoryTable, StoryError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        StoryError::Configuration(format!("cannot read story {}: {e}", path.display()))
    })?;
    load_story_yaml(&source)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use scrollytale_core::error::StoryError;

    use super::{load_story_file, load_story_yaml};
    use crate::domain::mehdi_and_shelly::mehdi_and_shelly;

    const BUILTIN_YAML: &str = include_str!("../../stories/mehdi-and-shelly.yaml");

    #[test]
    fn test_shipped_yaml_matches_builtin_story() {
        let loaded = load_story_yaml(BUILTIN_YAML).unwrap();

        assert_eq!(loaded, mehdi_and_shelly().unwrap());
    }

    #[test]
    fn test_malformed_yaml_is_story_format_error() {
        let result = load_story_yaml("beats: [this is: not: valid");

        assert!(matches!(result, Err(StoryError::StoryFormat(_))));
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        let source = format!("{BUILTIN_YAML}\nchapters: []\n");

        assert!(matches!(
            load_story_yaml(&source),
            Err(StoryError::StoryFormat(_))
        ));
    }

    #[test]
    fn test_validation_errors_surface_from_yaml() {
        let source = r"
beats:
  - { id: a, displayText: A, kind: narrator }
scenes:
  - cues: [{ at: 0.0, beat: a }]
  - cues: [{ at: 0.0, beat: a }]
  - cues: [{ at: 0.0, beat: a }]
  - cues: [{ at: 0.0, beat: a }]
  - cues: [{ at: 0.0, beat: missing }]
";

        match load_story_yaml(source).unwrap_err() {
            StoryError::StoryFormat(message) => assert!(message.contains("missing")),
            other => panic!("expected StoryFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let result = load_story_file(Path::new("/nonexistent/story.yaml"));

        assert!(matches!(result, Err(StoryError::Configuration(_))));
    }
}
