//! Player configuration, read once from the environment at startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::PlayerError;

/// Runtime settings for the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// YAML story to play; the built-in story when `None`.
    pub story_path: Option<PathBuf>,
    /// Where session state lives between runs.
    pub session_file: PathBuf,
    /// Largest reachable scroll offset, in px.
    pub page_height: f64,
    /// Time between evaluated frames.
    pub frame_interval: Duration,
    /// Typewriter speed, characters per second.
    pub text_speed: u32,
}

impl PlayerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, PlayerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PlayerError> {
        let story_path = lookup("SCROLLYTALE_STORY")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let session_file = lookup("SCROLLYTALE_SESSION_FILE")
            .map_or_else(|| PathBuf::from(".scrollytale-session.json"), PathBuf::from);

        let page_height: f64 = lookup("SCROLLYTALE_PAGE_HEIGHT")
            .unwrap_or_else(|| "5000".to_string())
            .parse()
            .map_err(|e| {
                PlayerError::Config(format!("SCROLLYTALE_PAGE_HEIGHT must be a number: {e}"))
            })?;
        if !page_height.is_finite() || page_height <= 0.0 {
            return Err(PlayerError::Config(
                "SCROLLYTALE_PAGE_HEIGHT must be positive".to_string(),
            ));
        }

        let frame_ms: u64 = lookup("SCROLLYTALE_FRAME_MS")
            .unwrap_or_else(|| "16".to_string())
            .parse()
            .map_err(|e| PlayerError::Config(format!("SCROLLYTALE_FRAME_MS must be a u64: {e}")))?;
        if frame_ms == 0 {
            return Err(PlayerError::Config(
                "SCROLLYTALE_FRAME_MS must be at least 1".to_string(),
            ));
        }

        let text_speed: u32 = lookup("SCROLLYTALE_TEXT_SPEED")
            .unwrap_or_else(|| "50".to_string())
            .parse()
            .map_err(|e| {
                PlayerError::Config(format!("SCROLLYTALE_TEXT_SPEED must be a u32: {e}"))
            })?;
        if text_speed == 0 {
            return Err(PlayerError::Config(
                "SCROLLYTALE_TEXT_SPEED must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            story_path,
            session_file,
            page_height,
            frame_interval: Duration::from_millis(frame_ms),
            text_speed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    use super::PlayerConfig;
    use crate::error::PlayerError;

    fn config_from(vars: &[(&str, &str)]) -> Result<PlayerConfig, PlayerError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        PlayerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.story_path, None);
        assert_eq!(config.session_file, PathBuf::from(".scrollytale-session.json"));
        assert_eq!(config.page_height, 5000.0);
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.text_speed, 50);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("SCROLLYTALE_STORY", "stories/custom.yaml"),
            ("SCROLLYTALE_SESSION_FILE", "/tmp/session.json"),
            ("SCROLLYTALE_PAGE_HEIGHT", "12000.5"),
            ("SCROLLYTALE_FRAME_MS", "33"),
            ("SCROLLYTALE_TEXT_SPEED", "120"),
        ])
        .unwrap();

        assert_eq!(config.story_path, Some(PathBuf::from("stories/custom.yaml")));
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
        assert_eq!(config.page_height, 12000.5);
        assert_eq!(config.frame_interval, Duration::from_millis(33));
        assert_eq!(config.text_speed, 120);
    }

    #[test]
    fn test_blank_story_path_means_builtin() {
        let config = config_from(&[("SCROLLYTALE_STORY", "  ")]).unwrap();

        assert_eq!(config.story_path, None);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for (key, value) in [
            ("SCROLLYTALE_PAGE_HEIGHT", "tall"),
            ("SCROLLYTALE_PAGE_HEIGHT", "0"),
            ("SCROLLYTALE_FRAME_MS", "-1"),
            ("SCROLLYTALE_FRAME_MS", "0"),
            ("SCROLLYTALE_TEXT_SPEED", "0"),
        ] {
            let result = config_from(&[(key, value)]);
            assert!(
                matches!(result, Err(PlayerError::Config(_))),
                "{key}={value} should be rejected"
            );
        }
    }
}
