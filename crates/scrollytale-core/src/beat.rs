//! Beat value types shared between the narrative and its renderers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single narrative beat, e.g. `mehdiEnters`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeatId(String);

impl BeatId {
    /// Creates a beat identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BeatId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for BeatId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BeatId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How a beat's text is voiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeatKind {
    /// Third-person narration.
    Narrator,
    /// A line spoken by a character; carries a speaker.
    Dialogue,
    /// A character's name card.
    CharacterIntro,
}

/// One immutable narrative moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    /// Unique key.
    pub id: BeatId,
    /// The literal text shown in the text box.
    pub display_text: String,
    /// How the text is voiced.
    pub kind: BeatKind,
    /// Who says it. Meaningful only for [`BeatKind::Dialogue`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Presentation hint for the romantic-climax styling.
    #[serde(default)]
    pub is_heart_moment: bool,
}

impl Beat {
    /// A narrator beat.
    #[must_use]
    pub fn narrator(id: &str, text: &str) -> Self {
        Self {
            id: BeatId::new(id),
            display_text: text.to_owned(),
            kind: BeatKind::Narrator,
            speaker: None,
            is_heart_moment: false,
        }
    }

    /// A character name card.
    #[must_use]
    pub fn character_intro(id: &str, name: &str) -> Self {
        Self {
            kind: BeatKind::CharacterIntro,
            ..Self::narrator(id, name)
        }
    }

    /// A spoken line.
    #[must_use]
    pub fn dialogue(id: &str, speaker: &str, text: &str) -> Self {
        Self {
            kind: BeatKind::Dialogue,
            speaker: Some(speaker.to_owned()),
            ..Self::narrator(id, text)
        }
    }

    /// Marks the beat as a heart moment.
    #[must_use]
    pub fn heart_moment(mut self) -> Self {
        self.is_heart_moment = true;
        self
    }
}
