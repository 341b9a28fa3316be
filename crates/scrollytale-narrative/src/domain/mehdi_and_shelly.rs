//! The built-in story: Mehdi and Shelly meet and fall in love.

use scrollytale_core::beat::Beat;
use scrollytale_core::error::StoryError;

use super::story::{Cue, Scene, StoryTable};

/// Builds the built-in story table.
///
/// # Errors
///
/// Never in practice; the table is validated like any loaded story.
pub fn mehdi_and_shelly() -> Result<StoryTable, StoryError> {
    let beats = vec![
        // Scene 1: Mehdi enters from the left.
        Beat::narrator(
            "mehdiEnters",
            "Someone named Mehdi was there... So sad. He was thinking all day long.",
        ),
        Beat::character_intro("mehdiIntro", "Mehdi"),
        Beat::dialogue(
            "mehdiThought",
            "Mehdi",
            "I'm so sad, I have to do something. Everything feels meaningless.",
        ),
        // Scene 2: Mehdi leaves, Shelly enters from the right.
        Beat::narrator(
            "transition1",
            "Then appeared a beautiful girl. She looked like an angel. She was so good (OMG)!",
        ),
        Beat::narrator(
            "shellyEnters",
            "Shelly came into this world. Let the story unfold...",
        ),
        Beat::character_intro("shellyIntro", "Shelly"),
        Beat::dialogue("shellyThought", "Shelly", "OMG! Everything is so cool here."),
        // Scene 3: they meet in the center.
        Beat::narrator("meetingMoment", "They finally meet each other..."),
        Beat::narrator("firstSight", "Their eyes meet for the first time"),
        Beat::dialogue(
            "mehdiMeetsShelly",
            "Mehdi",
            "Hello sunshine. My name is Mehdi.",
        ),
        Beat::dialogue("shellyMeetsMehdi", "Shelly", "Hi there! I'm Shelly."),
        // Scene 4: love develops.
        Beat::narrator(
            "connectionGrows",
            "With every word they exchanged, their hearts grew closer...",
        ),
        Beat::dialogue(
            "mehdiConfession",
            "Mehdi",
            "Shelly, from the very first moment I saw you, I felt something special...",
        ),
        Beat::dialogue("shellyResponse", "Shelly", "I feel the same way, Mehdi..."),
        // Scene 5: the heart appears.
        Beat::narrator(
            "loveBlossoms",
            "And she gave meaning to Mehdi's life. They are happy together.",
        )
        .heart_moment(),
        Beat::narrator("heartAppears", "❤️ Now there is true love ❤️").heart_moment(),
        Beat::narrator("finalWords", "And they lived happily ever after...").heart_moment(),
        Beat::narrator("theEnd", "The End ❤️").heart_moment(),
    ];

    let scenes = vec![
        Scene::new(vec![
            Cue::new(0.0, "mehdiEnters"),
            Cue::new(0.3, "mehdiIntro"),
            Cue::new(0.7, "mehdiThought"),
        ]),
        Scene::new(vec![
            Cue::new(0.0, "transition1"),
            Cue::new(0.4, "shellyEnters"),
            Cue::new(0.7, "shellyIntro"),
            Cue::new(0.9, "shellyThought"),
        ]),
        Scene::new(vec![
            Cue::new(0.0, "meetingMoment"),
            Cue::new(0.3, "firstSight"),
            Cue::new(0.5, "mehdiMeetsShelly"),
            Cue::new(0.8, "shellyMeetsMehdi"),
        ]),
        Scene::new(vec![
            Cue::new(0.0, "connectionGrows"),
            Cue::new(0.4, "mehdiConfession"),
            Cue::new(0.8, "shellyResponse"),
        ]),
        Scene::new(vec![
            Cue::new(0.0, "loveBlossoms"),
            Cue::new(0.3, "heartAppears"),
            Cue::new(0.7, "finalWords"),
            Cue::new(0.9, "theEnd"),
        ]),
    ];

    StoryTable::new(beats, scenes)
}

#[cfg(test)]
mod tests {
    use scrollytale_core::beat::{BeatId, BeatKind};
    use scrollytale_core::progress::SceneIndex;

    use super::*;

    #[test]
    fn test_builtin_story_is_valid_and_fully_cued() {
        let story = mehdi_and_shelly().unwrap();

        assert_eq!(story.beats().count(), 18);
        assert!(story.uncued_beats().is_empty());
    }

    #[test]
    fn test_every_scene_starts_at_zero() {
        let story = mehdi_and_shelly().unwrap();

        for scene in SceneIndex::all() {
            assert_eq!(story.scene(scene).cues[0].at, 0.0, "{scene}");
        }
    }

    #[test]
    fn test_heart_moments_are_exactly_scene_five() {
        let story = mehdi_and_shelly().unwrap();
        let scene_five: Vec<&BeatId> = story
            .scene(SceneIndex::LAST)
            .cues
            .iter()
            .map(|cue| &cue.beat)
            .collect();

        for beat in story.beats() {
            assert_eq!(beat.is_heart_moment, scene_five.contains(&&beat.id), "{}", beat.id);
        }
    }

    #[test]
    fn test_dialogue_speakers_are_the_two_characters() {
        let story = mehdi_and_shelly().unwrap();

        for beat in story.beats().filter(|b| b.kind == BeatKind::Dialogue) {
            let speaker = beat.speaker.as_deref().unwrap();
            assert!(speaker == "Mehdi" || speaker == "Shelly", "{speaker}");
        }
    }
}
