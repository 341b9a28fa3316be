//! Shared test helpers for player integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use scrollytale_core::clock::Clock;
use scrollytale_core::render::Renderer;
use scrollytale_core::store::SessionStore;
use scrollytale_narrative::application::presenter::StoryTextPresenter;
use scrollytale_narrative::domain::mehdi_and_shelly::mehdi_and_shelly;
use scrollytale_player::app::Player;
use scrollytale_scroll::observer::ScrollObserver;

/// Largest scroll offset of the test page, in px.
pub const MAX_OFFSET: f64 = 5000.0;

/// Beats of the built-in story in reading order.
pub const READING_ORDER: [&str; 18] = [
    "mehdiEnters",
    "mehdiIntro",
    "mehdiThought",
    "transition1",
    "shellyEnters",
    "shellyIntro",
    "shellyThought",
    "meetingMoment",
    "firstSight",
    "mehdiMeetsShelly",
    "shellyMeetsMehdi",
    "connectionGrows",
    "mehdiConfession",
    "shellyResponse",
    "loveBlossoms",
    "heartAppears",
    "finalWords",
    "theEnd",
];

/// Build a player over the built-in story, the same way `main.rs` does.
pub fn build_player(
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
) -> Player {
    let presenter = StoryTextPresenter::builder()
        .story(Arc::new(mehdi_and_shelly().unwrap()))
        .renderer(renderer)
        .store(Arc::clone(&store))
        .clock(clock)
        .build()
        .unwrap();
    Player::new(presenter, ScrollObserver::with_store(store), MAX_OFFSET)
}

/// Push `offset` and evaluate it as its own frame.
pub fn scroll_to(player: &mut Player, offset: f64) {
    player.push_line(&offset.to_string()).unwrap();
    player.frame();
}

/// The beat the presenter considers current.
pub fn current_beat(player: &Player) -> Option<String> {
    player
        .presenter()
        .state()
        .last_shown_beat_id
        .as_ref()
        .map(ToString::to_string)
}
