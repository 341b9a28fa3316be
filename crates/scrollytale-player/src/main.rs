//! Scrollytale player entry point.
//!
//! Feed it one scroll offset per line on stdin, for example
//! `seq 0 25 5000 | scrollytale-player`.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use scrollytale_core::render::Renderer;
use scrollytale_core::store::SessionStore;
use scrollytale_narrative::application::loader::load_story_file;
use scrollytale_narrative::application::presenter::StoryTextPresenter;
use scrollytale_narrative::domain::mehdi_and_shelly::mehdi_and_shelly;
use scrollytale_player::app::{Ending, Player, run};
use scrollytale_player::config::PlayerConfig;
use scrollytale_player::renderer::TerminalRenderer;
use scrollytale_player::store::FileSessionStore;
use scrollytale_scroll::observer::ScrollObserver;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr; stdout is the text box.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!("Starting Scrollytale player");

    let config = PlayerConfig::from_env()?;

    let story = match &config.story_path {
        Some(path) => load_story_file(path)?,
        None => mehdi_and_shelly()?,
    };

    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session_file));
    let renderer: Arc<dyn Renderer> = Arc::new(TerminalRenderer::stdout(config.text_speed));
    let presenter = StoryTextPresenter::builder()
        .story(Arc::new(story))
        .renderer(Arc::clone(&renderer))
        .store(Arc::clone(&store))
        .build()?;
    let observer = ScrollObserver::with_store(store);

    let mut player = Player::new(presenter, observer, config.page_height);
    player.resume();
    tracing::info!(
        session = %config.session_file.display(),
        page_height = config.page_height,
        "Reading scroll offsets from stdin"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };
    let input = BufReader::new(tokio::io::stdin());

    match run(player, input, config.frame_interval, shutdown).await? {
        Ending::InputClosed(player) => {
            // Let the last reveal finish typing before exiting.
            while player.presenter().is_animating() {
                tokio::time::sleep(config.frame_interval).await;
            }
            tracing::info!(
                text_visible = renderer.is_visible(),
                "Input closed, session kept"
            );
        }
        Ending::Destroyed => tracing::info!("Session cleared"),
    }

    Ok(())
}
