//! The player loop: coalesces scroll input to one evaluation per frame and
//! feeds it through the observer into the presenter.

use std::future::Future;
use std::time::Duration;

use scrollytale_narrative::application::presenter::StoryTextPresenter;
use scrollytale_narrative::domain::commands::RenderCommand;
use scrollytale_scroll::coalesce::FrameCoalescer;
use scrollytale_scroll::observer::ScrollObserver;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::PlayerError;

/// One running story session.
#[derive(Debug)]
pub struct Player {
    presenter: StoryTextPresenter,
    observer: ScrollObserver,
    frames: FrameCoalescer<f64>,
    max_offset: f64,
}

impl Player {
    /// Creates a player for a page whose largest scroll offset is
    /// `max_offset`.
    #[must_use]
    pub fn new(presenter: StoryTextPresenter, observer: ScrollObserver, max_offset: f64) -> Self {
        Self {
            presenter,
            observer,
            frames: FrameCoalescer::new(),
            max_offset,
        }
    }

    /// Brings back the text box from the last run, shown instantly.
    ///
    /// The saved scroll offset only primes direction tracking. It is never
    /// evaluated: it lags the text snapshot whenever the last move was
    /// under the save threshold.
    pub fn resume(&mut self) -> Option<RenderCommand> {
        let command = self.presenter.restore();
        let offset = self.observer.restore_offset();
        info!(restored = command.is_some(), ?offset, "session resumed");
        command
    }

    /// Queues one raw input line. Blank lines are ignored; a newer offset
    /// replaces any offset still waiting for the next frame.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Input` if the line is not a finite number.
    pub fn push_line(&mut self, line: &str) -> Result<(), PlayerError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        let offset: f64 = line
            .parse()
            .map_err(|e| PlayerError::Input(format!("{line:?} is not an offset: {e}")))?;
        if !offset.is_finite() {
            return Err(PlayerError::Input(format!("{line:?} is not finite")));
        }
        self.frames.push(offset);
        Ok(())
    }

    /// Evaluates the offset queued for this frame, if any.
    pub fn frame(&mut self) -> Option<RenderCommand> {
        let offset = self.frames.take()?;
        let report = self.observer.observe(offset, self.max_offset);
        match self.presenter.on_report(report) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!(error = %e, offset, "frame rejected");
                None
            }
        }
    }

    /// The presenter driving the text box.
    #[must_use]
    pub fn presenter(&self) -> &StoryTextPresenter {
        &self.presenter
    }

    /// Offsets replaced before their frame came around.
    #[must_use]
    pub fn dropped_frames(&self) -> u64 {
        self.frames.dropped()
    }

    /// Gives up the player, keeping the presenter.
    #[must_use]
    pub fn into_presenter(self) -> StoryTextPresenter {
        self.presenter
    }
}

/// How a [`run`] finished.
#[derive(Debug)]
pub enum Ending {
    /// Input reached end of file. The session is kept for the next run.
    InputClosed(Player),
    /// Shutdown was requested. The presenter was destroyed along with the
    /// persisted session.
    Destroyed,
}

/// Drives `player` from `input`, one offset per line, evaluating at most
/// one offset every `frame`.
///
/// # Errors
///
/// Returns `PlayerError::Io` if reading `input` fails.
pub async fn run<R, S>(
    mut player: Player,
    input: R,
    frame: Duration,
    shutdown: S,
) -> Result<Ending, PlayerError>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = input.lines();
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!(dropped_frames = player.dropped_frames(), "shutdown requested");
                player.into_presenter().destroy();
                return Ok(Ending::Destroyed);
            }
            _ = ticker.tick() => {
                player.frame();
            }
            line = lines.next_line() => match line? {
                Some(line) => {
                    if let Err(e) = player.push_line(&line) {
                        warn!(error = %e, "skipping input line");
                    }
                }
                None => {
                    player.frame();
                    debug!(dropped_frames = player.dropped_frames(), "input closed");
                    return Ok(Ending::InputClosed(player));
                }
            },
        }
    }
}
