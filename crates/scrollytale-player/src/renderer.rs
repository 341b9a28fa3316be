//! Terminal text box: prints beats, revealing them typewriter-style.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use scrollytale_core::beat::{Beat, BeatKind};
use scrollytale_core::error::StoryError;
use scrollytale_core::render::{AnimationHandle, Renderer};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

/// Formats a beat as one line of terminal text.
#[must_use]
pub fn format_line(beat: &Beat) -> String {
    let line = match (beat.kind, beat.speaker.as_deref()) {
        (BeatKind::Dialogue, Some(speaker)) => format!("{speaker}: \"{}\"", beat.display_text),
        (BeatKind::Dialogue, None) => format!("\"{}\"", beat.display_text),
        (BeatKind::CharacterIntro, _) => format!("[ {} ]", beat.display_text),
        (BeatKind::Narrator, _) => beat.display_text.clone(),
    };
    if beat.is_heart_moment {
        format!("♥ {line} ♥")
    } else {
        line
    }
}

struct ConsoleInner {
    out: Box<dyn Write + Send>,
    line_open: bool,
}

impl ConsoleInner {
    fn close_line(&mut self) -> io::Result<()> {
        if self.line_open {
            writeln!(self.out)?;
            self.line_open = false;
        }
        self.out.flush()
    }
}

/// Serialized access to the output stream shared by instant writes and
/// running typewriter tasks.
pub struct Console {
    inner: Mutex<ConsoleInner>,
}

impl Console {
    /// Wraps an output stream.
    #[must_use]
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            inner: Mutex::new(ConsoleInner {
                out,
                line_open: false,
            }),
        }
    }

    fn with(&self, f: impl FnOnce(&mut ConsoleInner) -> io::Result<()>) -> Result<(), StoryError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| StoryError::RenderFailure("console lock poisoned".into()))?;
        f(&mut inner).map_err(|e| StoryError::RenderFailure(format!("console write failed: {e}")))
    }

    fn write_line(&self, line: &str) -> Result<(), StoryError> {
        self.with(|inner| {
            inner.close_line()?;
            writeln!(inner.out, "{line}")?;
            inner.out.flush()
        })
    }

    fn begin_line(&self) -> Result<(), StoryError> {
        self.with(|inner| {
            inner.close_line()?;
            inner.line_open = true;
            Ok(())
        })
    }

    fn push_char(&self, ch: char) -> Result<(), StoryError> {
        self.with(|inner| {
            write!(inner.out, "{ch}")?;
            inner.out.flush()
        })
    }

    fn end_line(&self) -> Result<(), StoryError> {
        self.with(ConsoleInner::close_line)
    }
}

/// Handle to a running typewriter task. Cancelling aborts the task.
#[derive(Debug)]
pub struct TypewriterHandle {
    task: JoinHandle<()>,
}

impl AnimationHandle for TypewriterHandle {
    fn cancel(&mut self) {
        self.task.abort();
    }

    fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// A [`Renderer`] that prints to a terminal stream.
pub struct TerminalRenderer {
    console: Arc<Console>,
    char_delay: Duration,
    runtime: Handle,
    visible: AtomicBool,
}

impl TerminalRenderer {
    /// Creates a renderer writing to `console`, typing `chars_per_second`
    /// characters per second. Typewriter tasks run on `runtime`.
    #[must_use]
    pub fn new(console: Arc<Console>, chars_per_second: u32, runtime: Handle) -> Self {
        Self {
            console,
            char_delay: Duration::from_secs_f64(1.0 / f64::from(chars_per_second.max(1))),
            runtime,
            visible: AtomicBool::new(false),
        }
    }

    /// Creates a renderer on stdout using the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn stdout(chars_per_second: u32) -> Self {
        Self::new(
            Arc::new(Console::new(Box::new(io::stdout()))),
            chars_per_second,
            Handle::current(),
        )
    }
}

impl Renderer for TerminalRenderer {
    fn show_animated(&self, beat: &Beat) -> Result<Box<dyn AnimationHandle>, StoryError> {
        let line = format_line(beat);
        let console = Arc::clone(&self.console);
        let delay = self.char_delay;

        console.begin_line()?;
        self.visible.store(true, Ordering::SeqCst);
        let task = self.runtime.spawn(async move {
            for ch in line.chars() {
                if let Err(e) = console.push_char(ch) {
                    warn!(error = %e, "typewriter stopped");
                    return;
                }
                tokio::time::sleep(delay).await;
            }
            if let Err(e) = console.end_line() {
                warn!(error = %e, "typewriter could not finish line");
            }
        });
        Ok(Box::new(TypewriterHandle { task }))
    }

    fn show_instant(&self, beat: &Beat) -> Result<(), StoryError> {
        self.console.write_line(&format_line(beat))?;
        self.visible.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoryError> {
        self.visible.store(false, Ordering::SeqCst);
        self.console.end_line()
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use scrollytale_core::beat::Beat;
    use scrollytale_core::render::{AnimationHandle, Renderer};
    use tokio::runtime::Handle;

    use super::{Console, TerminalRenderer, format_line};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn renderer(chars_per_second: u32) -> (TerminalRenderer, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let console = Arc::new(Console::new(Box::new(buffer.clone())));
        (
            TerminalRenderer::new(console, chars_per_second, Handle::current()),
            buffer,
        )
    }

    #[test]
    fn test_format_line_by_kind() {
        assert_eq!(
            format_line(&Beat::narrator("firstSight", "Their eyes meet")),
            "Their eyes meet"
        );
        assert_eq!(
            format_line(&Beat::character_intro("mehdiIntro", "Mehdi")),
            "[ Mehdi ]"
        );
        assert_eq!(
            format_line(&Beat::dialogue("hi", "Shelly", "Hi there!")),
            "Shelly: \"Hi there!\""
        );
        assert_eq!(
            format_line(&Beat::narrator("theEnd", "The End").heart_moment()),
            "♥ The End ♥"
        );
    }

    #[tokio::test]
    async fn test_show_instant_writes_whole_line() {
        let (renderer, buffer) = renderer(50);

        renderer
            .show_instant(&Beat::narrator("firstSight", "Their eyes meet"))
            .unwrap();

        assert_eq!(buffer.contents(), "Their eyes meet\n");
        assert!(renderer.is_visible());
    }

    #[tokio::test]
    async fn test_show_animated_types_full_line() {
        let (renderer, buffer) = renderer(10_000);

        let handle = renderer
            .show_animated(&Beat::character_intro("shellyIntro", "Shelly"))
            .unwrap();
        while !handle.is_finished() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        assert_eq!(buffer.contents(), "[ Shelly ]\n");
    }

    #[tokio::test]
    async fn test_cancelled_typewriter_line_is_closed_by_next_write() {
        let (renderer, buffer) = renderer(1);

        let mut handle = renderer
            .show_animated(&Beat::narrator("slow", "abcdef"))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel();
        while !handle.is_finished() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        renderer
            .show_instant(&Beat::narrator("next", "next"))
            .unwrap();

        assert_eq!(buffer.contents(), "a\nnext\n");
    }

    #[tokio::test]
    async fn test_clear_hides_text_box() {
        let (renderer, _buffer) = renderer(50);
        renderer.show_instant(&Beat::narrator("a", "A")).unwrap();

        renderer.clear().unwrap();

        assert!(!renderer.is_visible());
    }
}
