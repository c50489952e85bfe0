//! Event loop: owns the terminal, drains the inbox, executes effects.
//!
//! Streaming tasks run on tokio and report back through the inbox, so
//! the loop itself never blocks on a reveal. Polling runs fast while a
//! stream or status flash is live and drops to an idle cadence
//! otherwise.

use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use mimic_core::Config;
use mimic_core::stream::stream_reply;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::render::render;
use crate::sink::InboxSink;
use crate::state::{AppState, StreamState};
use crate::terminal;
use crate::update::{copy_preview, update};

/// Poll timeout while a stream or flash needs animation.
const FAST_POLL: Duration = Duration::from_millis(16);
/// Poll timeout when nothing is animating.
const IDLE_POLL: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    inbox_tx: UnboundedSender<UiEvent>,
    inbox_rx: UnboundedReceiver<UiEvent>,
}

impl TuiRuntime {
    /// Sets up the terminal and initial state.
    ///
    /// # Errors
    /// Returns an error if terminal setup fails.
    pub fn new(config: Config) -> Result<Self> {
        terminal::install_panic_hook();
        let term = terminal::setup_terminal()?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal: term,
            state: AppState::new(config),
            inbox_tx,
            inbox_rx,
        })
    }

    /// Runs the event loop until a quit effect lands.
    ///
    /// # Errors
    /// Returns an error if terminal IO fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_mouse_capture()?;
        let result = self.event_loop();
        let _ = terminal::disable_mouse_capture();
        let _ = terminal::restore_terminal();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.state.should_quit {
            let events = self.collect_events()?;

            let mut effects = Vec::new();
            for event in events {
                effects.extend(update(&mut self.state, event));
            }
            for effect in effects {
                self.execute_effect(effect);
            }

            self.terminal
                .draw(|frame| render(&self.state, frame))
                .context("Failed to draw frame")?;
        }
        Ok(())
    }

    /// Gathers this iteration's events: frame geometry, inbox messages,
    /// pending terminal input, and a trailing tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let size = self.terminal.size().context("Failed to read terminal size")?;
        events.push(UiEvent::Frame {
            width: size.width,
            height: size.height,
        });

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let timeout = if self.needs_fast_polling() {
            FAST_POLL
        } else {
            IDLE_POLL
        };
        if crossterm::event::poll(timeout).context("Failed to poll terminal events")? {
            events.push(UiEvent::Terminal(crossterm::event::read()?));
            // Drain whatever else is already queued without waiting.
            while crossterm::event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(crossterm::event::read()?));
            }
        }

        events.push(UiEvent::Tick);
        Ok(events)
    }

    fn needs_fast_polling(&self) -> bool {
        self.state.stream.is_streaming() || self.state.copied.is_some()
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => self.state.should_quit = true,
            UiEffect::StartStream { reply } => self.spawn_stream(reply),
            UiEffect::CancelStream => {
                if let StreamState::Streaming { cancel } = &self.state.stream {
                    cancel.cancel();
                }
            }
            UiEffect::CopyCodeBlock { code } => self.copy_to_clipboard(&code),
            UiEffect::PersistTheme { theme } => {
                if let Err(err) = Config::save_theme(theme) {
                    tracing::warn!("failed to persist theme: {err:#}");
                }
            }
        }
    }

    /// Spawns the reveal task. The cancellation handle reaches state
    /// through a `StreamStarted` event so the reducer stays the single
    /// writer of stream state.
    fn spawn_stream(&self, reply: String) {
        let tx = self.inbox_tx.clone();
        let cancel = CancellationToken::new();
        let options = self.state.config.stream_options();

        let _ = tx.send(UiEvent::StreamStarted {
            cancel: cancel.clone(),
        });

        tokio::spawn(async move {
            let mut sink = InboxSink::new(tx.clone());
            let outcome = stream_reply(&reply, &mut sink, &options, &cancel).await;
            let _ = tx.send(UiEvent::StreamClosed {
                outcome: outcome.map_err(|err| err.to_string()),
            });
        });
    }

    fn copy_to_clipboard(&mut self, code: &str) {
        let copied = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(code.to_string()));
        match copied {
            Ok(()) => {
                let _ = self.inbox_tx.send(UiEvent::ClipboardCopied {
                    preview: copy_preview(code),
                });
            }
            Err(err) => {
                tracing::warn!("clipboard copy failed: {err}");
                self.state
                    .transcript
                    .push_system("Clipboard unavailable; the code block was not copied.");
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
