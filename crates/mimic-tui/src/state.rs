//! Application state for the chat TUI.

use std::time::Instant;

use mimic_core::{Config, Theme};
use tokio_util::sync::CancellationToken;

use crate::input::InputState;
use crate::transcript::TranscriptState;

/// Lifecycle of the reply reveal task.
#[derive(Debug, Clone, Default)]
pub enum StreamState {
    #[default]
    Idle,
    Streaming {
        cancel: CancellationToken,
    },
}

impl StreamState {
    pub fn is_streaming(&self) -> bool {
        matches!(self, StreamState::Streaming { .. })
    }
}

/// How long the "copied" notice stays in the status line.
pub const COPY_FLASH_DURATION_MS: u128 = 1500;

#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    pub config: Config,
    pub theme: Theme,
    pub input: InputState,
    pub transcript: TranscriptState,
    pub stream: StreamState,
    /// Animation frame counter, advanced on ticks.
    pub spinner_frame: usize,
    /// Clipboard feedback: when it was copied and a short preview.
    pub copied: Option<(Instant, String)>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let theme = config.theme;
        Self {
            should_quit: false,
            config,
            theme,
            input: InputState::default(),
            transcript: TranscriptState::default(),
            stream: StreamState::default(),
            spinner_frame: 0,
            copied: None,
        }
    }

    /// Text for the "copied" status notice while the flash is active.
    pub fn copy_flash(&self) -> Option<&str> {
        match &self.copied {
            Some((at, preview)) if at.elapsed().as_millis() < COPY_FLASH_DURATION_MS => {
                Some(preview.as_str())
            }
            _ => None,
        }
    }
}
