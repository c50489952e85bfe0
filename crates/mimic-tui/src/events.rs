//! Events consumed by the reducer.
//!
//! Terminal input, frame notifications, and messages posted to the
//! runtime inbox by background tasks all arrive as [`UiEvent`]s.

use mimic_core::FormattedBlock;
use mimic_core::stream::StreamOutcome;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Periodic tick for animations and timed UI state.
    Tick,
    /// Emitted once per loop iteration with the current terminal size.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// A streaming task was spawned; carries its cancellation handle.
    StreamStarted { cancel: CancellationToken },
    /// The stream revealed a longer raw prefix.
    StreamRaw { text: String },
    /// The stream committed the formatted reply.
    StreamCommitted { blocks: Vec<FormattedBlock> },
    /// The streaming task finished; error is stringified for transport.
    StreamClosed {
        outcome: Result<StreamOutcome, String>,
    },
    /// A code block was copied to the clipboard.
    ClipboardCopied { preview: String },
}
