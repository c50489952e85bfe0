//! Effects requested by the reducer and executed by the runtime.
//!
//! The reducer stays pure: anything that touches the outside world
//! (task spawning, clipboard, disk) is described as a [`UiEffect`].

use mimic_core::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Exit the event loop.
    Quit,
    /// Spawn a streaming task revealing `reply` into the transcript.
    StartStream { reply: String },
    /// Cancel the active streaming task, if any.
    CancelStream,
    /// Copy `code` to the system clipboard.
    CopyCodeBlock { code: String },
    /// Persist the theme preference to the config file.
    PersistTheme { theme: Theme },
}
