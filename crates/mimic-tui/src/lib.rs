//! Full-screen chat TUI for mimic.
//!
//! Elm-style slices: `state` holds the data, `update` is the pure
//! reducer, `render` is the pure view, and `runtime` owns the terminal
//! and executes effects (task spawning, clipboard, persistence).

pub mod common;
pub mod effects;
pub mod events;
pub mod input;
pub mod render;
pub mod runtime;
pub mod sink;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod transcript;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use mimic_core::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive chat loop.
pub async fn run_chat(config: &Config) -> Result<()> {
    // Chat mode requires a terminal to render the TUI
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Chat mode requires a terminal.\n\
             Use `mimic format --text '...'` for non-interactive formatting."
        );
    }

    let mut runtime = TuiRuntime::new(config.clone())?;
    runtime.state.transcript.push_system(
        "Welcome to mimic, a simulated streaming assistant. \
         Type a message and press Enter; replies are generated locally.",
    );
    runtime.run()?;

    Ok(())
}
