//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use mimic_core::{Config, Theme};

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "mimic")]
#[command(version)]
#[command(about = "Simulated streaming assistant for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Unicode scalar values revealed per streaming tick
    #[arg(long, value_name = "N")]
    chunk_size: Option<usize>,

    /// Delay between streaming ticks in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Color theme (dark, light)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Format text into HTML without entering the chat
    Format {
        /// Text to format; reads stdin when omitted
        #[arg(long)]
        text: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    tracing::debug!(
        chunk_size = config.chunk_size,
        interval_ms = config.interval_ms,
        "config loaded"
    );

    if let Some(chunk_size) = cli.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.interval_ms = interval_ms;
    }
    if let Some(name) = cli.theme.as_deref() {
        config.theme = Theme::from_name(name)
            .with_context(|| format!("unknown theme '{name}', expected dark or light"))?;
    }

    // default to chat mode
    let Some(command) = cli.command else {
        return commands::chat::run(&config).await;
    };

    match command {
        Commands::Format { text } => commands::format::run(text.as_deref()),
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
