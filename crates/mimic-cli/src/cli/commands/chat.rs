//! Interactive chat mode (default command).

use anyhow::Result;
use mimic_core::Config;

pub async fn run(config: &Config) -> Result<()> {
    tracing::info!(
        chunk_size = config.chunk_size,
        interval_ms = config.interval_ms,
        theme = config.theme.display_name(),
        "starting chat TUI"
    );
    mimic_tui::run_chat(config).await
}
