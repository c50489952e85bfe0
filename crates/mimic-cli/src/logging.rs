//! File logging setup.
//!
//! Logs go to daily-rotated files under the mimic logs directory so
//! they never interleave with the alternate-screen TUI. The filter is
//! taken from MIMIC_LOG, defaulting to `info`.

use mimic_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes logging and returns the guard that flushes buffered
/// lines on drop.
///
/// Best-effort: when the logs directory cannot be created or a global
/// subscriber is already set, tracing stays uninitialized instead of
/// failing the CLI.
pub fn init() -> Option<WorkerGuard> {
    let logs_dir = paths::logs_dir();
    std::fs::create_dir_all(&logs_dir).ok()?;

    let appender = tracing_appender::rolling::daily(logs_dir, "mimic.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("MIMIC_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}
