//! File logging setup.
//!
//! The TUI owns the terminal while it runs, so diagnostics go to
//! `<pivot-home>/logs/pivot.log` instead of stderr. Logging stays off unless
//! enabled in config, forced through the `PIVOT_LOG` env filter, or requested
//! with `--log-level`.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, paths};

const LOG_FILE: &str = "pivot.log";

/// Environment variable holding an `EnvFilter` directive string.
pub const ENV_FILTER_VAR: &str = "PIVOT_LOG";

/// Installs the global subscriber writing to the log file.
///
/// Returns `None` when logging is disabled. The guard flushes buffered lines
/// on drop; the caller must hold it for the life of the process. Must be
/// called at most once.
pub fn init(config: &Config, level_override: Option<&str>) -> Result<Option<WorkerGuard>> {
    let forced = std::env::var_os(ENV_FILTER_VAR).is_some() || level_override.is_some();
    if !config.log.enabled && !forced {
        return Ok(None);
    }

    let level = level_override.unwrap_or(&config.log.level);
    let filter = EnvFilter::try_from_env(ENV_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new(level));

    let logs_dir = paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("create log directory {}", logs_dir.display()))?;

    let file = tracing_appender::rolling::never(&logs_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(Some(guard))
}
