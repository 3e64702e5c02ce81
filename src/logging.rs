//! File-based logging
//!
//! The TUI owns the terminal, so tracing output goes to a daily rotating file
//! instead of stdout.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "streamify";

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "streamify=debug,warn";

/// Log directory: the platform data dir, or `.logs` when there is none
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("streamify").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".logs"))
}

/// Initialize the logging system.
///
/// Logs are written to `<log dir>/streamify.YYYY-MM-DD` with daily rotation.
/// The level can be controlled via the `RUST_LOG` environment variable.
pub fn init_logging() -> anyhow::Result<PathBuf> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);

    // Non-blocking so the render loop never waits on disk
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the guard alive for the lifetime of the application
    Box::leak(Box::new(guard));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %dir.display(), "logging initialized");

    Ok(dir)
}
