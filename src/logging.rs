//! Logging configuration using the tracing ecosystem.
//!
//! Log output goes to a daily rotating file so it never corrupts the TUI.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::Settings;

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "mappmarker=info,warn";

/// File name prefix of the daily log files.
const LOG_FILE_NAME: &str = "mappmarker.log";

/// Initialize the logging system.
///
/// Logs are written to the platform-specific local data directory:
/// - Linux: `~/.local/share/mappmarker/logs/`
/// - macOS: `~/Library/Application Support/mappmarker/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\mappmarker\logs\`
///
/// The level is taken from `RUST_LOG` (e.g. `RUST_LOG=mappmarker=debug`).
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Mappmarker starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("mappmarker").join("logs"))
}

/// Get the path where logs are stored, for display to users.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Record the effective settings once they are merged with the command line.
///
/// A run with a fixed seed can be replayed from the logged value.
pub fn log_settings(settings: &Settings) {
    let seed = match settings.seed {
        Some(seed) => seed.to_string(),
        None => "random".to_string(),
    };
    tracing::info!(
        theme = %settings.theme,
        vim_mode = settings.vim_mode,
        tick_rate_ms = settings.tick_rate_ms,
        route_count = settings.route_count,
        initial_row_count = settings.initial_row_count,
        seed = %seed,
        "Effective settings"
    );
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("Mappmarker shutting down");
}
