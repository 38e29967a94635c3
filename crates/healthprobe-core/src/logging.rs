//! File logging setup

use std::fs::OpenOptions;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Route `tracing` output to the configured file, appending to it and
/// creating it if needed.
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard must be held
/// until the process exits so buffered lines reach the file.
pub fn init_file_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::logging(e.to_string()))?;

    Ok(guard)
}
