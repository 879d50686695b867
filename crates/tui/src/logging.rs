//! File logging.
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file under
//! the configured log directory.

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

const LOG_FILE: &str = "crmterm.log";

/// Keeps the background writer alive; pending lines are flushed on drop.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init(config: &AppConfig) -> Result<LoggingGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level));
    let filter = filter.map_err(|err| AppError::Logging(err.to_string()))?;

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing::info!(
        log_dir = %config.log_dir.display(),
        level = %config.log_level,
        "logging initialized"
    );
    Ok(LoggingGuard { _guard: guard })
}
