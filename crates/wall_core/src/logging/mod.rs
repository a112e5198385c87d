//! Logging setup for the conference wall.
//!
//! All crates log through `tracing`. This module installs the global
//! subscriber:
//! - Respects the `RUST_LOG` environment variable
//! - Falls back to the configured [`LogLevel`]
//! - Optionally mirrors output to a daily log file
//!
//! # Example
//!
//! ```no_run
//! use wall_core::logging::{init_tracing_with_file, LogLevel};
//!
//! // Keep the guard alive until exit so buffered lines are flushed
//! let _guard = init_tracing_with_file(LogLevel::Info, ".logs");
//! tracing::info!("Conference wall starting");
//! ```

mod types;

pub use types::LogLevel;

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix of the daily log files.
pub const LOG_FILE_PREFIX: &str = "conference-wall.log";

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)))
}

/// Initialize global tracing subscriber for application-wide logging.
///
/// Outputs to stderr with timestamps. Should be called once at startup.
pub fn init_tracing(default_level: LogLevel) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(env_filter(default_level))
        .init();
}

/// Initialize tracing to stderr and a daily rolling file in `logs_dir`.
///
/// Returns the writer guard; dropping it flushes and stops file output.
/// Falls back to stderr only, returning `None`, if the directory cannot
/// be created.
pub fn init_tracing_with_file(
    default_level: LogLevel,
    logs_dir: impl AsRef<Path>,
) -> Option<WorkerGuard> {
    let logs_dir = logs_dir.as_ref();
    if let Err(e) = fs::create_dir_all(logs_dir) {
        init_tracing(default_level);
        tracing::warn!(
            "Cannot create logs folder {}: {}, logging to stderr only",
            logs_dir.display(),
            e
        );
        return None;
    }

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(env_filter(default_level))
        .init();

    Some(guard)
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
    }
}
