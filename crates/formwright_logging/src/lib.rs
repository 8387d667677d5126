//! Shared logging bootstrap for Formwright hosts.
//!
//! Anything embedding the engine (desktop shell, test harness, future
//! services) initializes tracing through here so filters and file
//! locations stay consistent.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "formwright_schema=info,formwright_client=info";

/// Logging configuration for a Formwright host.
pub struct LogConfig<'a> {
    /// Base name of the log file (one per host binary).
    pub app_name: &'a str,
    /// Mirror the file filter onto stderr instead of warn-only.
    pub verbose: bool,
}

/// Initialize tracing with a daily-rotated file writer and stderr output.
///
/// Returns the appender guard; dropping it flushes and stops the
/// background writer, so hosts keep it alive for their whole lifetime.
pub fn init_logging(config: LogConfig<'_>) -> Result<WorkerGuard> {
    let log_dir = ensure_logs_dir().context("Failed to ensure log directory")?;
    let file_appender = tracing_appender::rolling::daily(log_dir, format!("{}.log", config.app_name));
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_filter =
        EnvFilter::try_from_env("FORMWRIGHT_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let console_filter = if config.verbose {
        EnvFilter::try_from_env("FORMWRIGHT_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .init();

    Ok(guard)
}

/// Get the Formwright home directory: ~/.formwright
pub fn formwright_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("FORMWRIGHT_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".formwright")
}

/// Get the logs directory: ~/.formwright/logs
pub fn logs_dir() -> PathBuf {
    formwright_home().join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_honors_override() {
        // Env mutation is process-wide; keep this the only test touching it.
        std::env::set_var("FORMWRIGHT_HOME", "/tmp/formwright-test-home");
        assert_eq!(
            formwright_home(),
            PathBuf::from("/tmp/formwright-test-home")
        );
        assert_eq!(
            logs_dir(),
            PathBuf::from("/tmp/formwright-test-home/logs")
        );
        std::env::remove_var("FORMWRIGHT_HOME");
    }
}
