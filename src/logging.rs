//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily-rotated file so command output on stdout stays
//! machine-readable. `--verbose` adds a compact layer on stderr.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "taiga_api=info,warn";

/// File name prefix; the appender adds the date.
const LOG_FILE_NAME: &str = "taiga.log";

/// Filter used in verbose mode.
const VERBOSE_LOG_FILTER: &str = "taiga_api=debug,info";

/// Initialize the logging system.
///
/// # Log Directory
///
/// Logs are stored in the platform-specific local data directory:
/// - Linux: `~/.local/share/taiga/logs/`
/// - macOS: `~/Library/Application Support/taiga/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\taiga\logs\`
///
/// Configure the level with `RUST_LOG`, e.g. `RUST_LOG=taiga_api=trace`.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let dir = logs_dir()?;
    std::fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_NAME);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(stderr_layer)
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "taiga starting up");
    tracing::debug!(dir = %dir.display(), "Writing logs");

    Ok(())
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

fn logs_dir() -> anyhow::Result<PathBuf> {
    dirs::data_local_dir()
        .map(|base| base.join("taiga").join("logs"))
        .context("could not determine the local data directory")
}

/// Where log files are written, for display in error hints.
pub fn log_directory() -> Option<PathBuf> {
    logs_dir().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_dir_is_under_taiga() {
        let dir = log_directory().unwrap();
        assert!(dir.ends_with("taiga/logs"));
    }

    #[test]
    fn test_verbose_raises_crate_level() {
        assert_eq!(default_filter(false), "taiga_api=info,warn");
        assert!(default_filter(true).starts_with("taiga_api=debug"));
    }
}
