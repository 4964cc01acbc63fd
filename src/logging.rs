//! Logging setup for the movie-stats binary.
//!
//! Logs go to stderr (stdout is reserved for analysis output) and to daily
//! rotating files:
//!
//! - `movie-stats.<date>.log`: every enabled level
//! - `error.<date>.log`: warnings and errors only
//!
//! ```no_run
//! movie_stats::logging::init(None).expect("Failed to initialize logging");
//! tracing::info!("Analysis started");
//! ```

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const APP_DIR: &str = "movie-stats";
const MAX_LOG_FILES: usize = 10;

/// Default log directory under the platform data directory.
///
/// - Windows: `%APPDATA%/movie-stats/logs`
/// - macOS: `~/Library/Application Support/movie-stats/logs`
/// - Linux: `~/.local/share/movie-stats/logs`
///
/// # Errors
///
/// Returns error if the platform data directory is unknown.
pub fn default_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(base_dir.join(APP_DIR).join("logs"))
}

fn ensure_dir(log_dir: &Path) -> Result<()> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }
    Ok(())
}

fn rolling_appender(log_dir: &Path, prefix: &str) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .with_context(|| format!("Failed to create {prefix} log file appender"))
}

/// Installs the global subscriber. Call once at startup.
///
/// `log_dir` overrides [`default_log_dir`]. The level defaults to `info` and
/// can be changed with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the log directory or file appenders cannot be created.
pub fn init(log_dir: Option<&Path>) -> Result<PathBuf> {
    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_dir()?,
    };
    ensure_dir(&log_dir)?;

    let all_logs_appender = rolling_appender(&log_dir, APP_DIR)?;
    let error_logs_appender = rolling_appender(&log_dir, "error")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let error_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(error_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!("Logging initialized, log directory: {}", log_dir.display());

    Ok(log_dir)
}

/// Path of today's all-levels log file in `log_dir`.
pub fn current_log_path(log_dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d");
    log_dir.join(format!("{APP_DIR}.{today}.log"))
}
