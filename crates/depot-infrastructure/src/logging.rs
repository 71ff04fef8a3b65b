//! Log subscriber setup
//!
//! Containers log through `tracing` only; installing a subscriber is left to
//! the embedding application, which may call [`init_logging`] once at
//! startup. Build and resolution events carry `container` and `identity`
//! fields, so a JSON subscriber yields one queryable record per build.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use depot_domain::error::{Error, Result};
use tracing::{Level, info, warn};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::LoggingConfig;
use crate::constants::{LOG_ENV_VAR, LOG_FILE_STEM};

/// Install the global subscriber described by `config`
///
/// A `DEPOT_LOG` filter directive, when set, replaces the configured level.
/// Records go to stdout and, with `file_output`, to a file rotated daily.
///
/// # Errors
///
/// - the configured level is not a known level
/// - a global subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));
    let file = config.file_output.as_deref().map(rolling_file);
    let registry = Registry::default().with(filter);

    // json() changes the layer type, so each format gets its own stack
    let installed = if config.json_format {
        let stdout = fmt::layer()
            .json()
            .with_current_span(true)
            .with_thread_names(true);
        let file = file.map(|writer| fmt::layer().json().with_writer(writer).with_ansi(false));
        registry.with(stdout).with(file).try_init()
    } else {
        let stdout = fmt::layer().with_target(true).with_thread_names(true);
        let file = file.map(|writer| fmt::layer().with_writer(writer).with_ansi(false));
        registry.with(stdout).with(file).try_init()
    };
    installed.map_err(|err| Error::configuration(format!("Log subscriber not installed: {err}")))?;

    info!(
        level = %level,
        json = config.json_format,
        file = ?config.file_output,
        "Logging initialized"
    );
    Ok(())
}

/// Directory and file name prefix of the rolling log file for `path`
///
/// A bare file name logs into the working directory; a path without a file
/// name falls back to the `depot` prefix.
pub fn rolling_file_target(path: &Path) -> (PathBuf, OsString) {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = path
        .file_stem()
        .map_or_else(|| OsString::from(LOG_FILE_STEM), ToOwned::to_owned);
    (directory, prefix)
}

fn rolling_file(path: &Path) -> RollingFileAppender {
    let (directory, prefix) = rolling_file_target(path);
    tracing_appender::rolling::daily(directory, prefix)
}

/// Parse a level name, case-insensitively
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Unknown log level '{level}', expected trace, debug, info, warn or error"
        ))),
    }
}

/// Report which configuration file was read
pub fn log_config_loaded(config_path: &Path, found: bool) {
    if found {
        info!(path = %config_path.display(), "Configuration file loaded");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found");
    }
}
