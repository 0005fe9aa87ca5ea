//! Logging setup
//!
//! Two sinks hang off one `tracing_subscriber` registry:
//! - a plain-text file `<log_dir>/bot.log`, appended to, at the configured level
//! - stderr, warnings and errors only
//!
//! `RUST_LOG` takes precedence over the configured level when set.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "bot.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Where and how much to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub file_name: String,
    /// Filter directive for the file sink, e.g. `info` or `futures_order_bot=debug`
    pub level: String,
    pub console_level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            file_name: DEFAULT_LOG_FILE.to_string(),
            level: DEFAULT_LOG_LEVEL.to_string(),
            console_level: LevelFilter::WARN,
        }
    }
}

impl LogConfig {
    /// Reads `LOG_DIR` and `LOG_LEVEL`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_dir: lookup("LOG_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            level: lookup("LOG_LEVEL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.level),
            ..defaults
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.file_name)
    }
}

/// Create the log directory if needed and open the log file for appending
pub fn open_log_file(config: &LogConfig) -> Result<File, LoggingError> {
    let path = config.log_path();
    let io_err = |source| LoggingError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(&config.log_dir).map_err(io_err)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(io_err)
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init(config: &LogConfig) -> Result<PathBuf, LoggingError> {
    let file = Arc::new(open_log_file(config)?);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(config.console_level);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(config.log_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LogConfig::from_lookup(|_| None);
        assert_eq!(config.log_path(), PathBuf::from("logs").join("bot.log"));
        assert_eq!(config.level, "info");
        assert_eq!(config.console_level, LevelFilter::WARN);
    }

    #[test]
    fn test_env_overrides() {
        let config = LogConfig::from_lookup(|name| match name {
            "LOG_DIR" => Some("/var/log/bot".to_string()),
            "LOG_LEVEL" => Some("debug".to_string()),
            _ => None,
        });
        assert_eq!(config.log_dir, PathBuf::from("/var/log/bot"));
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_open_log_file_creates_dir_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            log_dir: dir.path().join("nested").join("logs"),
            ..LogConfig::default()
        };

        {
            let mut file = open_log_file(&config).unwrap();
            writeln!(file, "first").unwrap();
        }
        {
            let mut file = open_log_file(&config).unwrap();
            writeln!(file, "second").unwrap();
        }

        let contents = fs::read_to_string(config.log_path()).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let config = LogConfig {
            log_dir: blocker.join("logs"),
            ..LogConfig::default()
        };
        let err = open_log_file(&config).unwrap_err();
        assert!(matches!(err, LoggingError::Io { .. }));
        assert!(err.to_string().contains("bot.log"));
    }
}
