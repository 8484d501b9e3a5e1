//! Logging for sentinelctl
//!
//! The TUI owns the terminal, so tracing output goes to a file found
//! through an XDG fallback chain. One-shot commands log to stderr.

use anyhow::{anyhow, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Environment variable overriding the configured filter
pub const LOG_FILTER_ENV: &str = "SENTINEL_LOG";

/// Environment variable overriding the log file location
pub const LOG_FILE_ENV: &str = "SENTINEL_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to the discovered or configured file
    File,
    Stderr,
}

/// Discover log file path with fallback chain
///
/// Priority:
/// 1. $SENTINEL_LOG_FILE
/// 2. `file` from the `[log]` config table
/// 3. $XDG_STATE_HOME/sentinel/sentinelctl.log
/// 4. ~/.local/state/sentinel/sentinelctl.log
pub fn discover_log_path(config: &LogConfig) -> Option<PathBuf> {
    if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    if let Some(path) = &config.file {
        return Some(path.clone());
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        return Some(Path::new(&xdg_state).join("sentinel").join("sentinelctl.log"));
    }

    dirs::home_dir().map(|home| {
        home.join(".local")
            .join("state")
            .join("sentinel")
            .join("sentinelctl.log")
    })
}

/// Build the filter from $SENTINEL_LOG, else the configured level
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns the log file when one is used.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<Option<PathBuf>> {
    let filter = build_filter(config);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {}", e))?;
            Ok(None)
        }
        LogTarget::File => {
            let Some(path) = discover_log_path(config) else {
                // Nowhere to write without a home directory; stay silent
                return Ok(None);
            };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {}", e))?;
            Ok(Some(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_file_used_without_env_override() {
        if std::env::var(LOG_FILE_ENV).is_ok() {
            return;
        }
        let config = LogConfig {
            level: "debug".to_string(),
            file: Some(PathBuf::from("/tmp/sentinel-test.log")),
        };
        assert_eq!(
            discover_log_path(&config),
            Some(PathBuf::from("/tmp/sentinel-test.log"))
        );
    }

    #[test]
    fn test_configured_level_used() {
        if std::env::var(LOG_FILTER_ENV).is_ok() {
            return;
        }
        let config = LogConfig {
            level: "warn".to_string(),
            file: None,
        };
        assert_eq!(build_filter(&config).to_string(), "warn");
    }
}
