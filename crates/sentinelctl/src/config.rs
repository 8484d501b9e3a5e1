//! Configuration management for sentinelctl.
//!
//! Loads settings from `--config`, then `$XDG_CONFIG_HOME/sentinel/config.toml`,
//! else uses defaults. Every field has a serde default so partial files work.

use anyhow::{Context, Result};
use sentinel_shared::activity::{DEFAULT_FEED_INTERVAL, DEFAULT_INDICATOR_INTERVAL, FEED_CAPACITY};
use sentinel_shared::dispatcher::DispatchOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::Section;

/// Activity feed and live indicator timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_interval")]
    pub interval_secs: u64,

    /// Entries kept visible
    #[serde(default = "default_feed_capacity")]
    pub capacity: usize,

    #[serde(default = "default_indicator_interval")]
    pub indicator_interval_secs: u64,

    /// Fixed seed for the event picker; random when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_feed_interval() -> u64 {
    DEFAULT_FEED_INTERVAL.as_secs()
}

fn default_feed_capacity() -> usize {
    FEED_CAPACITY
}

fn default_indicator_interval() -> u64 {
    DEFAULT_INDICATOR_INTERVAL.as_secs()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_feed_interval(),
            capacity: default_feed_capacity(),
            indicator_interval_secs: default_indicator_interval(),
            seed: None,
        }
    }
}

impl FeedConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn indicator_interval(&self) -> Duration {
        Duration::from_secs(self.indicator_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub start_section: Section,

    /// Guideline tab selected at startup
    #[serde(default = "default_guideline")]
    pub default_guideline: String,

    /// Input poll timeout in milliseconds
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
}

fn default_guideline() -> String {
    "flood".to_string()
}

fn default_poll_ms() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_section: Section::default(),
            default_guideline: default_guideline(),
            poll_ms: default_poll_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing filter directive, overridden by $SENTINEL_LOG
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Explicit log file; discovered from XDG paths when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentinelConfig {
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub dispatch: DispatchOptions,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file found at the default location
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl SentinelConfig {
    /// Default config path under the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sentinel").join("config.toml"))
    }

    /// Load config. An explicit path must exist and parse; the default path
    /// is optional.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::load_from_path(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                let config = Self::load_from_path(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            _ => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
