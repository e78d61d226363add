//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a sectile.toml, and if present we load settings from there.
//! This provides the event poll interval, notice lifetime, settings file and log file.
//! Section command settings themselves live in the JSON settings store, not here.

use facet::Facet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "sectile.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from sectile.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Milliseconds to wait for terminal input before polling the clipboard again.
    pub tick_rate_ms: u64,
    #[facet(default = 2000)]
    /// Milliseconds a notice stays in the status bar.
    pub notice_ms: u64,
    #[facet(default = ".sectile.json".to_string())]
    /// Where the section settings are persisted.
    pub settings_file: String,
    #[facet(default = String::new())]
    /// Log destination; empty disables logging.
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            notice_ms: 2000,
            settings_file: ".sectile.json".to_string(),
            log_file: String::new(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from sectile.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, using defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| facet_toml::from_str::<Self>(&contents).ok())
            .unwrap_or_default()
    }

    #[must_use]
    /// Input poll interval.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    #[must_use]
    /// Notice lifetime.
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }

    #[must_use]
    /// Log file, when logging is enabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        (!self.log_file.is_empty()).then(|| PathBuf::from(&self.log_file))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
