// SPDX-License-Identifier: MPL-2.0
//! This module handles the queue's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `ALERT_QUEUE_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use alert_queue::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.settling_delay_ms = 250;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::diagnostics::BufferCapacity;
use crate::domain::alert::SettlingDelay;
use crate::error::{Error, Result};
use crate::queue::QueueOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "AlertQueue";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ALERT_QUEUE_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Wait between a close and the next activation, in milliseconds.
    #[serde(default = "default_settling_delay_ms")]
    pub settling_delay_ms: u64,

    /// Whether the visible dialog shows the "N unread alerts" notice.
    #[serde(default = "default_show_pending_message")]
    pub show_pending_message: bool,

    /// Diagnostic events kept in memory.
    #[serde(default = "default_diagnostics_capacity")]
    pub diagnostics_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            settling_delay_ms: DEFAULT_SETTLING_DELAY_MS,
            show_pending_message: DEFAULT_SHOW_PENDING_MESSAGE,
            diagnostics_capacity: DEFAULT_DIAGNOSTICS_CAPACITY,
        }
    }
}

impl Config {
    /// Returns the settling delay, clamped to its valid range.
    #[must_use]
    pub fn settling_delay(&self) -> SettlingDelay {
        SettlingDelay::new(self.settling_delay_ms)
    }

    /// Returns the diagnostics capacity, clamped to its valid range.
    #[must_use]
    pub fn diagnostics_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(self.diagnostics_capacity)
    }

    /// Builds the queue options described by these settings.
    #[must_use]
    pub fn queue_options(&self) -> QueueOptions {
        QueueOptions {
            settling_delay: self.settling_delay(),
            show_pending_message: self.show_pending_message,
        }
    }
}

fn default_settling_delay_ms() -> u64 {
    DEFAULT_SETTLING_DELAY_MS
}

fn default_show_pending_message() -> bool {
    DEFAULT_SHOW_PENDING_MESSAGE
}

fn default_diagnostics_capacity() -> usize {
    DEFAULT_DIAGNOSTICS_CAPACITY
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory: explicit override, then environment, then
/// the platform default.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if base_dir.is_some() {
        return base_dir;
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the path of the settings file, if a config directory exists.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    get_config_dir_with_override(None).map(|dir| dir.join(CONFIG_FILE))
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// A missing file yields the default configuration.
pub fn load() -> Result<Config> {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> Result<Config> {
    if let Some(dir) = get_config_dir_with_override(base_dir) {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Loads configuration from a specific path.
///
/// Content that is not valid TOML yields the default configuration; only
/// read failures are reported.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = get_config_dir_with_override(base_dir) {
        return save_to_path(config, &dir.join(CONFIG_FILE));
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
