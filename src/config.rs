//! Front-end settings.
//!
//! Settings are read from a TOML file. They cover how results are presented
//! and how many categories a result lists; there is deliberately no setting
//! for the extension table itself.
//!
//! # Configuration File Format
//!
//! ```toml
//! [organizer]
//! category_capacity = 10   # 0 means unbounded
//!
//! [interface]
//! confirm = true
//! color = true
//! history_size = 10
//! ```

use crate::result::MAX_CATEGORIES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-directory settings file.
pub const LOCAL_CONFIG_FILE: &str = ".dirsortrc.toml";

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("IO error reading configuration: {0}")]
    IoError(#[from] std::io::Error),
}

/// All settings, as stored in the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub organizer: OrganizerSettings,

    #[serde(default)]
    pub interface: InterfaceSettings,
}

/// Settings passed to [`crate::Organizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerSettings {
    /// Distinct categories listed in a result; 0 lifts the limit.
    #[serde(default = "default_category_capacity")]
    pub category_capacity: usize,
}

impl Default for OrganizerSettings {
    fn default() -> Self {
        Self {
            category_capacity: default_category_capacity(),
        }
    }
}

impl OrganizerSettings {
    /// The capacity in the form [`crate::Organizer::with_category_capacity`] takes.
    pub fn capacity(&self) -> Option<usize> {
        match self.category_capacity {
            0 => None,
            n => Some(n),
        }
    }
}

fn default_category_capacity() -> usize {
    MAX_CATEGORIES
}

/// Settings for the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSettings {
    /// Ask before organizing a folder.
    #[serde(default = "default_true")]
    pub confirm: bool,

    /// Colored output.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Entries kept in the recent folders list.
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Default for InterfaceSettings {
    fn default() -> Self {
        Self {
            confirm: true,
            color: true,
            history_size: default_history_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_history_size() -> usize {
    10
}

impl Settings {
    /// Load settings, falling back to defaults.
    ///
    /// Attempts to load settings in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.dirsortrc.toml` in the current directory
    /// 3. Look for `~/.config/dirsort/config.toml` in the home directory
    /// 4. Fall back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a file is found (or named explicitly) but cannot be
    /// read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("dirsort")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load settings from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}
