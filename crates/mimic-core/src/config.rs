//! Configuration management for mimic.
//!
//! Loads configuration from ${MIMIC_HOME}/config.toml with sensible
//! defaults when the file is missing.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::stream::StreamOptions;

/// Color theme for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parses a theme name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unicode scalar values revealed per streaming tick.
    pub chunk_size: usize,

    /// Delay between streaming ticks in milliseconds.
    pub interval_ms: u64,

    /// Color theme for the TUI.
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            interval_ms: Self::DEFAULT_INTERVAL_MS,
            theme: Theme::default(),
        }
    }
}

impl Config {
    const DEFAULT_CHUNK_SIZE: usize = 2;
    const DEFAULT_INTERVAL_MS: u64 = 12;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Persists only the theme preference to the default config file.
    pub fn save_theme(theme: Theme) -> Result<()> {
        Self::save_theme_to(&paths::config_path(), theme)
    }

    /// Persists only the theme preference to a specific config file.
    ///
    /// Other fields keep their on-disk values; the file is created with
    /// defaults if it doesn't exist yet.
    pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
        let mut config = Self::load_from(path)?;
        config.theme = theme;
        config.write_to(path)
    }

    /// Writes the full config to a file, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Streaming pacing derived from the configured values.
    pub fn stream_options(&self) -> StreamOptions {
        StreamOptions {
            chunk_size: self.chunk_size.max(1),
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

pub mod paths {
    //! Path resolution for mimic configuration and data directories.
    //!
    //! MIMIC_HOME resolution order:
    //! 1. MIMIC_HOME environment variable (if set)
    //! 2. ~/.config/mimic (default)

    use std::path::PathBuf;

    /// Returns the mimic home directory.
    pub fn mimic_home() -> PathBuf {
        if let Ok(home) = std::env::var("MIMIC_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("mimic"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        mimic_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        mimic_home().join("logs")
    }
}
