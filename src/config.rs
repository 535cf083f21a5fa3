//! Configuration file handling
//!
//! Configuration lives at `<config dir>/rewindtty/config.toml`. A missing
//! file means defaults; missing fields within a file also take defaults.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::player::playback::DEFAULT_DISPATCH_THRESHOLD_MS;
use crate::player::{EngineOptions, Speed, DEFAULT_PROMPT};
use crate::upload::{DEFAULT_PLAYER_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_UPLOAD_URL};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub bookmarks: BookmarksConfig,
    pub upload: UploadConfig,
}

/// `[playback]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// How often the player advances the clock (milliseconds)
    pub tick_interval_ms: u64,
    /// Minimum logical advance before output is dispatched (milliseconds)
    pub dispatch_threshold_ms: f64,
    /// Starting speed: one of 0.5, 1, 1.5, 2, 3
    pub default_speed: f64,
    /// Text shown before each replayed command
    pub prompt: String,
    /// Arrow-key seek step (seconds)
    pub seek_step_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            dispatch_threshold_ms: DEFAULT_DISPATCH_THRESHOLD_MS,
            default_speed: 1.0,
            prompt: DEFAULT_PROMPT.to_string(),
            seek_step_secs: 5.0,
        }
    }
}

impl PlaybackConfig {
    /// Configured speed, or 1x if the value is not a supported speed.
    pub fn speed(&self) -> Speed {
        Speed::from_multiplier(self.default_speed).unwrap_or_else(|| {
            tracing::warn!(
                value = self.default_speed,
                "unsupported default_speed, using 1x"
            );
            Speed::Normal
        })
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            dispatch_threshold_ms: self.dispatch_threshold_ms,
            prompt: self.prompt.clone(),
            speed: self.speed(),
        }
    }
}

/// `[bookmarks]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmarksConfig {
    /// Where bookmark files are kept; next to the recording when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// `[upload]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Endpoint recordings are POSTed to
    pub url: String,
    /// Web player base; the uploaded recording is at `<player_url>/<id>`
    pub player_url: String,
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPLOAD_URL.to_string(),
            player_url: DEFAULT_PLAYER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl UploadConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("rewindtty").join("config.toml"))
    }

    /// Load from the default location; defaults if the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, self.to_toml_string()?)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
