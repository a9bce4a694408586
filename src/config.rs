//! Configuration management
//!
//! Settings live in `<config_dir>/story-player/config.toml`. Missing files
//! and missing fields fall back to defaults.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::player::PlayerError;

/// How the caller-supplied pause flag feeds the input gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerPausePolicy {
    /// The caller flag always pauses playback
    #[default]
    Always,
    /// The caller flag only pauses while the progress row is hidden
    WithoutProgress,
}

/// What the terminal host does when an item fails to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFailurePolicy {
    /// Move on to the next item
    #[default]
    Skip,
    /// Stop playback of the whole deck
    Stop,
}

/// Settings for the playback core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Duration for items without an explicit one
    pub default_duration_ms: u64,
    /// Fraction of the width that counts as the "go back" tap zone
    pub tap_split_ratio: f64,
    /// Show the progress indicator row
    pub enable_progress: bool,
    pub caller_pause: CallerPausePolicy,
    /// Hold time before a press becomes a long press
    pub long_press_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 3000,
            tap_split_ratio: 0.5,
            enable_progress: true,
            caller_pause: CallerPausePolicy::Always,
            long_press_ms: 200,
        }
    }
}

impl PlayerConfig {
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    /// Check values the player cannot work with.
    pub fn validate(&self) -> Result<(), PlayerError> {
        if self.default_duration_ms == 0 {
            return Err(PlayerError::InvalidConfig(
                "default_duration_ms must be greater than 0".to_string(),
            ));
        }
        if !(self.tap_split_ratio > 0.0 && self.tap_split_ratio < 1.0) {
            return Err(PlayerError::InvalidConfig(format!(
                "tap_split_ratio must be between 0 and 1 (got {})",
                self.tap_split_ratio
            )));
        }
        Ok(())
    }
}

/// Settings for the terminal host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Interval between timer ticks
    pub tick_ms: u64,
    /// Simulated media load latency
    pub load_delay_ms: u64,
    pub on_load_failure: MediaFailurePolicy,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            tick_ms: 33,
            load_delay_ms: 250,
            on_load_failure: MediaFailurePolicy::Skip,
        }
    }
}

impl TerminalConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub terminal: TerminalConfig,
}

impl Config {
    /// Load configuration from the default location, or defaults if the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.player.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("story-player").join("config.toml"))
    }
}
