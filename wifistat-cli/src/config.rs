//! Settings file for the `wifistat` command.
//!
//! Read from `config.toml` under the user's config directory, e.g.
//! `~/.config/wifistat/config.toml`. Every key is optional:
//!
//! ```toml
//! interval_secs = 5
//! read_timeout_secs = 5
//! location_timeout_secs = 10
//! location = true
//! location_accuracy = "high"   # "low", "balanced" or "high"
//! permissions_required = true
//! desktop_id = "wifistat"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wifistat::{FetchConfig, LocationAccuracy};

/// Position accuracy as spelled in the settings file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracySetting {
    Low,
    Balanced,
    #[default]
    High,
}

impl From<AccuracySetting> for LocationAccuracy {
    fn from(setting: AccuracySetting) -> Self {
        match setting {
            AccuracySetting::Low => LocationAccuracy::Low,
            AccuracySetting::Balanced => LocationAccuracy::Balanced,
            AccuracySetting::High => LocationAccuracy::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub interval_secs: u64,
    pub read_timeout_secs: u64,
    pub location_timeout_secs: u64,
    pub location: bool,
    pub location_accuracy: AccuracySetting,
    pub permissions_required: bool,
    pub desktop_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = FetchConfig::default();
        Self {
            interval_secs: defaults.poll_interval.as_secs(),
            read_timeout_secs: defaults.read_timeout.as_secs(),
            location_timeout_secs: defaults.location_timeout.as_secs(),
            location: defaults.location_enabled,
            location_accuracy: AccuracySetting::default(),
            permissions_required: defaults.permissions_required,
            desktop_id: defaults.desktop_id,
        }
    }
}

impl Settings {
    /// Builds the library configuration.
    ///
    /// Durations are clamped to between one second and one day.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new()
            .with_poll_interval(secs(self.interval_secs))
            .with_read_timeout(secs(self.read_timeout_secs))
            .with_location_timeout(secs(self.location_timeout_secs))
            .with_location_enabled(self.location)
            .with_location_accuracy(self.location_accuracy.into())
            .with_permissions_required(self.permissions_required)
            .with_desktop_id(self.desktop_id.clone())
    }
}

const MAX_SECS: u64 = 86_400;

fn secs(value: u64) -> Duration {
    Duration::from_secs(value.clamp(1, MAX_SECS))
}

/// Default location of the settings file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wifistat").join("config.toml"))
}

/// Loads settings from the default location.
pub fn load() -> Result<Settings> {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            log::debug!("No config directory, using default settings");
            Ok(Settings::default())
        }
    }
}

/// Loads settings from `path`, falling back to defaults if it doesn't exist.
pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::debug!("{} not found, using default settings", path.display());
        return Ok(Settings::default());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let settings = toml::from_str(&text)
        .with_context(|| format!("invalid settings in {}", path.display()))?;

    log::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}
