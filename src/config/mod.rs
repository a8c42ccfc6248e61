// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[event]` - Invitation title, couple names and ceremony date
//! - `[slider]` - Auto-advance cadence and swipe threshold
//! - `[gallery]` - Image directories and prefetch limits
//! - `[cdn]` - Optional CDN delivery (cloud name, upload name mapping)
//! - `[audio]` - Sounds directory, autoplay and volume
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `KEEPSAKE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! Invalid or unreadable files degrade to defaults with a warning, never a
//! crash.

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Keepsake";
const CONFIG_DIR_ENV: &str = "KEEPSAKE_CONFIG_DIR";

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// =============================================================================
// Section Structs
// =============================================================================

/// Invitation and ceremony details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EventConfig {
    /// Heading shown above the countdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Couple names, already formatted for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couple: Option<String>,

    /// Ceremony instant as naive local time, `YYYY-MM-DDTHH:MM:SS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Venue line shown under the countdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

/// Inline slider behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliderConfig {
    /// Auto-advance period in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u32>,

    /// Minimum horizontal travel for a swipe, in logical pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            interval_secs: Some(DEFAULT_SLIDE_INTERVAL_SECS),
            swipe_threshold: Some(crate::gallery::swipe::DEFAULT_SWIPE_THRESHOLD),
        }
    }
}

/// Gallery image locations and prefetch limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GalleryConfig {
    /// Directory with the thumbnail-gallery images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images_dir: Option<PathBuf>,

    /// Directory with the ceremony slider images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slider_dir: Option<PathBuf>,

    /// Slides to prefetch in each direction around the current one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_depth: Option<usize>,

    /// Prefetch cache budget in megabytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_cache_mb: Option<u32>,
}

/// Optional CDN delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CdnConfig {
    /// CDN cloud name; when absent, images are served locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_name: Option<String>,

    /// Local file name to uploaded public id (uploads carry a suffix).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<HashMap<String, String>>,

    /// Delivery width constraint in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_width: Option<u32>,

    /// Delivery quality percentage (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_quality: Option<u8>,
}

/// Background-music settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioConfig {
    /// Directory scanned for `.mp3` tracks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sounds_dir: Option<PathBuf>,

    /// Start playing after the first user interaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    /// Playback volume (0.0 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sounds_dir: None,
            autoplay: Some(true),
            volume: Some(DEFAULT_VOLUME),
        }
    }
}

// =============================================================================
// Config Root
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub event: EventConfig,

    #[serde(default)]
    pub slider: SliderConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub cdn: CdnConfig,

    #[serde(default)]
    pub audio: AudioConfig,
}

impl Config {
    /// Returns the ceremony instant, falling back to the built-in default
    /// when the configured value is missing or unparseable.
    #[must_use]
    pub fn target_datetime(&self) -> NaiveDateTime {
        self.event
            .date
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).ok())
            .unwrap_or_else(default_target_datetime)
    }
}

fn default_target_datetime() -> NaiveDateTime {
    NaiveDateTime::parse_from_str(DEFAULT_TARGET_DATETIME, DATETIME_FORMAT)
        .expect("built-in default datetime must parse")
}

// =============================================================================
// Load / Save
// =============================================================================

fn config_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// Returns the configuration together with an optional warning message
/// when the file existed but could not be used (the defaults are returned
/// in that case).
#[must_use]
pub fn load() -> (Config, Option<String>) {
    let Some(path) = config_path() else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(e) => (
            Config::default(),
            Some(format!("Ignoring invalid config {}: {}", path.display(), e)),
        ),
    }
}

/// Saves the configuration to the default location.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads the configuration from an explicit path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to an explicit path, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let mut config = Config::default();
        config.event.title = Some("Our Wedding".to_string());
        config.event.date = Some("2026-01-03T11:00:00".to_string());
        config.slider.interval_secs = Some(6);
        config.gallery.images_dir = Some(PathBuf::from("/photos/gallery"));
        config.cdn.cloud_name = Some("demo".to_string());
        config.audio.volume = Some(0.5);

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_rejects_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(load_from_path(&config_path).is_err());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[event]\ntitle = \"Hello\"\n").expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("load failed");
        assert_eq!(loaded.event.title.as_deref(), Some("Hello"));
        assert_eq!(
            loaded.slider.interval_secs, None,
            "absent optional fields stay unset"
        );
        assert_eq!(loaded.audio.sounds_dir, None);
    }

    #[test]
    fn target_datetime_parses_configured_value() {
        let mut config = Config::default();
        config.event.date = Some("2027-06-12T15:30:00".to_string());

        let target = config.target_datetime();
        assert_eq!(
            target,
            NaiveDateTime::parse_from_str("2027-06-12T15:30:00", DATETIME_FORMAT).unwrap()
        );
    }

    #[test]
    fn target_datetime_falls_back_on_invalid_value() {
        let mut config = Config::default();
        config.event.date = Some("next saturday".to_string());

        assert_eq!(config.target_datetime(), default_target_datetime());
    }

    #[test]
    fn default_audio_config_enables_autoplay() {
        let config = Config::default();
        assert_eq!(config.audio.autoplay, Some(true));
        assert_eq!(config.audio.volume, Some(DEFAULT_VOLUME));
    }
}
