// SPDX-License-Identifier: MPL-2.0
//! Loading and saving user preferences in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Theme mode
//! - `[archive]` - Endpoint, access key, startup range and timeout
//! - `[gallery]` - Thumbnail and detail resolution, thumbnail cache budget
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI argument or `ICED_APOD_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! Missing keys take their default value. A file that cannot be parsed is
//! ignored as a whole and reported through the returned warning.

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::ui::{PreviewSize, SpanDays};
use crate::error::{Error, Result};
use crate::infrastructure::ApodOptions;
use crate::media::PreviewCacheConfig;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning shown when the settings file exists but cannot be used.
pub const LOAD_ERROR_WARNING: &str = "Settings could not be read. Defaults are in use.";

// =============================================================================
// Section Structs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// Application theme mode (light, dark, or system).
    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Remote archive access.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveConfig {
    #[serde(default = "default_endpoint", skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Access key passed as the `api_key` query parameter.
    #[serde(default = "default_api_key", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Days before today covered by the range loaded at startup.
    #[serde(default = "default_span_days", skip_serializing_if = "Option::is_none")]
    pub default_span_days: Option<u32>,

    /// Overall timeout for archive requests. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: default_api_key(),
            default_span_days: default_span_days(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Longest edge of grid thumbnails, in pixels.
    #[serde(default = "default_thumbnail_size", skip_serializing_if = "Option::is_none")]
    pub thumbnail_size: Option<u32>,

    /// Longest edge of the image in the detail view, in pixels.
    #[serde(default = "default_detail_size", skip_serializing_if = "Option::is_none")]
    pub detail_size: Option<u32>,

    /// Memory budget for decoded previews, in megabytes.
    #[serde(
        default = "default_thumbnail_cache_mb",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_cache_mb: Option<u32>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: default_thumbnail_size(),
            detail_size: default_detail_size(),
            thumbnail_cache_mb: default_thumbnail_cache_mb(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl Config {
    /// Client settings, with `api_key_override` (from the CLI) taking
    /// precedence over the file.
    #[must_use]
    pub fn archive_options(&self, api_key_override: Option<String>) -> ApodOptions {
        let api_key = api_key_override
            .or_else(|| self.archive.api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string());

        ApodOptions {
            endpoint: self
                .archive
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key,
            timeout: self.archive.request_timeout_secs.map(|secs| {
                Duration::from_secs(secs.clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS))
            }),
        }
    }

    #[must_use]
    pub fn span_days(&self) -> SpanDays {
        SpanDays::new(self.archive.default_span_days.unwrap_or(DEFAULT_SPAN_DAYS))
    }

    #[must_use]
    pub fn preview_size(&self) -> PreviewSize {
        PreviewSize::new(self.gallery.thumbnail_size.unwrap_or(DEFAULT_THUMBNAIL_SIZE))
    }

    #[must_use]
    pub fn detail_size(&self) -> PreviewSize {
        PreviewSize::new(self.gallery.detail_size.unwrap_or(DEFAULT_DETAIL_SIZE))
    }

    #[must_use]
    pub fn preview_cache(&self) -> PreviewCacheConfig {
        PreviewCacheConfig::from_megabytes(
            self.gallery
                .thumbnail_cache_mb
                .unwrap_or(DEFAULT_THUMBNAIL_CACHE_MB),
        )
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_endpoint() -> Option<String> {
    Some(DEFAULT_ENDPOINT.to_string())
}

fn default_api_key() -> Option<String> {
    Some(DEFAULT_API_KEY.to_string())
}

fn default_span_days() -> Option<u32> {
    Some(DEFAULT_SPAN_DAYS)
}

fn default_thumbnail_size() -> Option<u32> {
    Some(DEFAULT_THUMBNAIL_SIZE)
}

fn default_detail_size() -> Option<u32> {
    Some(DEFAULT_DETAIL_SIZE)
}

fn default_thumbnail_cache_mb() -> Option<u32> {
    Some(DEFAULT_THUMBNAIL_CACHE_MB)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("Ignoring {}: {err}", path.display());
                    return (Config::default(), Some(LOAD_ERROR_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
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
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
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

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ui::newtypes::{preview_bounds, span_bounds};
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                theme_mode: ThemeMode::Light,
            },
            archive: ArchiveConfig {
                endpoint: Some("http://localhost:9000/apod".into()),
                api_key: Some("secret".into()),
                default_span_days: Some(3),
                request_timeout_secs: Some(20),
            },
            gallery: GalleryConfig {
                thumbnail_size: Some(256),
                detail_size: Some(2048),
                thumbnail_cache_mb: Some(32),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn missing_keys_take_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[archive]\napi_key = \"abc\"\n").expect("write file");

        let config = load_from_path(&config_path).expect("load config");

        assert_eq!(config.archive.api_key.as_deref(), Some("abc"));
        assert_eq!(config.archive.default_span_days, Some(DEFAULT_SPAN_DAYS));
        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert_eq!(config.gallery, GalleryConfig::default());
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let result = toml::from_str::<Config>("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));

        assert_eq!(warning.as_deref(), Some(LOAD_ERROR_WARNING));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().join("portable");
        let mut config = Config::default();
        config.general.theme_mode = ThemeMode::Dark;

        save_with_override(&config, Some(base_dir.clone())).expect("save");
        let (loaded, warning) = load_with_override(Some(base_dir));

        assert!(warning.is_none());
        assert_eq!(loaded.general.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn cli_api_key_wins_over_file() {
        let mut config = Config::default();
        config.archive.api_key = Some("from-file".into());

        assert_eq!(config.archive_options(Some("from-cli".into())).api_key, "from-cli");
        assert_eq!(config.archive_options(None).api_key, "from-file");
    }

    #[test]
    fn blank_api_key_falls_back_to_demo_key() {
        let mut config = Config::default();
        config.archive.api_key = Some("   ".into());
        assert_eq!(config.archive_options(None).api_key, DEFAULT_API_KEY);
    }

    #[test]
    fn timeout_is_unset_by_default_and_clamped_otherwise() {
        let mut config = Config::default();
        assert!(config.archive_options(None).timeout.is_none());

        config.archive.request_timeout_secs = Some(0);
        assert_eq!(
            config.archive_options(None).timeout,
            Some(Duration::from_secs(MIN_REQUEST_TIMEOUT_SECS))
        );
    }

    #[test]
    fn gallery_values_are_clamped() {
        let mut config = Config::default();
        config.gallery.thumbnail_size = Some(1);
        config.gallery.detail_size = Some(1_000_000);
        config.archive.default_span_days = Some(10_000);

        assert_eq!(config.preview_size().value(), preview_bounds::MIN);
        assert_eq!(config.detail_size().value(), preview_bounds::MAX);
        assert_eq!(config.span_days().value(), span_bounds::MAX);
    }
}
