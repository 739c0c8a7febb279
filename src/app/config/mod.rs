// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language and theme mode
//! - `[api]` - Search API credential, endpoint, and timeout
//! - `[search]` - Page size, fallback place, prefetch margin
//! - `[location]` - Position read timeout
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_BITES_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Credential Handling
//!
//! The API key is never compiled into the binary. It comes from the
//! `[api] key` setting, or from the `ICED_BITES_API_KEY` environment
//! variable which takes priority (see [`ApiConfig::effective_key`]).
//!
//! # Examples
//!
//! ```no_run
//! use iced_bites::app::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("de".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable that overrides the configured API key.
pub const ENV_API_KEY: &str = "ICED_BITES_API_KEY";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "de").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Search API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ApiConfig {
    /// Bearer token for the search API. Empty means "not configured";
    /// requests will be rejected by the service until one is supplied.
    #[serde(default)]
    pub key: String,

    /// Base URL of the search API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for a single search request (in seconds).
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_api_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Returns the API key to use for requests.
    ///
    /// The `ICED_BITES_API_KEY` environment variable takes priority over
    /// the configured value so the credential can be kept out of files
    /// entirely.
    #[must_use]
    pub fn effective_key(&self) -> String {
        std::env::var(ENV_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| self.key.clone())
    }
}

/// Search behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SearchConfig {
    /// Number of results fetched per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Place searched when neither a position nor a typed place exists.
    #[serde(default = "default_place")]
    pub default_place: String,

    /// Distance from the carousel end that triggers the next page load.
    #[serde(default = "default_prefetch_margin")]
    pub prefetch_margin: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_place: default_place(),
            prefetch_margin: default_prefetch_margin(),
        }
    }
}

/// Device location settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct LocationConfig {
    /// Timeout for a one-shot position read (in milliseconds).
    #[serde(default = "default_position_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_position_timeout_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Search API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Search behavior settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Device location settings.
    #[serde(default)]
    pub location: LocationConfig,
}

impl Config {
    /// Clamps every numeric setting into its documented bounds.
    ///
    /// Hand-edited files can carry anything; out-of-range values are pulled
    /// back to the nearest bound and an empty fallback place is replaced
    /// with the default, so the rest of the app never re-validates.
    pub fn normalize(&mut self) {
        self.api.timeout_secs = self
            .api
            .timeout_secs
            .clamp(MIN_API_TIMEOUT_SECS, MAX_API_TIMEOUT_SECS);
        self.search.page_size = self.search.page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        self.search.prefetch_margin = self
            .search
            .prefetch_margin
            .clamp(MIN_PREFETCH_MARGIN, MAX_PREFETCH_MARGIN);
        self.location.timeout_ms = self
            .location
            .timeout_ms
            .clamp(MIN_POSITION_TIMEOUT_MS, MAX_POSITION_TIMEOUT_MS);

        if self.search.default_place.trim().is_empty() {
            self.search.default_place = DEFAULT_PLACE.to_string();
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_timeout_secs() -> u64 {
    DEFAULT_API_TIMEOUT_SECS
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_place() -> String {
    DEFAULT_PLACE.to_string()
}

fn default_prefetch_margin() -> usize {
    DEFAULT_PREFETCH_MARGIN
}

fn default_position_timeout_ms() -> u64 {
    DEFAULT_POSITION_TIMEOUT_MS
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
        other => Err(D::Error::custom(format!("invalid theme-mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
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
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// Every load passes through [`Config::normalize`], so callers always see
/// in-bounds values.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    config.normalize();
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
    use crate::app::paths::ENV_GUARD;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("de".to_string()),
                theme_mode: ThemeMode::Light,
            },
            api: ApiConfig {
                key: "secret-token".to_string(),
                base_url: "https://search.example.com/v3/".to_string(),
                timeout_secs: 45,
            },
            search: SearchConfig {
                page_size: 20,
                default_place: "Lyon".to_string(),
                prefetch_margin: 6,
            },
            location: LocationConfig { timeout_ms: 10_000 },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn unreadable_file_yields_defaults_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(
            warning.as_deref(),
            Some("notification-config-load-error")
        );
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(message)) => assert!(message.contains("expected")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir
            .path()
            .join("deep")
            .join("path")
            .join(CONFIG_FILE);

        save_to_path(&Config::default(), &config_path).expect("failed to save config");

        assert!(config_path.exists());
    }

    #[test]
    fn kebab_case_keys_parse() {
        let content = r#"
            [general]
            theme-mode = "dark"

            [api]
            base-url = "https://search.example.com/"
            timeout-secs = 12

            [search]
            page-size = 5
            default-place = "Berlin"
            prefetch-margin = 2

            [location]
            timeout-ms = 5000
        "#;

        let config: Config = toml::from_str(content).expect("failed to parse");

        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
        assert_eq!(config.api.base_url, "https://search.example.com/");
        assert_eq!(config.api.timeout_secs, 12);
        assert_eq!(config.search.page_size, 5);
        assert_eq!(config.search.default_place, "Berlin");
        assert_eq!(config.search.prefetch_margin, 2);
        assert_eq!(config.location.timeout_ms, 5000);
    }

    #[test]
    fn theme_mode_parsing_is_case_insensitive() {
        let content = "[general]\ntheme-mode = \"DARK\"\n";
        let config: Config = toml::from_str(content).expect("failed to parse");
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let content = "[search]\npage-size = 7\n";
        let config: Config = toml::from_str(content).expect("failed to parse");

        assert_eq!(config.search.page_size, 7);
        assert_eq!(config.search.default_place, DEFAULT_PLACE);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.location.timeout_ms, DEFAULT_POSITION_TIMEOUT_MS);
    }

    #[test]
    fn normalize_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.api.timeout_secs = 10_000;
        config.search.page_size = 0;
        config.search.prefetch_margin = 99;
        config.search.default_place = "   ".to_string();
        config.location.timeout_ms = 1;

        config.normalize();

        assert_eq!(config.api.timeout_secs, MAX_API_TIMEOUT_SECS);
        assert_eq!(config.search.page_size, MIN_PAGE_SIZE);
        assert_eq!(config.search.prefetch_margin, MAX_PREFETCH_MARGIN);
        assert_eq!(config.search.default_place, DEFAULT_PLACE);
        assert_eq!(config.location.timeout_ms, MIN_POSITION_TIMEOUT_MS);
    }

    #[test]
    fn out_of_range_file_values_are_clamped_on_load() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "[search]\npage-size = 5000\n").expect("failed to write");

        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.search.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn env_var_takes_priority_over_configured_key() {
        let _lock = ENV_GUARD.lock().unwrap();
        std::env::set_var(ENV_API_KEY, "from-env");

        let api = ApiConfig {
            key: "from-file".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(api.effective_key(), "from-env");

        std::env::remove_var(ENV_API_KEY);
        assert_eq!(api.effective_key(), "from-file");
    }

    #[test]
    fn blank_env_var_falls_back_to_configured_key() {
        let _lock = ENV_GUARD.lock().unwrap();
        std::env::set_var(ENV_API_KEY, "   ");

        let api = ApiConfig {
            key: "from-file".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(api.effective_key(), "from-file");

        std::env::remove_var(ENV_API_KEY);
    }
}
