//! Runtime configuration: API key, endpoint, and the recommended-models policy.
//!
//! Sources, highest precedence first: environment (including `.env`), the
//! optional `settings.json` in the config directory, built-in defaults.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::core::api_key;
use crate::core::models::DEFAULT_RECOMMENDED;
use crate::core::paths;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub key_source: KeySource,
    pub base_url: String,
    pub page_size: u32,
    pub request_timeout: Duration,
    pub recommended_models: Vec<String>,
}

/// Where the API key came from (shown by the `config` command).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Env(&'static str),
    Stored,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Env(var) => write!(f, "from {}", var),
            KeySource::Stored => write!(f, "from stored key file"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set (GOOGLE_API_KEY or `set-api-key` also work)")]
    MissingApiKey,
    #[error("Invalid settings file {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to read settings: {0}")]
    Io(#[from] io::Error),
}

/// Optional overrides read from `settings.json`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub recommended_models: Option<Vec<String>>,
}

impl Settings {
    /// Read settings from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        serde_json::from_str(&data).map_err(|source| ConfigError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load settings from the config directory (defaults when there is none).
pub fn load_settings() -> Result<Settings, ConfigError> {
    match paths::settings_path() {
        Some(path) => Settings::load_from(&path),
        None => Ok(Settings::default()),
    }
}

/// Load configuration from environment, settings file, and stored key.
/// Returns an error if no API key is available.
pub fn load() -> Result<Config, ConfigError> {
    let settings = load_settings()?;
    resolve(|var| env::var(var).ok(), api_key::load_api_key, settings)
}

/// Combine the sources into a [`Config`]. Empty environment values are ignored.
pub fn resolve<E, K>(env: E, stored_key: K, settings: Settings) -> Result<Config, ConfigError>
where
    E: Fn(&str) -> Option<String>,
    K: FnOnce() -> Option<String>,
{
    let non_empty = |var: &str| env(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let (api_key, key_source) = match API_KEY_VARS
        .iter()
        .copied()
        .find_map(|var| non_empty(var).map(|key| (key, KeySource::Env(var))))
    {
        Some(found) => found,
        None => (
            stored_key().ok_or(ConfigError::MissingApiKey)?,
            KeySource::Stored,
        ),
    };

    let base_url = non_empty("GEMINI_BASE_URL")
        .or(settings.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let recommended_models = match non_empty("GEMINI_RECOMMENDED_MODELS") {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => settings.recommended_models.unwrap_or_else(|| {
            DEFAULT_RECOMMENDED.iter().map(|s| s.to_string()).collect()
        }),
    };

    Ok(Config {
        api_key,
        key_source,
        base_url,
        page_size: settings.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
        request_timeout: Duration::from_secs(
            settings
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        ),
        recommended_models,
    })
}
