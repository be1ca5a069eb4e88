//! Centralized path helpers for config and cache directories.

use std::path::PathBuf;

use crate::core::app;

/// Project directories (config, cache) from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Override config dir for tests via env var. Set `TEST_CONFIG_DIR` before key or settings operations.
#[cfg(test)]
fn test_config_dir_override() -> Option<PathBuf> {
    std::env::var("TEST_CONFIG_DIR").ok().map(PathBuf::from)
}

/// Config directory (~/.config/gemini-explorer/).
/// In tests, set `TEST_CONFIG_DIR` env var to override.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(test)]
    if let Some(p) = test_config_dir_override() {
        return Some(p);
    }
    project_dirs().map(|d| d.config_dir().to_path_buf())
}

/// Cache directory (~/.cache/gemini-explorer/). Holds the explorer log file.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().to_path_buf())
}

/// Settings file (`settings.json`) in the config directory.
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("settings.json"))
}
