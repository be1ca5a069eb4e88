//! API key storage: load and persist the Gemini API key in the config directory.
//!
//! The key is stored in a dedicated file with restrictive permissions (0o600 on Unix).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::core::paths;

/// Errors when loading or storing the API key.
#[derive(Debug, thiserror::Error)]
pub enum ApiKeyError {
    #[error("No config directory available")]
    NoConfigDir,
    #[error("Failed to store API key: {0}")]
    Io(#[from] io::Error),
}

/// Path to the API key file in the config directory.
pub fn credentials_path() -> Option<PathBuf> {
    paths::config_dir().map(|d| d.join("api-key"))
}

/// Load the API key from the config directory.
/// Returns `None` if the file is absent, empty, or unreadable.
pub fn load_api_key() -> Option<String> {
    load_api_key_from(&credentials_path()?)
}

fn load_api_key_from(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let key = content.trim().to_string();
    if key.is_empty() { None } else { Some(key) }
}

/// Store the API key in the config directory.
/// Creates the config dir if needed. On Unix, sets file permissions to 0o600.
pub fn store_api_key(key: &str) -> Result<PathBuf, ApiKeyError> {
    let path = credentials_path().ok_or(ApiKeyError::NoConfigDir)?;
    store_api_key_at(&path, key)?;
    Ok(path)
}

fn store_api_key_at(path: &Path, key: &str) -> Result<(), ApiKeyError> {
    let dir = path.parent().ok_or_else(|| {
        ApiKeyError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Invalid credentials path",
        ))
    })?;
    fs::create_dir_all(dir)?;

    let mut file = fs::File::create(path)?;
    file.write_all(key.trim().as_bytes())?;
    file.write_all(b"\n")?;

    #[cfg(unix)]
    {
        let mut perms = file.metadata()?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("api-key");

        store_api_key_at(&path, "  sk-test-key-123\n").unwrap();
        assert_eq!(load_api_key_from(&path).as_deref(), Some("sk-test-key-123"));
    }

    #[test]
    fn load_missing_or_blank_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api-key");
        assert_eq!(load_api_key_from(&path), None);

        fs::write(&path, "   \n").unwrap();
        assert_eq!(load_api_key_from(&path), None);
    }

    #[cfg(unix)]
    #[test]
    fn stored_key_is_owner_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api-key");
        store_api_key_at(&path, "sk").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn store_uses_config_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        unsafe { std::env::set_var("TEST_CONFIG_DIR", dir.path()) };

        let path = store_api_key("sk-from-override").unwrap();
        assert_eq!(path, dir.path().join("api-key"));
        assert_eq!(load_api_key().as_deref(), Some("sk-from-override"));

        unsafe { std::env::remove_var("TEST_CONFIG_DIR") };
    }
}
