//! Credential storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CREDENTIALS_DIR: &str = ".futureforge";
const CREDENTIALS_FILE_NAME: &str = "user.json";

fn default_keyring_service() -> String {
    String::from("futureforge-cli")
}

/// Where the persisted user record lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// OS keychain, falling back to the credentials file.
    #[default]
    Keyring,
    /// Credentials file only.
    File,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub storage: StorageBackend,

    /// Credentials file path. Empty means `~/.futureforge/user.json`.
    #[serde(default)]
    pub credentials_path: String,

    /// Keychain service name.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            credentials_path: String::new(),
            keyring_service: default_keyring_service(),
        }
    }
}

impl AuthConfig {
    /// Resolved credentials file path, or `None` when no home directory exists.
    #[must_use]
    pub fn credentials_file(&self) -> Option<PathBuf> {
        if !self.credentials_path.is_empty() {
            return Some(PathBuf::from(&self.credentials_path));
        }
        dirs::home_dir().map(|home| home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_under_home() {
        let config = AuthConfig::default();
        if let Some(path) = config.credentials_file() {
            assert!(path.ends_with(".futureforge/user.json"));
        }
        assert_eq!(config.storage, StorageBackend::Keyring);
        assert_eq!(config.keyring_service, "futureforge-cli");
    }

    #[test]
    fn explicit_path_wins() {
        let config = AuthConfig {
            credentials_path: "/tmp/ff/user.json".into(),
            ..AuthConfig::default()
        };
        assert_eq!(
            config.credentials_file(),
            Some(PathBuf::from("/tmp/ff/user.json"))
        );
    }
}
