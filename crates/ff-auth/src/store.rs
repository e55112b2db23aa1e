//! Persistence for the single user record whose presence means "logged in".

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use ff_core::UserRecord;

use crate::error::AuthError;

const KEYRING_USER: &str = "user-record";

/// Read-only env tier: a bare token with an empty profile.
pub const TOKEN_ENV_VAR: &str = "FUTUREFORGE_AUTH__TOKEN";

/// Storage for the persisted user record.
pub trait UserStore: Send + Sync {
    /// Load the stored record, if any.
    fn load(&self) -> Result<Option<UserRecord>, AuthError>;

    /// Replace the stored record.
    fn save(&self, record: &UserRecord) -> Result<(), AuthError>;

    /// Remove the stored record. Removing a missing record is not an error.
    fn clear(&self) -> Result<(), AuthError>;

    /// Human-readable name of the tier the current record came from.
    fn source(&self) -> Option<String> {
        self.load().ok().flatten().map(|_| String::from("store"))
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// JSON file with owner-only permissions.
#[derive(Debug, Clone)]
pub struct FileUserStore {
    path: PathBuf,
}

impl FileUserStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserStore for FileUserStore {
    fn load(&self) -> Result<Option<UserRecord>, AuthError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(AuthError::TokenStoreError(format!(
                    "read {}: {error}",
                    self.path.display()
                )));
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content).map(Some).map_err(|e| {
            AuthError::TokenStoreError(format!("parse {}: {e}", self.path.display()))
        })
    }

    fn save(&self, record: &UserRecord) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize user record: {e}")))?;
        fs::write(&self.path, json).map_err(|e| {
            AuthError::TokenStoreError(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AuthError::TokenStoreError(format!(
                    "failed to delete {}: {e}",
                    self.path.display()
                ))
            })?;
        }
        Ok(())
    }

    fn source(&self) -> Option<String> {
        self.load().ok().flatten().map(|_| String::from("file"))
    }
}

// ---------------------------------------------------------------------------
// Keyring
// ---------------------------------------------------------------------------

/// OS keychain storage. Falls back to the file store when the keychain is
/// unavailable. Load priority: keyring → `FUTUREFORGE_AUTH__TOKEN` → file.
#[derive(Debug, Clone)]
pub struct KeyringUserStore {
    service: String,
    fallback: FileUserStore,
}

impl KeyringUserStore {
    #[must_use]
    pub fn new(service: &str, fallback: FileUserStore) -> Self {
        Self {
            service: service.to_string(),
            fallback,
        }
    }

    fn entry(&self) -> Result<keyring::Entry, AuthError> {
        keyring::Entry::new(&self.service, KEYRING_USER)
            .map_err(|e| AuthError::KeyringError(e.to_string()))
    }

    fn load_keyring(&self) -> Option<UserRecord> {
        let json = self.entry().ok()?.get_password().ok()?;
        match serde_json::from_str(&json) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!(%error, "ignoring unreadable keyring user record");
                None
            }
        }
    }
}

fn load_env_token() -> Option<UserRecord> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .filter(|token| !token.is_empty())
        .map(|token| UserRecord {
            token,
            user: ff_core::UserProfile::default(),
        })
}

impl UserStore for KeyringUserStore {
    fn load(&self) -> Result<Option<UserRecord>, AuthError> {
        // 1. Keyring
        if let Some(record) = self.load_keyring() {
            return Ok(Some(record));
        }

        // 2. Environment variable
        if let Some(record) = load_env_token() {
            return Ok(Some(record));
        }

        // 3. File fallback
        self.fallback.load()
    }

    fn save(&self, record: &UserRecord) -> Result<(), AuthError> {
        let json = serde_json::to_string(record)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize user record: {e}")))?;
        match self.entry() {
            Ok(entry) => match entry.set_password(&json) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.fallback.save(record)
                }
            },
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; falling back to file");
                self.fallback.save(record)
            }
        }
    }

    fn clear(&self) -> Result<(), AuthError> {
        // Ignore keyring errors; the entry may not exist.
        if let Ok(entry) = self.entry() {
            let _ = entry.delete_credential();
        }
        self.fallback.clear()
    }

    fn source(&self) -> Option<String> {
        if self.load_keyring().is_some() {
            return Some("keyring".into());
        }
        if load_env_token().is_some() {
            return Some("env".into());
        }
        self.fallback.source()
    }
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// In-process store. Counts `clear` calls so callers can assert on them.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    record: Mutex<Option<UserRecord>>,
    clears: Mutex<usize>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn with_record(record: UserRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            clears: Mutex::new(0),
        }
    }

    #[must_use]
    pub fn clear_count(&self) -> usize {
        *self.clears.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserStore for MemoryUserStore {
    fn load(&self) -> Result<Option<UserRecord>, AuthError> {
        Ok(self
            .record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, record: &UserRecord) -> Result<(), AuthError> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = None;
        *self.clears.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }

    fn source(&self) -> Option<String> {
        self.load().ok().flatten().map(|_| String::from("memory"))
    }
}

#[cfg(test)]
mod tests {
    use ff_core::UserProfile;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            token: "test_jwt_abc123".into(),
            user: UserProfile {
                username: Some("alex".into()),
                ..UserProfile::default()
            },
        }
    }

    #[test]
    fn file_store_save_load_clear_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileUserStore::new(tmp.path().join("nested").join("user.json"));

        assert!(store.load().expect("load").is_none());
        store.save(&record()).expect("save");
        assert_eq!(store.load().expect("load"), Some(record()));
        assert_eq!(store.source().as_deref(), Some("file"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(store.path())
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }

        store.clear().expect("clear");
        assert!(!store.path().exists());
        store.clear().expect("clearing twice is fine");
    }

    #[test]
    fn file_store_ignores_whitespace_only_content() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("user.json");
        std::fs::write(&path, "   \n  ").expect("write");
        assert!(FileUserStore::new(path).load().expect("load").is_none());
    }

    #[test]
    fn file_store_reports_corrupt_content() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("user.json");
        std::fs::write(&path, "{not json").expect("write");
        let err = FileUserStore::new(path).load().expect_err("corrupt");
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn memory_store_counts_clears() {
        let store = MemoryUserStore::with_record(record());
        store.clear().expect("clear");
        store.clear().expect("clear");
        assert_eq!(store.clear_count(), 2);
        assert!(store.load().expect("load").is_none());
    }
}
