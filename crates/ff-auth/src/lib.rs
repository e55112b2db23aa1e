//! # ff-auth
//!
//! Client-side authentication state for FutureForge.
//!
//! Provides the persisted user record (`keyring` with file fallback), a pure
//! reducer over `LOGIN` / `LOGOUT` / `UPDATE_USER`, the shared [`AuthContext`]
//! service the HTTP client reads tokens from, route guarding, and best-effort
//! JWT expiry decoding.

pub mod context;
pub mod error;
pub mod expiry;
pub mod guard;
pub mod reducer;
pub mod store;

use std::sync::Arc;

pub use context::AuthContext;
pub use error::AuthError;
pub use guard::guard;
pub use reducer::{AuthAction, AuthState, reduce};
pub use store::{FileUserStore, KeyringUserStore, MemoryUserStore, UserStore};

use ff_config::{AuthConfig, StorageBackend};

/// Build the user store selected by configuration.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if no credentials path can be resolved.
pub fn open_store(config: &AuthConfig) -> Result<Arc<dyn UserStore>, AuthError> {
    let path = config.credentials_file().ok_or_else(|| {
        AuthError::TokenStoreError("home directory not found; cannot store credentials".into())
    })?;
    let file = FileUserStore::new(path);
    Ok(match config.storage {
        StorageBackend::Keyring => Arc::new(KeyringUserStore::new(&config.keyring_service, file)),
        StorageBackend::File => Arc::new(file),
    })
}
