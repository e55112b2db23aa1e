//! # ff-config
//!
//! Layered configuration loading for FutureForge using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FUTUREFORGE_*` prefix, `__` as separator)
//! 2. Project-level `.futureforge/config.toml`
//! 3. User-level `~/.config/futureforge/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FUTUREFORGE_API__BASE_URL` -> `api.base_url`,
//! `FUTUREFORGE_AUTH__STORAGE` -> `auth.storage`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ff_config::FfConfig;
//!
//! let config = FfConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.base_url);
//! ```

mod api;
mod auth;
mod error;
mod general;

pub use api::{ApiConfig, DEFAULT_BASE_URL};
pub use auth::{AuthConfig, StorageBackend};
pub use error::ConfigError;
pub use general::{GeneralConfig, MIN_COMPLETION_STEP};

use ff_core::Route;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "FUTUREFORGE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FfConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FfConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".futureforge/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would make the client misbehave at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.general.completion_tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.completion_tick_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if !(MIN_COMPLETION_STEP..=100.0).contains(&self.general.completion_step) {
            return Err(ConfigError::InvalidValue {
                field: "general.completion_step".into(),
                reason: format!(
                    "{} is outside [{MIN_COMPLETION_STEP}, 100]",
                    self.general.completion_step
                ),
            });
        }
        if Route::from_path(&self.general.redirect_after_submit) == Route::NotFound {
            return Err(ConfigError::InvalidValue {
                field: "general.redirect_after_submit".into(),
                reason: format!("{} is not a known route", self.general.redirect_after_submit),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("futureforge").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FfConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.auth.storage, StorageBackend::Keyring);
    }

    #[test]
    fn zero_step_is_rejected() {
        let mut config = FfConfig::default();
        config.general.completion_step = 0.0;
        let err = config.validate().expect_err("zero step");
        assert!(err.to_string().contains("general.completion_step"));
    }

    #[test]
    fn vanishing_step_is_rejected() {
        let mut config = FfConfig::default();
        config.general.completion_step = 1e-12;
        let err = config.validate().expect_err("tiny step");
        assert!(err.to_string().contains("general.completion_step"));
    }

    #[test]
    fn smallest_allowed_step_is_valid() {
        let mut config = FfConfig::default();
        config.general.completion_step = MIN_COMPLETION_STEP;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_redirect_is_rejected() {
        let mut config = FfConfig::default();
        config.general.redirect_after_submit = "/dashbord".into();
        let err = config.validate().expect_err("unknown route");
        assert!(err.to_string().contains("general.redirect_after_submit"));
    }

    #[test]
    fn known_redirect_is_accepted() {
        let mut config = FfConfig::default();
        config.general.redirect_after_submit = "/recommendations".into();
        assert!(config.validate().is_ok());
    }
}
