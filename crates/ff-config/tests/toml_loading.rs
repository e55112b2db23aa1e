//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use ff_config::{FfConfig, StorageBackend};
use pretty_assertions::assert_eq;

#[test]
fn loads_api_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://api.futureforge.dev"
timeout_ms = 2500
"#,
        )?;

        let config: FfConfig = Figment::from(Serialized::defaults(FfConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://api.futureforge.dev");
        assert_eq!(config.api.timeout_ms, 2500);
        Ok(())
    });
}

#[test]
fn loads_auth_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[auth]
storage = "file"
credentials_path = "./creds/user.json"
"#,
        )?;

        let config: FfConfig = Figment::from(Serialized::defaults(FfConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.auth.storage, StorageBackend::File);
        assert_eq!(config.auth.credentials_path, "./creds/user.json");
        assert_eq!(config.auth.keyring_service, "futureforge-cli");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".futureforge")?;
        jail.create_file(
            ".futureforge/config.toml",
            r#"
[general]
completion_tick_ms = 20
completion_step = 10.0
"#,
        )?;

        let config = FfConfig::load().expect("config loads");
        assert_eq!(config.general.completion_tick_ms, 20);
        assert!((config.general.completion_step - 10.0).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn invalid_base_url_fails_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".futureforge")?;
        jail.create_file(
            ".futureforge/config.toml",
            r#"
[api]
base_url = "ftp://nope"
"#,
        )?;

        let err = FfConfig::load().expect_err("should reject");
        assert!(err.to_string().contains("api.base_url"));
        Ok(())
    });
}
