use anyhow::Context;
use ff_config::FfConfig;

use crate::cli::GlobalFlags;

/// Read `.env`, load layered config, then apply `--base-url`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FfConfig> {
    load_dotenv()?;

    let mut config = FfConfig::load().context("failed to load configuration")?;
    if let Some(base_url) = &flags.base_url {
        config.api.base_url.clone_from(base_url);
        config
            .validate()
            .with_context(|| format!("invalid --base-url {base_url}"))?;
    }
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
