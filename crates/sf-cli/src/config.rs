use anyhow::{Context, Result};
use sf_core::{Config as CoreConfig, ScreenProfile};
use std::path::Path;
use tracing::info;

/// Settings shared by the commands that talk to Lixinger
#[derive(Debug, Clone)]
pub struct Config {
  pub api_config: CoreConfig,
}

impl Config {
  pub fn from_env() -> Result<Self> {
    let api_config =
      CoreConfig::from_env().context("Lixinger configuration (set API_TOKEN in the environment or .env)")?;
    Ok(Self { api_config })
  }
}

/// The profile at `path`, or the built-in default
pub fn load_profile(path: Option<&Path>) -> Result<ScreenProfile> {
  match path {
    Some(path) => {
      let profile = ScreenProfile::from_path(path)
        .with_context(|| format!("Failed to load profile {}", path.display()))?;
      info!("Using screening profile {}", path.display());
      Ok(profile)
    }
    None => Ok(ScreenProfile::default()),
  }
}
