//! Configuration management for the Lixinger client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Main configuration struct for the Lixinger client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// Lixinger Open API token
  pub api_token: String,

  /// API rate limit (requests per minute)
  pub rate_limit: u32,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Maximum retries for failed requests
  pub max_retries: u32,

  /// Base URL for the Lixinger Open API
  pub base_url: String,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let api_token =
      env::var("API_TOKEN").map_err(|_| Error::ApiKey("API_TOKEN not set".to_string()))?;

    let rate_limit = env::var("SF_RATE_LIMIT")
      .unwrap_or_else(|_| crate::DEFAULT_RATE_LIMIT.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid SF_RATE_LIMIT".to_string()))?;

    let timeout_secs = env::var("SF_TIMEOUT_SECS")
      .unwrap_or_else(|_| "30".to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid SF_TIMEOUT_SECS".to_string()))?;

    let max_retries = env::var("SF_MAX_RETRIES")
      .unwrap_or_else(|_| "3".to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid SF_MAX_RETRIES".to_string()))?;

    let base_url = env::var("SF_BASE_URL").unwrap_or_else(|_| crate::LIXINGER_BASE_URL.to_string());

    Ok(Config { api_token, rate_limit, timeout_secs, max_retries, base_url })
  }

  /// Create a config with default values (for testing)
  pub fn default_with_token(api_token: String) -> Self {
    Config {
      api_token,
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      timeout_secs: 30,
      max_retries: 3,
      base_url: crate::LIXINGER_BASE_URL.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_from_env() {
    env::set_var("API_TOKEN", "test_token");
    let config = Config::from_env().unwrap();
    assert_eq!(config.api_token, "test_token");
    assert_eq!(config.rate_limit, 60);
    assert_eq!(config.max_retries, 3);
  }

  #[test]
  fn test_default_with_token() {
    let config = Config::default_with_token("abc".to_string());
    assert_eq!(config.api_token, "abc");
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.base_url, "https://open.lixinger.com/api");
  }
}
