//! HTTP transport layer for Lixinger API requests

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use sf_core::{API_SUCCESS_CODE, Config, Endpoint, Error, Result};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Upper bound on retries, whatever the configuration asks for
const MAX_RETRIES: u32 = 10;

/// Longest wait between two attempts
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// HTTP transport layer for making requests to the Lixinger API
pub struct Transport {
  client: Client,
  base_url: String,
  api_token: String,
  timeout: Duration,
  max_retries: u32,
}

impl Transport {
  /// Create a new transport instance
  pub fn new(config: &Config) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent("sf-client/0.1.0")
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.base_url.clone(),
      api_token: config.api_token.clone(),
      timeout: Duration::from_secs(config.timeout_secs),
      max_retries: config.max_retries.min(MAX_RETRIES),
    })
  }

  /// Create a mock transport for testing
  #[cfg(test)]
  pub fn new_mock() -> Self {
    Self {
      client: Client::new(),
      base_url: "https://mock.lixinger.com/api".to_string(),
      api_token: "test_token".to_string(),
      timeout: Duration::from_secs(30),
      max_retries: 3,
    }
  }

  /// Token placed in every request body
  pub fn api_token(&self) -> &str {
    &self.api_token
  }

  /// POST a JSON body to a Lixinger endpoint
  ///
  /// Network failures and non-2xx statuses are retried with exponential
  /// backoff. An error envelope (`code != 1`) or an undecodable body is
  /// returned immediately.
  #[instrument(skip(self, body), fields(endpoint = %endpoint))]
  pub async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let url = self.build_url(endpoint)?;
    debug!("Making request to: {}", url);

    let mut attempt = 0;
    let mut last_error = None;

    while attempt <= self.max_retries {
      if attempt > 0 {
        let delay = backoff_delay(attempt);
        warn!("Retrying request in {}ms (attempt {})", delay.as_millis(), attempt + 1);
        tokio::time::sleep(delay).await;
      }

      match self.make_request(&url, body).await {
        Ok(response) => {
          let text = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

          debug!("Response body length: {} bytes", text.len());

          self.check_api_error(&text)?;

          return match serde_json::from_str::<T>(&text) {
            Ok(data) => {
              info!("Successfully parsed response for endpoint: {}", endpoint);
              Ok(data)
            }
            Err(e) => {
              error!("Failed to parse JSON response: {}", e);
              Err(Error::Parse(format!(
                "Failed to parse response: {}. Response: {}",
                e,
                preview(&text, 200)
              )))
            }
          };
        }
        Err(e) => {
          warn!("Request failed (attempt {}): {}", attempt + 1, e);
          last_error = Some(e);
          attempt += 1;
        }
      }
    }

    Err(last_error.unwrap_or_else(|| Error::Http("Max retries exceeded".to_string())))
  }

  /// Build the full URL for an endpoint
  fn build_url(&self, endpoint: Endpoint) -> Result<Url> {
    let base = format!("{}/", self.base_url.trim_end_matches('/'));
    Url::parse(&base)
      .and_then(|url| url.join(endpoint.path()))
      .map_err(|e| Error::Http(format!("Invalid base URL: {}", e)))
  }

  /// Make the actual HTTP request
  async fn make_request<B>(&self, url: &Url, body: &B) -> Result<Response>
  where
    B: Serialize + ?Sized,
  {
    let response = self
      .client
      .post(url.clone())
      .json(body)
      .send()
      .await
      .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    let status = response.status();

    if status.is_success() {
      debug!("Request successful with status: {}", status);
      Ok(response)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
      warn!("Rate limited by server");
      Err(Error::RateLimit(format!("HTTP {}", status)))
    } else {
      error!("Request failed with status: {}", status);
      Err(Error::Http(format!("HTTP error: {}", status)))
    }
  }

  /// Check the Lixinger response envelope for an error code
  fn check_api_error(&self, response_text: &str) -> Result<()> {
    let envelope: Value = serde_json::from_str(response_text).map_err(|e| {
      Error::Parse(format!("Response is not JSON: {}. Response: {}", e, preview(response_text, 200)))
    })?;

    match envelope.get("code").and_then(Value::as_i64) {
      Some(code) if code != API_SUCCESS_CODE => {
        let message =
          envelope.get("message").and_then(Value::as_str).unwrap_or("unknown error").to_string();
        Err(Error::Api(format!("code {}: {}", code, message)))
      }
      _ => Ok(()),
    }
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}

impl std::fmt::Debug for Transport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Transport")
      .field("base_url", &self.base_url)
      .field("timeout", &self.timeout)
      .field("max_retries", &self.max_retries)
      .finish()
  }
}

/// Exponential backoff from 1s, capped at [`MAX_BACKOFF`]
fn backoff_delay(attempt: u32) -> Duration {
  let millis = 2_u64.saturating_pow(attempt).saturating_mul(500);
  Duration::from_millis(millis).min(MAX_BACKOFF)
}

fn preview(text: &str, max_chars: usize) -> String {
  text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_build_url() {
    let transport = Transport::new_mock();

    let url = transport.build_url(Endpoint::FsIndustry).unwrap();
    assert_eq!(url.as_str(), "https://mock.lixinger.com/api/a/stock/fs/industry");

    let url = transport.build_url(Endpoint::Fundamental).unwrap();
    assert_eq!(url.as_str(), "https://mock.lixinger.com/api/a/stock/fundamental");
  }

  #[test]
  fn test_build_url_trailing_slash() {
    let mut transport = Transport::new_mock();
    transport.base_url = "http://127.0.0.1:9999/api/".to_string();

    let url = transport.build_url(Endpoint::Fundamental).unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:9999/api/a/stock/fundamental");
  }

  #[test]
  fn test_check_api_error_code() {
    let transport = Transport::new_mock();
    let response = r#"{"code": 0, "message": "Illegal token."}"#;

    match transport.check_api_error(response) {
      Err(Error::Api(msg)) => assert!(msg.contains("Illegal token.")),
      other => panic!("Expected Api error, got {:?}", other),
    }
  }

  #[test]
  fn test_check_api_error_not_json() {
    let transport = Transport::new_mock();
    let result = transport.check_api_error("<html>502 Bad Gateway</html>");
    assert!(matches!(result, Err(Error::Parse(_))));
  }

  #[test]
  fn test_check_api_error_success() {
    let transport = Transport::new_mock();
    let response = r#"{"code": 1, "message": "success", "data": []}"#;
    assert!(transport.check_api_error(response).is_ok());
  }

  #[test]
  fn test_preview_respects_char_boundaries() {
    assert_eq!(preview("营业收入", 2), "营业");
  }

  #[test]
  fn test_backoff_delay_is_capped() {
    assert_eq!(backoff_delay(1), Duration::from_millis(1000));
    assert_eq!(backoff_delay(3), Duration::from_millis(4000));
    assert_eq!(backoff_delay(64), MAX_BACKOFF);
    assert_eq!(backoff_delay(u32::MAX), MAX_BACKOFF);
  }

  #[test]
  fn test_max_retries_is_capped() {
    let mut config = Config::default_with_token("test_token".to_string());
    config.max_retries = 64;

    let transport = Transport::new(&config).unwrap();
    assert_eq!(transport.max_retries, MAX_RETRIES);
  }
}
