use thiserror::Error;

/// The main error type for sf-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// API token error
  #[error("Failed to retrieve API token: {0}")]
  ApiKey(String),

  /// Serialization/Deserialization error
  #[error("Serialization error: {0}")]
  Serde(#[from] serde_json::Error),

  /// API rate limit exceeded
  #[error("Rate limit exceeded: {0}")]
  RateLimit(String),

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// Error reported inside the Lixinger response envelope
  #[error("API error: {0}")]
  Api(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),

  /// The API answered but carried nothing usable for the request
  #[error("No data available for {0}")]
  NoData(String),

  /// Filesystem error while reading a profile
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

/// Result type alias for sf-* crates
pub type Result<T> = std::result::Result<T, Error>;
