//! # sf-core
//!
//! Shared configuration, screening profile and error types for the
//! stockfilter workspace.

pub mod config;
pub mod error;
pub mod profile;

pub use config::Config;
pub use error::{Error, Result};
pub use profile::{MetricSet, ScreenProfile, StatementWindow, ValuationRule};

/// The Lixinger Open API endpoints used by the screener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  /// Historical financial statements for non-financial A-share companies
  FsIndustry,

  /// Daily valuation figures (PE/PB and their historical percentile ranks)
  Fundamental,
}

impl Endpoint {
  /// Path of the endpoint relative to the API base URL
  pub fn path(&self) -> &'static str {
    match self {
      Endpoint::FsIndustry => "a/stock/fs/industry",
      Endpoint::Fundamental => "a/stock/fundamental",
    }
  }
}

impl std::fmt::Display for Endpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.path())
  }
}

/// Base URL for the Lixinger Open API
pub const LIXINGER_BASE_URL: &str = "https://open.lixinger.com/api";

/// Default request budget (requests per minute)
pub const DEFAULT_RATE_LIMIT: u32 = 60;

/// `code` value of a successful response envelope
pub const API_SUCCESS_CODE: i64 = 1;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_paths() {
    assert_eq!(Endpoint::FsIndustry.to_string(), "a/stock/fs/industry");
    assert_eq!(Endpoint::Fundamental.path(), "a/stock/fundamental");
  }
}
