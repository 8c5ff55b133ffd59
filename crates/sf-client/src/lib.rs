//! # sf-client
//!
//! A Lixinger Open API client for the two endpoints the screener needs.
//!
//! ## Features
//!
//! - **Async/Await**: Built on tokio and reqwest
//! - **Rate Limiting**: A process-wide governor quota shared by all endpoints
//! - **Retries**: Exponential backoff on network and HTTP status failures
//! - **Configurable**: Environment-based configuration via sf-core
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sf_client::LixingerClient;
//! use sf_core::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = LixingerClient::new(config)?;
//!
//!     let date = chrono::NaiveDate::from_ymd_opt(2020, 1, 3).unwrap();
//!     let metrics = vec!["d_pe_ttm_pos10".to_string(), "pb_wo_gw_pos10".to_string()];
//!     let record = client.valuation().fundamental("000651", date, &metrics).await?;
//!     println!("PE percentile: {:?}", record.metric("d_pe_ttm_pos10"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, sf_core::Error>`.

#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod transport;

// Re-export the main client and common types
pub use client::LixingerClient;
pub use sf_core::{Config, Error, Result};

pub use endpoints::{statements::StatementEndpoints, valuation::ValuationEndpoints};
