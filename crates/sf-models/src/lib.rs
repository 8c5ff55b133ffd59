//! # sf-models
//!
//! Data models for the Lixinger Open API and the screening tables.
//!
//! ## Usage
//!
//! ```ignore
//! use sf_models::statements::ReportingPeriod;
//! use sf_models::valuation::ValuationResponse;
//!
//! let period = ReportingPeriod::from_record(&record);
//! let valuation: ValuationResponse = serde_json::from_str(&response_json)?;
//! ```

#![warn(clippy::all)]

pub mod common;
pub mod statements;
pub mod table;
pub mod valuation;

// Re-export common types for convenience
pub use common::*;

// Re-export all model types
pub use statements::*;
pub use table::*;
pub use valuation::*;
