//! # sf-loaders
//!
//! The screening pipeline on top of `sf-client`.
//!
//! This crate provides:
//! - Candidate rows from an HTML snapshot table
//! - The increment-rate pre-filter
//! - Metric extraction and the year-over-year screening rules
//! - The PE/PB percentile valuation filter
//! - Ordered, bounded fan-out and stage tracking
//! - CSV shortlist output

pub mod batch_processor;
pub mod error;
pub mod html_table;
pub mod increment_filter;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod process_tracker;
pub mod screening;
pub mod screening_loader;
pub mod source;
pub mod valuation_loader;

// Re-export commonly used types
pub use batch_processor::{BatchConfig, BatchProcessor, BatchResult};
pub use error::{LoaderError, LoaderResult};
pub use html_table::HtmlTableReader;
pub use loader::{DataLoader, LoaderConfig, LoaderContext};
pub use pipeline::{ScreenSummary, screen_rows, screen_snapshot};
pub use process_tracker::{ProcessInfo, ProcessState, ProcessTracker};
pub use source::FundamentalsSource;

// Re-export loaders
pub use screening_loader::{
  ScreeningLoader, ScreeningLoaderInput, ScreeningLoaderOutput, StockReport, screen_stock,
};
pub use valuation_loader::{
  Percentiles, ValuationLoader, ValuationLoaderInput, ValuationLoaderOutput, as_of_date,
  fetch_percentiles,
};

// Prelude for convenient imports
pub mod prelude {
  pub use crate::{
    BatchConfig, BatchProcessor, DataLoader, FundamentalsSource, LoaderConfig, LoaderContext,
    LoaderError, LoaderResult, ProcessState, ProcessTracker,
  };
}
