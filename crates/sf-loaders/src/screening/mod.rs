//! Metric extraction and screening rules

pub mod metrics;
pub mod rules;

pub use metrics::{MetricExtractor, MetricSeries, annual_periods};
pub use rules::{DeltaSeries, ScreeningVerdict};
