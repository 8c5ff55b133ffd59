//! Versioned screening profile
//!
//! The metric identifiers, increment-rate column titles and the financial
//! statement window all go stale when a new fiscal period is published. They
//! live in a JSON document so an operator can roll them forward without a
//! rebuild. The built-in defaults match the 2019 Q3 snapshot layout.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current profile document version
pub const PROFILE_VERSION: u32 = 1;

/// Everything about a screening run that changes with the reporting calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenProfile {
  /// Document version, must equal [`PROFILE_VERSION`]
  pub version: u32,

  /// Date range requested from the financial statement endpoint
  pub statement_window: StatementWindow,

  /// Dotted metric identifiers for the six tracked line items
  pub metrics: MetricSet,

  /// Increment-rate column titles from the HTML snapshot
  pub increment_rate_columns: Vec<String>,

  /// Valuation percentile metrics, thresholds and output column titles
  pub valuation: ValuationRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementWindow {
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
}

/// Dotted paths of the six line items, also sent as the API metric list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSet {
  /// Operating income
  pub earnings: String,
  /// Accounts receivable
  pub receivables: String,
  pub inventory: String,
  /// Total current assets over total current liabilities
  pub current_ratio: String,
  pub free_cash_flow: String,
  /// Net cash flow from operating activities
  pub operating_cash_flow: String,
}

impl MetricSet {
  /// Identifiers in request order
  pub fn identifiers(&self) -> Vec<String> {
    vec![
      self.earnings.clone(),
      self.receivables.clone(),
      self.inventory.clone(),
      self.current_ratio.clone(),
      self.free_cash_flow.clone(),
      self.operating_cash_flow.clone(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRule {
  /// PE-TTM (excluding non-recurring items) 10-year percentile metric
  pub pe_metric: String,
  /// PB (excluding goodwill) 10-year percentile metric
  pub pb_metric: String,
  /// Upper bound, inclusive, on the PE percentile scaled to 0-100
  pub max_pe_percentile: f64,
  /// Upper bound, inclusive, on the PB percentile scaled to 0-100
  pub max_pb_percentile: f64,
  pub pe_column: String,
  pub pb_column: String,
}

impl Default for ScreenProfile {
  fn default() -> Self {
    Self {
      version: PROFILE_VERSION,
      statement_window: StatementWindow {
        start_date: NaiveDate::from_ymd_opt(2015, 12, 1).unwrap_or_default(),
        end_date: NaiveDate::from_ymd_opt(2019, 1, 30).unwrap_or_default(),
      },
      metrics: MetricSet {
        earnings: "h_y.profitStatement.oi.t".to_string(),
        receivables: "h_y.balanceSheet.ar.t".to_string(),
        inventory: "h_y.balanceSheet.i.t".to_string(),
        current_ratio: "h_y.balanceSheet.tca_tcl_r.t".to_string(),
        free_cash_flow: "h_y.metrics.fcf.t".to_string(),
        operating_cash_flow: "h_y.cashFlow.ncffoa.t".to_string(),
      },
      increment_rate_columns: vec![
        "净利润同比增长率(%)2019.09.30".to_string(),
        "净利润同比增长率(%)2018.12.31".to_string(),
        "营业收入(同比增长率)(%)2019.09.30".to_string(),
        "营业收入(同比增长率)(%)2018.12.31".to_string(),
      ],
      valuation: ValuationRule {
        pe_metric: "d_pe_ttm_pos10".to_string(),
        pb_metric: "pb_wo_gw_pos10".to_string(),
        max_pe_percentile: 50.0,
        max_pb_percentile: 50.0,
        pe_column: "PE-TTM(扣非)分位点(10年)".to_string(),
        pb_column: "PB(不含商誉)分位点(10年)".to_string(),
      },
    }
  }
}

impl ScreenProfile {
  /// Load and validate a profile document
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
    let text = fs::read_to_string(path.as_ref())?;
    Self::from_json(&text)
  }

  pub fn from_json(text: &str) -> Result<Self> {
    let profile: ScreenProfile = serde_json::from_str(text)?;
    profile.validate()?;
    Ok(profile)
  }

  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Reject documents the pipeline cannot run with
  pub fn validate(&self) -> Result<()> {
    if self.version != PROFILE_VERSION {
      return Err(Error::Config(format!(
        "Unsupported profile version {} (expected {})",
        self.version, PROFILE_VERSION
      )));
    }

    if self.statement_window.start_date > self.statement_window.end_date {
      return Err(Error::Config(format!(
        "Statement window starts after it ends: {} > {}",
        self.statement_window.start_date, self.statement_window.end_date
      )));
    }

    if self.metrics.identifiers().iter().any(|m| m.trim().is_empty()) {
      return Err(Error::Config("Metric identifiers must not be empty".to_string()));
    }

    if self.increment_rate_columns.is_empty()
      || self.increment_rate_columns.iter().any(|c| c.trim().is_empty())
    {
      return Err(Error::Config("At least one non-empty increment-rate column is required".to_string()));
    }

    let valuation = &self.valuation;
    if !valuation.max_pe_percentile.is_finite() || !valuation.max_pb_percentile.is_finite() {
      return Err(Error::Config("Valuation thresholds must be finite".to_string()));
    }

    if valuation.pe_metric.trim().is_empty() || valuation.pb_metric.trim().is_empty() {
      return Err(Error::Config("Valuation metric identifiers must not be empty".to_string()));
    }

    Ok(())
  }
}
