//! Valuation models for the `fundamental` endpoint

use crate::common::ApiEnvelope;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for daily valuation figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationQuery {
  pub token: String,

  /// Trading date the figures are requested for
  pub date: NaiveDate,

  pub stock_codes: Vec<String>,

  /// Metric names such as `d_pe_ttm_pos10`
  pub metrics: Vec<String>,
}

/// One stock's valuation figures on one date
///
/// Metric names are chosen by the screening profile, so the figures are kept
/// in a map rather than fixed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRecord {
  #[serde(default)]
  pub date: Option<String>,

  #[serde(default)]
  pub stock_code: Option<String>,

  #[serde(flatten)]
  pub metrics: Map<String, Value>,
}

impl ValuationRecord {
  /// Numeric metric value; numeric strings are accepted as well
  pub fn metric(&self, name: &str) -> Option<f64> {
    match self.metrics.get(name)? {
      Value::Number(n) => n.as_f64(),
      Value::String(s) => s.trim().parse().ok(),
      _ => None,
    }
  }
}

pub type ValuationResponse = ApiEnvelope<Vec<ValuationRecord>>;
