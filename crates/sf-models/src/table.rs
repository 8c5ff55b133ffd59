//! Screening table rows

use serde::{Deserialize, Serialize};

pub const CODE_COLUMN: &str = "股票代码";
pub const NAME_COLUMN: &str = "股票简称";
pub const PRICE_COLUMN: &str = "现价(元)";
pub const CHANGE_COLUMN: &str = "涨跌幅(%)";
pub const LISTING_DATE_COLUMN: &str = "上市日期";
pub const INDUSTRY_COLUMN: &str = "所属同花顺行业";

/// Snapshot columns every run needs, in output order.
/// The increment-rate columns come from the screening profile and follow these.
pub const BASE_COLUMNS: [&str; 6] =
  [CODE_COLUMN, NAME_COLUMN, PRICE_COLUMN, CHANGE_COLUMN, LISTING_DATE_COLUMN, INDUSTRY_COLUMN];

/// Strip an exchange suffix: `600519.SH` becomes `600519`
pub fn api_code(code: &str) -> &str {
  code.split('.').next().unwrap_or(code).trim()
}

/// One stock from the HTML snapshot
///
/// Cells are kept as the snapshot spelled them; the row is only ever kept
/// or dropped, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRow {
  /// Exchange code, possibly suffixed (`600519.SH`)
  pub code: String,
  pub name: String,
  pub price: String,
  pub change_pct: String,
  pub listed_on: String,
  pub industry: String,
  /// Increment-rate percentages, aligned with the profile's column list
  pub increment_rates: Vec<String>,
}

impl CandidateRow {
  /// Code as the API expects it, without the exchange suffix
  pub fn api_code(&self) -> &str {
    api_code(&self.code)
  }

  /// Cells in output column order
  pub fn cells(&self) -> Vec<String> {
    let mut cells = vec![
      self.code.clone(),
      self.name.clone(),
      self.price.clone(),
      self.change_pct.clone(),
      self.listed_on.clone(),
      self.industry.clone(),
    ];
    cells.extend(self.increment_rates.iter().cloned());
    cells
  }
}

/// A candidate that passed the valuation filter, with its two percentile columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedCandidate {
  pub row: CandidateRow,
  /// PE percentile scaled to 0-100
  pub pe_percentile: f64,
  /// PB percentile scaled to 0-100
  pub pb_percentile: f64,
}

impl ValuedCandidate {
  pub fn cells(&self) -> Vec<String> {
    let mut cells = self.row.cells();
    cells.push(format!("{:.2}", self.pe_percentile));
    cells.push(format!("{:.2}", self.pb_percentile));
    cells
  }
}
