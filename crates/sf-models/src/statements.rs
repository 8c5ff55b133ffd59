//! Financial statement models for the `fs/industry` endpoint

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `reportType` value of a full-year report
pub const ANNUAL_REPORT: &str = "annual_report";

/// Request body for historical financial statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementsQuery {
  pub token: String,

  pub start_date: NaiveDate,

  pub end_date: NaiveDate,

  /// Bare exchange codes, e.g. `600519`
  pub stock_codes: Vec<String>,

  /// Dotted metric identifiers such as `h_y.balanceSheet.ar.t`
  pub metrics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
  AnnualReport,
  /// Quarterly, semi-annual or anything unrecognised
  Other,
}

impl ReportType {
  pub fn parse(value: &str) -> Self {
    if value == ANNUAL_REPORT {
      ReportType::AnnualReport
    } else {
      ReportType::Other
    }
  }
}

/// One reporting period of one stock, as returned by the API
///
/// The record is kept as raw JSON because line items are addressed by the
/// dotted metric identifiers from the screening profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportingPeriod {
  pub standard_date: String,

  /// Calendar year parsed from `standard_date`
  pub year: i32,

  pub report_type: ReportType,

  record: Value,
}

impl ReportingPeriod {
  /// Build a period from a raw `data` element.
  ///
  /// Returns `None` when the element has no `standardDate` a year can be read from.
  pub fn from_record(record: &Value) -> Option<Self> {
    let standard_date = record.get("standardDate")?.as_str()?.to_string();
    let year = report_year(&standard_date)?;
    let report_type =
      record.get("reportType").and_then(Value::as_str).map(ReportType::parse).unwrap_or(ReportType::Other);

    Some(Self { standard_date, year, report_type, record: record.clone() })
  }

  pub fn is_annual(&self) -> bool {
    self.report_type == ReportType::AnnualReport
  }

  /// Numeric value at a dotted path, `0.0` on any miss
  pub fn metric(&self, path: &str) -> f64 {
    resolve_path(&self.record, path)
  }
}

/// Resolve a dotted path such as `h_y.balanceSheet.i.t` inside a record.
///
/// Total: a missing segment, a null, a non-object intermediate or a
/// non-numeric leaf all yield `0.0`.
pub fn resolve_path(record: &Value, path: &str) -> f64 {
  path
    .split('.')
    .try_fold(record, |node, segment| node.get(segment))
    .and_then(Value::as_f64)
    .unwrap_or(0.0)
}

/// Calendar year of a `standardDate` value.
///
/// Accepts RFC 3339 timestamps (`2018-12-31T00:00:00+08:00`), plain dates and
/// anything starting with a four digit year.
pub fn report_year(standard_date: &str) -> Option<i32> {
  let text = standard_date.trim();

  if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
    return Some(timestamp.year());
  }

  if let Some(date) =
    text.get(..10).and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
  {
    return Some(date.year());
  }

  text
    .get(..4)
    .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
    .and_then(|prefix| prefix.parse().ok())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_statements_query_serializes_camel_case() {
    let query = StatementsQuery {
      token: "t".to_string(),
      start_date: NaiveDate::from_ymd_opt(2015, 12, 1).unwrap(),
      end_date: NaiveDate::from_ymd_opt(2019, 1, 30).unwrap(),
      stock_codes: vec!["600519".to_string()],
      metrics: vec!["h_y.balanceSheet.ar.t".to_string()],
    };

    let value = serde_json::to_value(&query).unwrap();
    assert_eq!(value["startDate"], "2015-12-01");
    assert_eq!(value["endDate"], "2019-01-30");
    assert_eq!(value["stockCodes"][0], "600519");
    assert_eq!(value["metrics"][0], "h_y.balanceSheet.ar.t");
  }

  #[test]
  fn test_resolve_path_hit() {
    let record = json!({"h_y": {"balanceSheet": {"ar": {"t": 1250.5}}}});
    assert_eq!(resolve_path(&record, "h_y.balanceSheet.ar.t"), 1250.5);
  }

  #[test]
  fn test_resolve_path_misses_default_to_zero() {
    let record = json!({
      "h_y": {
        "balanceSheet": {"ar": {"t": null}, "i": "n/a", "list": [1, 2]},
        "flat": 3
      }
    });

    // absent segment
    assert_eq!(resolve_path(&record, "h_y.cashFlow.ncffoa.t"), 0.0);
    // null leaf
    assert_eq!(resolve_path(&record, "h_y.balanceSheet.ar.t"), 0.0);
    // non-numeric leaf
    assert_eq!(resolve_path(&record, "h_y.balanceSheet.i"), 0.0);
    // non-indexable intermediate
    assert_eq!(resolve_path(&record, "h_y.flat.t"), 0.0);
    assert_eq!(resolve_path(&record, "h_y.balanceSheet.list.t"), 0.0);
    // leaf is an object
    assert_eq!(resolve_path(&record, "h_y.balanceSheet"), 0.0);
  }

  #[test]
  fn test_report_year_formats() {
    assert_eq!(report_year("2018-12-31T00:00:00+08:00"), Some(2018));
    assert_eq!(report_year("2017-12-31"), Some(2017));
    assert_eq!(report_year("2016/12/31"), Some(2016));
    assert_eq!(report_year("Dec 2016"), None);
    assert_eq!(report_year(""), None);
  }

  #[test]
  fn test_reporting_period_from_record() {
    let record = json!({
      "standardDate": "2018-12-31T00:00:00+08:00",
      "reportType": "annual_report",
      "h_y": {"balanceSheet": {"i": {"t": 42}}}
    });

    let period = ReportingPeriod::from_record(&record).unwrap();
    assert_eq!(period.year, 2018);
    assert!(period.is_annual());
    assert_eq!(period.metric("h_y.balanceSheet.i.t"), 42.0);
    assert_eq!(period.metric("h_y.balanceSheet.ar.t"), 0.0);
  }

  #[test]
  fn test_reporting_period_quarterly_and_missing_date() {
    let quarterly = json!({"standardDate": "2018-09-30", "reportType": "q3"});
    let period = ReportingPeriod::from_record(&quarterly).unwrap();
    assert_eq!(period.report_type, ReportType::Other);

    let undated = json!({"reportType": "annual_report"});
    assert!(ReportingPeriod::from_record(&undated).is_none());
  }
}
