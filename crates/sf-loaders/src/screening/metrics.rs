//! Annual metric series from a raw `fs/industry` response

use serde::Serialize;
use serde_json::Value;
use sf_core::MetricSet;
use sf_models::statements::ReportingPeriod;
use tracing::debug;

/// Six line items per annual report, oldest report first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSeries {
  /// Report year of each position
  pub years: Vec<i32>,
  pub earnings: Vec<f64>,
  pub receivables: Vec<f64>,
  pub inventory: Vec<f64>,
  pub current_ratio: Vec<f64>,
  pub free_cash_flow: Vec<f64>,
  pub operating_cash_flow: Vec<f64>,
}

impl MetricSeries {
  pub fn len(&self) -> usize {
    self.years.len()
  }

  pub fn is_empty(&self) -> bool {
    self.years.is_empty()
  }
}

/// Pulls the profile's metric paths out of statement responses
#[derive(Debug, Clone)]
pub struct MetricExtractor {
  metrics: MetricSet,
}

impl MetricExtractor {
  pub fn new(metrics: MetricSet) -> Self {
    Self { metrics }
  }

  /// Build the series for one stock.
  ///
  /// Never fails: a body without a usable `data` array gives empty series,
  /// and any unresolvable line item is `0.0`.
  pub fn extract(&self, body: &Value) -> MetricSeries {
    let periods = annual_periods(body);
    let m = &self.metrics;

    let mut series = MetricSeries::default();
    for period in &periods {
      series.years.push(period.year);
      series.earnings.push(period.metric(&m.earnings));
      series.receivables.push(period.metric(&m.receivables));
      series.inventory.push(period.metric(&m.inventory));
      series.current_ratio.push(period.metric(&m.current_ratio));
      series.free_cash_flow.push(period.metric(&m.free_cash_flow));
      series.operating_cash_flow.push(period.metric(&m.operating_cash_flow));
    }

    series
  }
}

/// Annual reports in `body.data`, sorted ascending by report year
pub fn annual_periods(body: &Value) -> Vec<ReportingPeriod> {
  let Some(records) = body.get("data").and_then(Value::as_array) else {
    return Vec::new();
  };

  let mut periods: Vec<ReportingPeriod> = records
    .iter()
    .filter_map(|record| {
      let period = ReportingPeriod::from_record(record);
      if period.is_none() {
        debug!("Dropping record without a readable standardDate: {}", record);
      }
      period
    })
    .filter(ReportingPeriod::is_annual)
    .collect();

  periods.sort_by_key(|p| p.year);
  periods
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use sf_core::ScreenProfile;

  fn extractor() -> MetricExtractor {
    MetricExtractor::new(ScreenProfile::default().metrics)
  }

  fn annual(date: &str, oi: f64, ar: f64, inv: f64, cr: f64) -> Value {
    json!({
      "standardDate": date,
      "reportType": "annual_report",
      "h_y": {
        "profitStatement": {"oi": {"t": oi}},
        "balanceSheet": {"ar": {"t": ar}, "i": {"t": inv}, "tca_tcl_r": {"t": cr}},
        "metrics": {"fcf": {"t": 5.0}},
        "cashFlow": {"ncffoa": {"t": 7.0}}
      }
    })
  }

  #[test]
  fn test_filters_annual_and_sorts_by_year() {
    let body = json!({
      "code": 1,
      "data": [
        annual("2018-12-31T00:00:00+08:00", 300.0, 30.0, 3.0, 1.3),
        {
          "standardDate": "2018-09-30T00:00:00+08:00",
          "reportType": "q3",
          "h_y": {"profitStatement": {"oi": {"t": 999.0}}}
        },
        annual("2016-12-31T00:00:00+08:00", 100.0, 10.0, 1.0, 1.1),
        {
          "standardDate": "2017-06-30T00:00:00+08:00",
          "reportType": "semi_annual_report",
          "h_y": {"profitStatement": {"oi": {"t": 888.0}}}
        },
        annual("2017-12-31T00:00:00+08:00", 200.0, 20.0, 2.0, 1.2)
      ]
    });

    let series = extractor().extract(&body);
    assert_eq!(series.years, vec![2016, 2017, 2018]);
    assert_eq!(series.earnings, vec![100.0, 200.0, 300.0]);
    assert_eq!(series.receivables, vec![10.0, 20.0, 30.0]);
    assert_eq!(series.current_ratio, vec![1.1, 1.2, 1.3]);
    assert_eq!(series.free_cash_flow, vec![5.0, 5.0, 5.0]);
    assert_eq!(series.operating_cash_flow, vec![7.0, 7.0, 7.0]);
  }

  #[test]
  fn test_missing_inventory_path_is_zero() {
    let body = json!({
      "data": [{
        "standardDate": "2017-12-31",
        "reportType": "annual_report",
        "h_y": {
          "profitStatement": {"oi": {"t": 100.0}},
          "balanceSheet": {"ar": {"t": 10.0}, "tca_tcl_r": {"t": 1.5}}
        }
      }]
    });

    let series = extractor().extract(&body);
    assert_eq!(series.len(), 1);
    assert_eq!(series.inventory, vec![0.0]);
    assert_eq!(series.earnings, vec![100.0]);
    assert_eq!(series.free_cash_flow, vec![0.0]);
  }

  #[test]
  fn test_null_and_string_leaves_are_zero() {
    let body = json!({
      "data": [{
        "standardDate": "2017-12-31",
        "reportType": "annual_report",
        "h_y": {
          "profitStatement": {"oi": {"t": null}},
          "balanceSheet": {"ar": {"t": "12"}, "i": "flat", "tca_tcl_r": {"t": 2}}
        }
      }]
    });

    let series = extractor().extract(&body);
    assert_eq!(series.earnings, vec![0.0]);
    assert_eq!(series.receivables, vec![0.0]);
    assert_eq!(series.inventory, vec![0.0]);
    assert_eq!(series.current_ratio, vec![2.0]);
  }

  #[test]
  fn test_empty_and_malformed_bodies() {
    let ex = extractor();
    assert!(ex.extract(&json!({"code": 1, "data": []})).is_empty());
    assert!(ex.extract(&json!({"code": 1})).is_empty());
    assert!(ex.extract(&json!({"data": "nope"})).is_empty());
    assert!(ex.extract(&json!([1, 2, 3])).is_empty());

    let quarterly_only = json!({
      "data": [{"standardDate": "2018-03-31", "reportType": "first_quarterly_report"}]
    });
    assert!(ex.extract(&quarterly_only).is_empty());
  }

  #[test]
  fn test_undated_records_are_dropped() {
    let body = json!({
      "data": [
        {"reportType": "annual_report", "h_y": {}},
        {"standardDate": "unknown", "reportType": "annual_report"},
        annual("2017-12-31", 1.0, 1.0, 1.0, 1.0)
      ]
    });

    let series = extractor().extract(&body);
    assert_eq!(series.years, vec![2017]);
  }
}
