//! Year-over-year screening rules

use serde::Serialize;

use super::metrics::MetricSeries;

/// Differences between consecutive annual values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeltaSeries {
  pub earnings: Vec<f64>,
  pub receivables: Vec<f64>,
  pub inventory: Vec<f64>,
}

impl DeltaSeries {
  pub fn from_series(series: &MetricSeries) -> Self {
    Self {
      earnings: deltas(&series.earnings),
      receivables: deltas(&series.receivables),
      inventory: deltas(&series.inventory),
    }
  }
}

/// Outcome of the three rules for one stock
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningVerdict {
  /// Receivables grew faster than earnings two years running
  pub receivables_over_earnings: bool,
  /// Inventory grew faster than earnings two years running
  pub inventory_over_earnings: bool,
  /// Every current ratio is at least 1
  pub current_ratio_healthy: bool,
  pub free_cash_flow: Vec<f64>,
  pub operating_cash_flow: Vec<f64>,
}

impl ScreeningVerdict {
  pub fn evaluate(series: &MetricSeries) -> Self {
    Self::from_deltas(series, &DeltaSeries::from_series(series))
  }

  pub fn from_deltas(series: &MetricSeries, deltas: &DeltaSeries) -> Self {
    Self {
      receivables_over_earnings: outgrows_two_years(&deltas.receivables, &deltas.earnings),
      inventory_over_earnings: outgrows_two_years(&deltas.inventory, &deltas.earnings),
      current_ratio_healthy: series.current_ratio.iter().all(|&ratio| ratio >= 1.0),
      free_cash_flow: series.free_cash_flow.clone(),
      operating_cash_flow: series.operating_cash_flow.clone(),
    }
  }

  /// Keep iff neither growth flag fired and liquidity is healthy
  pub fn keep(&self) -> bool {
    !self.receivables_over_earnings && !self.inventory_over_earnings && self.current_ratio_healthy
  }
}

pub fn deltas(values: &[f64]) -> Vec<f64> {
  values.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// True when `item` exceeds `earnings` in two consecutive positions
fn outgrows_two_years(item: &[f64], earnings: &[f64]) -> bool {
  let exceeded: Vec<bool> = item.iter().zip(earnings).map(|(i, e)| i > e).collect();
  exceeded.windows(2).any(|pair| pair[0] && pair[1])
}
