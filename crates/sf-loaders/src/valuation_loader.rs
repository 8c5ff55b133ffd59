/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! PE/PB percentile filter for screening survivors

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use sf_core::{Error, ValuationRule};
use sf_models::table::{CandidateRow, ValuedCandidate};
use sf_models::valuation::ValuationRecord;
use tracing::{error, info};

use crate::batch_processor::{BatchConfig, BatchProcessor};
use crate::loader::stage_progress;
use crate::{DataLoader, FundamentalsSource, LoaderContext, LoaderResult};

/// Trading date to query: the date itself on weekdays, the Friday before on weekends
pub fn as_of_date(date: NaiveDate) -> NaiveDate {
  match date.weekday() {
    Weekday::Sat => date - Duration::days(1),
    Weekday::Sun => date - Duration::days(2),
    _ => date,
  }
}

/// PE and PB percentiles of one stock, scaled to 0-100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentiles {
  pub pe: f64,
  pub pb: f64,
}

impl Percentiles {
  /// Read both metrics from a record, failing with `NoData` if either is absent
  pub fn from_record(record: &ValuationRecord, rule: &ValuationRule, code: &str) -> LoaderResult<Self> {
    let read = |metric: &str| {
      record
        .metric(metric)
        .map(|v| v * 100.0)
        .ok_or_else(|| Error::NoData(format!("{} for {}", metric, code)))
    };

    Ok(Self { pe: read(&rule.pe_metric)?, pb: read(&rule.pb_metric)? })
  }

  pub fn passes(&self, rule: &ValuationRule) -> bool {
    self.pe <= rule.max_pe_percentile && self.pb <= rule.max_pb_percentile
  }
}

/// Fetch one stock's percentiles for a trading date
pub async fn fetch_percentiles(
  source: &dyn FundamentalsSource,
  rule: &ValuationRule,
  stock_code: &str,
  date: NaiveDate,
) -> LoaderResult<Percentiles> {
  let metrics = vec![rule.pe_metric.clone(), rule.pb_metric.clone()];
  let record = source.valuation(stock_code, date, &metrics).await?;
  Percentiles::from_record(&record, rule, stock_code)
}

#[derive(Debug, Clone)]
pub struct ValuationLoaderInput {
  pub rows: Vec<CandidateRow>,
  /// Calendar date of the run; weekends roll back to Friday
  pub run_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct ValuationLoaderOutput {
  /// Rows under both thresholds, in input order
  pub valued: Vec<ValuedCandidate>,
  /// Date the percentiles were requested for
  pub as_of: NaiveDate,
  pub failed: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct ValuationLoader;

impl ValuationLoader {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl DataLoader for ValuationLoader {
  type Input = ValuationLoaderInput;
  type Output = ValuationLoaderOutput;

  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    let as_of = as_of_date(input.run_date);
    let total = input.rows.len();
    info!("Checking valuation of {} stocks as of {}", total, as_of);

    if let Some(tracker) = &context.process_tracker {
      tracker.start(self.name(), total).await?;
    }

    let progress = stage_progress(context.config.show_progress, total);
    let codes: Vec<String> = input.rows.iter().map(|r| r.code.clone()).collect();

    let processor = BatchProcessor::new(BatchConfig {
      max_concurrent: context.config.max_concurrent_requests,
      continue_on_error: context.config.continue_on_error,
    });

    let outcome = processor
      .process_ordered(input.rows, |_, row| {
        let source = context.source.clone();
        let profile = context.profile.clone();
        let progress = progress.clone();

        async move {
          let rule = &profile.valuation;
          let fetched = fetch_percentiles(source.as_ref(), rule, row.api_code(), as_of).await;
          if let Some(pb) = &progress {
            pb.inc(1);
          }

          let percentiles = fetched.inspect_err(|e| error!("Valuation of {} failed: {}", row.code, e))?;
          let keep = percentiles.passes(rule);
          info!(
            code = %row.code,
            pe = percentiles.pe,
            pb = percentiles.pb,
            "{}",
            if keep { "valuation kept" } else { "valuation dropped" }
          );

          Ok(keep.then(|| ValuedCandidate {
            row,
            pe_percentile: percentiles.pe,
            pb_percentile: percentiles.pb,
          }))
        }
      })
      .await;

    let result = match outcome {
      Ok(result) => result,
      Err(e) => {
        if let Some(pb) = &progress {
          pb.abandon_with_message("Valuation aborted");
        }
        if let Some(tracker) = &context.process_tracker {
          tracker.fail(&e.to_string()).await?;
        }
        return Err(e);
      }
    };

    let failed: Vec<(String, String)> = result
      .failures
      .iter()
      .map(|(idx, e)| (codes.get(*idx).cloned().unwrap_or_default(), e.to_string()))
      .collect();
    let valued: Vec<ValuedCandidate> = result.success.into_iter().flatten().collect();

    if let Some(pb) = &progress {
      pb.finish_with_message(format!("Valuation complete: {} kept", valued.len()));
    }

    if let Some(tracker) = &context.process_tracker {
      tracker.complete(valued.len(), failed.len()).await?;
    }

    info!("Valuation kept {} of {} stocks ({} failed)", valued.len(), total, failed.len());

    Ok(ValuationLoaderOutput { valued, as_of, failed })
  }

  fn name(&self) -> &'static str {
    "valuation"
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use sf_core::ScreenProfile;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn record(value: serde_json::Value) -> ValuationRecord {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn test_weekend_rolls_back_to_friday() {
    // 2020-01-03 is a Friday
    assert_eq!(as_of_date(date(2020, 1, 4)), date(2020, 1, 3));
    assert_eq!(as_of_date(date(2020, 1, 5)), date(2020, 1, 3));
  }

  #[test]
  fn test_weekdays_are_unchanged() {
    for day in 6..=10 {
      assert_eq!(as_of_date(date(2020, 1, day)), date(2020, 1, day));
    }
  }

  #[test]
  fn test_weekend_rollback_crosses_month() {
    // 2020-03-01 is a Sunday
    assert_eq!(as_of_date(date(2020, 3, 1)), date(2020, 2, 28));
  }

  #[test]
  fn test_percentiles_scale_and_threshold() {
    let rule = ScreenProfile::default().valuation;

    let kept = Percentiles::from_record(
      &record(json!({"d_pe_ttm_pos10": 0.3, "pb_wo_gw_pos10": 0.5})),
      &rule,
      "600519",
    )
    .unwrap();
    assert!((kept.pe - 30.0).abs() < 1e-9);
    assert!((kept.pb - 50.0).abs() < 1e-9);
    assert!(kept.passes(&rule));

    let dropped = Percentiles::from_record(
      &record(json!({"d_pe_ttm_pos10": 0.51, "pb_wo_gw_pos10": 0.1})),
      &rule,
      "600519",
    )
    .unwrap();
    assert!(!dropped.passes(&rule));
  }

  #[test]
  fn test_missing_metric_is_error() {
    let rule = ScreenProfile::default().valuation;
    let result =
      Percentiles::from_record(&record(json!({"d_pe_ttm_pos10": 0.3})), &rule, "600519");

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("pb_wo_gw_pos10"));
  }
}
