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

//! Per-stock statement screening

use async_trait::async_trait;
use serde::Serialize;
use sf_core::ScreenProfile;
use sf_models::table::CandidateRow;
use tracing::{debug, error, info};

use crate::batch_processor::{BatchConfig, BatchProcessor};
use crate::loader::stage_progress;
use crate::screening::{DeltaSeries, MetricExtractor, MetricSeries, ScreeningVerdict};
use crate::{DataLoader, FundamentalsSource, LoaderContext, LoaderResult};

/// Everything the rules saw for one stock
#[derive(Debug, Clone, Serialize)]
pub struct StockReport {
  pub stock_code: String,
  pub series: MetricSeries,
  pub deltas: DeltaSeries,
  pub verdict: ScreeningVerdict,
}

/// Fetch one stock's statements and run the screening rules on them
pub async fn screen_stock(
  source: &dyn FundamentalsSource,
  profile: &ScreenProfile,
  stock_code: &str,
) -> LoaderResult<StockReport> {
  let identifiers = profile.metrics.identifiers();
  let body = source.statements(stock_code, &profile.statement_window, &identifiers).await?;

  let series = MetricExtractor::new(profile.metrics.clone()).extract(&body);
  let deltas = DeltaSeries::from_series(&series);
  let verdict = ScreeningVerdict::from_deltas(&series, &deltas);

  debug!(stock_code, years = ?series.years, earnings = ?series.earnings, "Extracted series");
  debug!(stock_code, ?deltas, "Year-over-year deltas");

  Ok(StockReport { stock_code: stock_code.to_string(), series, deltas, verdict })
}

#[derive(Debug, Clone)]
pub struct ScreeningLoaderInput {
  pub rows: Vec<CandidateRow>,
}

#[derive(Debug, Clone)]
pub struct ScreeningLoaderOutput {
  /// Rows that passed, in input order
  pub survivors: Vec<CandidateRow>,
  pub rows_examined: usize,
  /// Rows whose fetch failed, with the error text
  pub failed: Vec<(String, String)>,
}

/// Runs the statement rules over every candidate row
#[derive(Debug, Clone, Default)]
pub struct ScreeningLoader;

impl ScreeningLoader {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl DataLoader for ScreeningLoader {
  type Input = ScreeningLoaderInput;
  type Output = ScreeningLoaderOutput;

  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    let rows_examined = input.rows.len();
    info!("Screening statements for {} stocks", rows_examined);

    if let Some(tracker) = &context.process_tracker {
      tracker.start(self.name(), rows_examined).await?;
    }

    let progress = stage_progress(context.config.show_progress, rows_examined);
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
          if let Some(pb) = &progress {
            pb.set_message(format!("Screening {}", row.code));
          }

          let report = screen_stock(source.as_ref(), &profile, row.api_code()).await;
          if let Some(pb) = &progress {
            pb.inc(1);
          }

          let report = report.inspect_err(|e| error!("Screening {} failed: {}", row.code, e))?;
          let verdict = &report.verdict;
          let keep = verdict.keep();
          info!(
            code = %row.code,
            name = %row.name,
            receivables_over_earnings = verdict.receivables_over_earnings,
            inventory_over_earnings = verdict.inventory_over_earnings,
            current_ratio_healthy = verdict.current_ratio_healthy,
            "{}",
            if keep { "kept" } else { "dropped" }
          );

          Ok(keep.then_some(row))
        }
      })
      .await;

    let result = match outcome {
      Ok(result) => result,
      Err(e) => {
        if let Some(pb) = &progress {
          pb.abandon_with_message("Screening aborted");
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
    let survivors: Vec<CandidateRow> = result.success.into_iter().flatten().collect();

    if let Some(pb) = &progress {
      pb.finish_with_message(format!(
        "Screening complete: {} kept, {} failed",
        survivors.len(),
        failed.len()
      ));
    }

    if let Some(tracker) = &context.process_tracker {
      tracker.complete(survivors.len(), failed.len()).await?;
    }

    info!(
      "Screening kept {} of {} stocks ({} failed)",
      survivors.len(),
      rows_examined,
      failed.len()
    );

    Ok(ScreeningLoaderOutput { survivors, rows_examined, failed })
  }

  fn name(&self) -> &'static str {
    "screening"
  }
}
