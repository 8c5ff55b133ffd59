//! The full screen: snapshot in, sorted shortlist out

use chrono::NaiveDate;
use sf_models::table::{CandidateRow, ValuedCandidate};
use std::path::Path;
use tracing::info;

use crate::html_table::HtmlTableReader;
use crate::increment_filter::filter_positive_growth;
use crate::output::sort_by_pe;
use crate::screening_loader::{ScreeningLoader, ScreeningLoaderInput};
use crate::valuation_loader::{ValuationLoader, ValuationLoaderInput};
use crate::{DataLoader, LoaderContext, LoaderResult};

/// Row counts and outcome of one run
#[derive(Debug, Clone)]
pub struct ScreenSummary {
  pub rows_read: usize,
  pub rows_with_growth: usize,
  pub screening_survivors: usize,
  pub as_of: NaiveDate,
  /// Final shortlist, sorted by PE percentile
  pub shortlist: Vec<ValuedCandidate>,
  /// `(code, error)` for every row skipped because a remote call failed
  pub failed: Vec<(String, String)>,
}

/// Run every stage on rows already read from a snapshot
pub async fn screen_rows(
  context: &LoaderContext,
  rows: Vec<CandidateRow>,
  run_date: NaiveDate,
) -> LoaderResult<ScreenSummary> {
  let rows_read = rows.len();

  let growing = filter_positive_growth(rows);
  let rows_with_growth = growing.len();
  if let Some(tracker) = &context.process_tracker {
    tracker.start("increment_filter", rows_read).await?;
    tracker.complete(rows_with_growth, 0).await?;
  }

  let screened = ScreeningLoader::new().load(context, ScreeningLoaderInput { rows: growing }).await?;
  let screening_survivors = screened.survivors.len();

  let valued = ValuationLoader::new()
    .load(context, ValuationLoaderInput { rows: screened.survivors, run_date })
    .await?;

  let mut shortlist = valued.valued;
  sort_by_pe(&mut shortlist);

  let mut failed = screened.failed;
  failed.extend(valued.failed);

  info!(
    "Screen finished: {} read, {} growing, {} passed statements, {} shortlisted",
    rows_read,
    rows_with_growth,
    screening_survivors,
    shortlist.len()
  );

  Ok(ScreenSummary {
    rows_read,
    rows_with_growth,
    screening_survivors,
    as_of: valued.as_of,
    shortlist,
    failed,
  })
}

/// Read a snapshot file and run every stage on it
pub async fn screen_snapshot<P: AsRef<Path>>(
  context: &LoaderContext,
  snapshot: P,
  run_date: NaiveDate,
) -> LoaderResult<ScreenSummary> {
  let reader = HtmlTableReader::new(context.profile.increment_rate_columns.clone());
  let rows = reader.read_path(snapshot)?;
  screen_rows(context, rows, run_date).await
}
