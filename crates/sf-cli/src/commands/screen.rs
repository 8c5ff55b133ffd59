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

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use clap::Args;
use sf_client::LixingerClient;
use sf_loaders::{
  LoaderConfig, LoaderContext, ProcessTracker, ScreenSummary,
  output::{check_output_path, write_shortlist},
  screen_snapshot,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{Config, load_profile};

#[derive(Args, Clone, Debug)]
pub struct ScreenArgs {
  /// Saved HTML page with the screener table
  #[arg(short, long, env = "SF_SNAPSHOT")]
  pub input: PathBuf,

  /// Where to write the shortlist (CSV)
  #[arg(short, long, env = "SF_OUTPUT", default_value = "shortlist.csv")]
  pub output: PathBuf,

  /// Screening profile JSON (defaults to the built-in profile)
  #[arg(short, long)]
  pub profile: Option<PathBuf>,

  /// Number of concurrent requests
  #[arg(short, long, default_value = "1")]
  pub concurrent: usize,

  /// Stop at the first failed remote call instead of skipping the row
  #[arg(long)]
  pub fail_fast: bool,

  /// Run date (YYYY-MM-DD) for the valuation lookup; weekends roll back to Friday
  #[arg(long)]
  pub as_of: Option<NaiveDate>,

  /// Hide progress bars
  #[arg(long)]
  pub no_progress: bool,
}

pub async fn execute(args: ScreenArgs) -> Result<()> {
  info!("Starting screen of {}", args.input.display());

  let config = Config::from_env()?;
  let profile = load_profile(args.profile.as_deref())?;
  check_output_path(&args.output)
    .with_context(|| format!("Cannot write shortlist to {}", args.output.display()))?;

  let client = Arc::new(
    LixingerClient::new(config.api_config)
      .map_err(|e| anyhow!("Failed to create API client: {}", e))?,
  );
  info!("Using Lixinger API at {}", client.base_url());

  let loader_config = LoaderConfig {
    max_concurrent_requests: args.concurrent.max(1),
    continue_on_error: !args.fail_fast,
    show_progress: !args.no_progress,
  };

  let tracker = ProcessTracker::new();
  let context = LoaderContext::new(client, profile, loader_config).with_process_tracker(tracker.clone());

  let run_date = args.as_of.unwrap_or_else(|| Local::now().date_naive());
  let summary = screen_snapshot(&context, &args.input, run_date)
    .await
    .with_context(|| format!("Screening {} failed", args.input.display()))?;

  write_shortlist(&args.output, &context.profile, &summary.shortlist)
    .with_context(|| format!("Failed to write {}", args.output.display()))?;

  print_summary(&summary, &tracker).await;
  println!("Shortlist written to {}", args.output.display());

  Ok(())
}

async fn print_summary(summary: &ScreenSummary, tracker: &ProcessTracker) {
  println!("\nScreen summary (valuations as of {})", summary.as_of);
  println!("{:<18} {:>6} {:>6} {:>8} {:>7}", "stage", "in", "out", "dropped", "failed");
  for stage in tracker.get_all().await {
    println!(
      "{:<18} {:>6} {:>6} {:>8} {:>7}",
      stage.process_name,
      stage.records_in,
      stage.records_out,
      stage.records_dropped(),
      stage.records_failed
    );
  }

  if !summary.failed.is_empty() {
    warn!("{} rows were skipped after remote errors", summary.failed.len());
    for (code, error) in &summary.failed {
      println!("  skipped {}: {}", code, error);
    }
  }

  println!("{} stocks shortlisted", summary.shortlist.len());
}
