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

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate};
use clap::Args;
use sf_client::LixingerClient;
use sf_loaders::{Percentiles, StockReport, as_of_date, fetch_percentiles, screen_stock};
use sf_models::table::api_code;
use std::path::PathBuf;

use crate::config::{Config, load_profile};

#[derive(Args, Clone, Debug)]
pub struct EvaluateArgs {
  /// Stock code, with or without exchange suffix (600519 or 600519.SH)
  pub code: String,

  /// Screening profile JSON (defaults to the built-in profile)
  #[arg(short, long)]
  pub profile: Option<PathBuf>,

  /// Also fetch the PE/PB percentiles
  #[arg(long)]
  pub valuation: bool,

  /// Run date (YYYY-MM-DD) for the valuation lookup
  #[arg(long)]
  pub as_of: Option<NaiveDate>,

  /// Print the report as JSON
  #[arg(long)]
  pub json: bool,
}

pub async fn execute(args: EvaluateArgs) -> Result<()> {
  let config = Config::from_env()?;
  let profile = load_profile(args.profile.as_deref())?;
  let client = LixingerClient::new(config.api_config)
    .map_err(|e| anyhow!("Failed to create API client: {}", e))?;

  let code = api_code(&args.code);
  let report = screen_stock(&client, &profile, code).await?;

  let valuation = if args.valuation {
    let date = as_of_date(args.as_of.unwrap_or_else(|| Local::now().date_naive()));
    let percentiles = fetch_percentiles(&client, &profile.valuation, code, date).await?;
    Some((date, percentiles))
  } else {
    None
  };

  if args.json {
    let mut value = serde_json::to_value(&report)?;
    if let Some((date, p)) = &valuation {
      value["valuation"] = serde_json::json!({
        "as_of": date,
        "pe_percentile": p.pe,
        "pb_percentile": p.pb,
        "passes": p.passes(&profile.valuation),
      });
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
  } else {
    print_report(&report);
    if let Some((date, p)) = &valuation {
      print_valuation(*date, p, p.passes(&profile.valuation));
    }
  }

  Ok(())
}

fn print_report(report: &StockReport) {
  let s = &report.series;
  println!("Stock {}: {} annual reports", report.stock_code, s.len());

  if !s.is_empty() {
    println!(
      "{:<6} {:>18} {:>18} {:>18} {:>8} {:>18} {:>18}",
      "year", "earnings", "receivables", "inventory", "ratio", "free cash", "op cash"
    );
    for i in 0..s.len() {
      println!(
        "{:<6} {:>18.2} {:>18.2} {:>18.2} {:>8.2} {:>18.2} {:>18.2}",
        s.years[i],
        s.earnings[i],
        s.receivables[i],
        s.inventory[i],
        s.current_ratio[i],
        s.free_cash_flow[i],
        s.operating_cash_flow[i]
      );
    }
  }

  let d = &report.deltas;
  println!("\nearnings delta:    {:?}", d.earnings);
  println!("receivables delta: {:?}", d.receivables);
  println!("inventory delta:   {:?}", d.inventory);

  let v = &report.verdict;
  println!("\nreceivables over earnings: {}", v.receivables_over_earnings);
  println!("inventory over earnings:   {}", v.inventory_over_earnings);
  println!("current ratio healthy:     {}", v.current_ratio_healthy);
  println!("verdict: {}", if v.keep() { "KEEP" } else { "DROP" });
}

fn print_valuation(date: NaiveDate, p: &Percentiles, passes: bool) {
  println!("\nvaluation as of {}", date);
  println!("PE percentile: {:.2}", p.pe);
  println!("PB percentile: {:.2}", p.pb);
  println!("valuation: {}", if passes { "KEEP" } else { "DROP" });
}
