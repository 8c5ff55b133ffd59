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

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
use commands::{evaluate::EvaluateArgs, profile::ProfileArgs, screen::ScreenArgs};

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "sf")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Screen an HTML snapshot and write the shortlist
  Screen(ScreenArgs),

  /// Show why a single stock passes or fails the statement rules
  Evaluate(EvaluateArgs),

  /// Print or check a screening profile
  Profile(ProfileArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging
  let log_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(log_level).init();

  // Execute command
  match cli.command {
    Commands::Screen(args) => commands::screen::execute(args).await?,
    Commands::Evaluate(args) => commands::evaluate::execute(args).await?,
    Commands::Profile(args) => commands::profile::execute(args)?,
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_screen_flags() {
    let cli = Cli::try_parse_from([
      "sf",
      "-v",
      "screen",
      "--input",
      "snapshot.html",
      "--concurrent",
      "4",
      "--fail-fast",
      "--as-of",
      "2020-01-04",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
      Commands::Screen(args) => {
        assert_eq!(args.input.to_str(), Some("snapshot.html"));
        assert_eq!(args.concurrent, 4);
        assert!(args.fail_fast);
        assert_eq!(args.as_of, chrono::NaiveDate::from_ymd_opt(2020, 1, 4));
      }
      other => panic!("Expected screen, got {:?}", other),
    }
  }

  #[test]
  fn test_parse_evaluate() {
    let cli = Cli::try_parse_from(["sf", "evaluate", "600519.SH", "--valuation"]).unwrap();
    match cli.command {
      Commands::Evaluate(args) => {
        assert_eq!(args.code, "600519.SH");
        assert!(args.valuation);
      }
      other => panic!("Expected evaluate, got {:?}", other),
    }
  }
}
