use anyhow::{Context, Result};
use clap::Args;
use sf_core::ScreenProfile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::load_profile;

#[derive(Args, Clone, Debug)]
pub struct ProfileArgs {
  /// Write the default profile to this file instead of stdout
  #[arg(short, long)]
  pub output: Option<PathBuf>,

  /// Validate an existing profile and print it back
  #[arg(long, conflicts_with = "output")]
  pub check: Option<PathBuf>,
}

pub fn execute(args: ProfileArgs) -> Result<()> {
  if let Some(path) = &args.check {
    let profile = load_profile(Some(path))?;
    println!("{}", profile.to_json_pretty()?);
    info!("Profile {} is valid", path.display());
    return Ok(());
  }

  let json = ScreenProfile::default().to_json_pretty()?;
  match &args.output {
    Some(path) => write_profile(path, &json)?,
    None => println!("{}", json),
  }

  Ok(())
}

fn write_profile(path: &Path, json: &str) -> Result<()> {
  fs::write(path, format!("{}\n", json))
    .with_context(|| format!("Failed to write profile {}", path.display()))?;
  info!("Default profile written to {}", path.display());
  Ok(())
}
