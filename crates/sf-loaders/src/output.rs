//! Shortlist output

use csv::Writer;
use sf_core::ScreenProfile;
use sf_models::table::{BASE_COLUMNS, ValuedCandidate};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::{LoaderError, LoaderResult};

/// Order by PE percentile, cheapest first; ties keep their input order
pub fn sort_by_pe(candidates: &mut [ValuedCandidate]) {
  candidates.sort_by(|a, b| a.pe_percentile.total_cmp(&b.pe_percentile));
}

/// Output header: snapshot columns, then the two percentile columns
pub fn output_header(profile: &ScreenProfile) -> Vec<String> {
  BASE_COLUMNS
    .iter()
    .map(|c| c.to_string())
    .chain(profile.increment_rate_columns.iter().cloned())
    .chain([profile.valuation.pe_column.clone(), profile.valuation.pb_column.clone()])
    .collect()
}

/// Fail early if the shortlist could not be written to `path`
pub fn check_output_path<P: AsRef<Path>>(path: P) -> LoaderResult<()> {
  let path = path.as_ref();
  if path.is_dir() {
    return Err(LoaderError::IoError(format!("{} is a directory", path.display())));
  }

  let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
  let metadata = fs::metadata(parent).map_err(|e| {
    LoaderError::IoError(format!("Output directory {}: {}", parent.display(), e))
  })?;
  if !metadata.is_dir() {
    return Err(LoaderError::IoError(format!("{} is not a directory", parent.display())));
  }
  if metadata.permissions().readonly() {
    return Err(LoaderError::IoError(format!("Output directory {} is read-only", parent.display())));
  }

  Ok(())
}

/// Write the shortlist as CSV
pub fn write_shortlist<P: AsRef<Path>>(
  path: P,
  profile: &ScreenProfile,
  candidates: &[ValuedCandidate],
) -> LoaderResult<()> {
  let path = path.as_ref();
  let mut writer = Writer::from_path(path)?;

  writer.write_record(output_header(profile))?;
  for candidate in candidates {
    writer.write_record(candidate.cells())?;
  }
  writer.flush()?;

  info!("Wrote {} rows to {}", candidates.len(), path.display());
  Ok(())
}
