//! Local pre-filter on the snapshot's growth columns

use sf_models::table::CandidateRow;
use tracing::{debug, info, warn};

/// Keep rows whose increment rates are all strictly positive.
///
/// A rate that does not parse as a number drops the row.
pub fn filter_positive_growth(rows: Vec<CandidateRow>) -> Vec<CandidateRow> {
  let total = rows.len();
  let kept: Vec<CandidateRow> = rows.into_iter().filter(has_positive_growth).collect();
  info!("Increment-rate filter kept {} of {} rows", kept.len(), total);
  kept
}

pub fn has_positive_growth(row: &CandidateRow) -> bool {
  for raw in &row.increment_rates {
    match parse_rate(raw) {
      Some(rate) if rate > 0.0 => {}
      Some(rate) => {
        debug!("Dropping {} {}: increment rate {} is not positive", row.code, row.name, rate);
        return false;
      }
      None => {
        warn!("Dropping {} {}: increment rate {:?} is not a number", row.code, row.name, raw);
        return false;
      }
    }
  }
  true
}

/// Parse a percentage cell such as `12.5`, `-3` or `1,024.7`
pub fn parse_rate(raw: &str) -> Option<f64> {
  let cleaned: String = raw.trim().trim_end_matches('%').chars().filter(|c| *c != ',').collect();
  cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(code: &str, rates: &[&str]) -> CandidateRow {
    CandidateRow {
      code: code.to_string(),
      name: "name".to_string(),
      price: "1.0".to_string(),
      change_pct: "0.0".to_string(),
      listed_on: "20000101".to_string(),
      industry: "industry".to_string(),
      increment_rates: rates.iter().map(|r| r.to_string()).collect(),
    }
  }

  #[test]
  fn test_parse_rate() {
    assert_eq!(parse_rate("12.5"), Some(12.5));
    assert_eq!(parse_rate(" -3 "), Some(-3.0));
    assert_eq!(parse_rate("1,024.7"), Some(1024.7));
    assert_eq!(parse_rate("8%"), Some(8.0));
    assert_eq!(parse_rate("--"), None);
    assert_eq!(parse_rate(""), None);
    assert_eq!(parse_rate("NaN"), None);
  }

  #[test]
  fn test_filter_keeps_only_all_positive_rows() {
    let rows = vec![
      row("600519.SH", &["12.1", "10.2", "15.3", "8.4"]),
      row("000651.SZ", &["5.0", "0", "3.3", "1.1"]),
      row("000002.SZ", &["5.0", "1.0", "-3.3", "1.1"]),
      row("600036.SH", &["5.0", "--", "3.3", "1.1"]),
      row("601318.SH", &["0.01", "0.02", "0.03", "0.04"]),
    ];

    let kept = filter_positive_growth(rows);
    let codes: Vec<&str> = kept.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["600519.SH", "601318.SH"]);
  }

  #[test]
  fn test_row_without_rates_passes() {
    assert!(has_positive_growth(&row("600000.SH", &[])));
  }
}
