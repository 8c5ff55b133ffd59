use super::{DirectRateLimiter, EndpointBase};
use crate::endpoints::impl_endpoint_base;
use crate::transport::Transport;
use chrono::NaiveDate;
use sf_core::{Endpoint, Error, Result};
use sf_models::valuation::{ValuationQuery, ValuationRecord, ValuationResponse};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Valuation (fundamental indicator) endpoints
pub struct ValuationEndpoints {
  transport: Arc<Transport>,
  rate_limiter: Arc<DirectRateLimiter>,
}

impl ValuationEndpoints {
  /// Create a new valuation endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: Arc<DirectRateLimiter>) -> Self {
    Self { transport, rate_limiter }
  }

  /// Get valuation figures for one stock on one trading date
  ///
  /// Lixinger publishes nothing for non-trading days, so an empty `data`
  /// array comes back as [`Error::NoData`].
  ///
  /// # Arguments
  ///
  /// * `stock_code` - Bare exchange code
  /// * `date` - Trading date
  /// * `metrics` - Metric names (e.g. "d_pe_ttm_pos10", "pb_wo_gw_pos10")
  #[instrument(skip(self, metrics), fields(stock_code, date = %date))]
  pub async fn fundamental(
    &self,
    stock_code: &str,
    date: NaiveDate,
    metrics: &[String],
  ) -> Result<ValuationRecord> {
    self.wait_for_rate_limit().await?;

    let query = ValuationQuery {
      token: self.transport.api_token().to_string(),
      date,
      stock_codes: vec![stock_code.to_string()],
      metrics: metrics.to_vec(),
    };

    let response: ValuationResponse = self.transport.post(Endpoint::Fundamental, &query).await?;
    let records = response.into_data();
    debug!("Received {} valuation records", records.len());

    records
      .into_iter()
      .next()
      .ok_or_else(|| Error::NoData(format!("{} on {}", stock_code, date)))
  }
}

impl_endpoint_base!(ValuationEndpoints);
