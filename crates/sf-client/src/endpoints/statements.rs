use super::{DirectRateLimiter, EndpointBase};
use crate::endpoints::impl_endpoint_base;
use crate::transport::Transport;
use serde_json::Value;
use sf_core::{Endpoint, Result, StatementWindow};
use sf_models::statements::StatementsQuery;
use std::sync::Arc;
use tracing::instrument;

/// Financial statement endpoints
pub struct StatementEndpoints {
  transport: Arc<Transport>,
  rate_limiter: Arc<DirectRateLimiter>,
}

impl StatementEndpoints {
  /// Create a new statement endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: Arc<DirectRateLimiter>) -> Self {
    Self { transport, rate_limiter }
  }

  /// Get historical financial statement line items for one stock
  ///
  /// The response body is returned as raw JSON; line items are addressed by
  /// the same dotted identifiers passed in `metrics`, and the caller decides
  /// how to treat gaps.
  ///
  /// # Arguments
  ///
  /// * `stock_code` - Bare exchange code (e.g. "600519")
  /// * `window` - Start and end date of the requested history
  /// * `metrics` - Dotted metric identifiers (e.g. "h_y.balanceSheet.ar.t")
  #[instrument(skip(self, window, metrics), fields(stock_code))]
  pub async fn fs_industry(
    &self,
    stock_code: &str,
    window: &StatementWindow,
    metrics: &[String],
  ) -> Result<Value> {
    self.wait_for_rate_limit().await?;

    let query = StatementsQuery {
      token: self.transport.api_token().to_string(),
      start_date: window.start_date,
      end_date: window.end_date,
      stock_codes: vec![stock_code.to_string()],
      metrics: metrics.to_vec(),
    };

    self.transport.post(Endpoint::FsIndustry, &query).await
  }
}

impl_endpoint_base!(StatementEndpoints);
