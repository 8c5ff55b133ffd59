//! Where the loaders get their remote data from

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use sf_client::LixingerClient;
use sf_core::StatementWindow;
use sf_models::valuation::ValuationRecord;

use crate::LoaderResult;

/// Remote data the screening and valuation loaders need
///
/// Implemented for [`LixingerClient`]; tests supply canned responses.
#[async_trait]
pub trait FundamentalsSource: Send + Sync {
  /// Raw statement response for one stock over a date window
  async fn statements(
    &self,
    stock_code: &str,
    window: &StatementWindow,
    metrics: &[String],
  ) -> LoaderResult<Value>;

  /// Valuation figures for one stock on one trading date
  async fn valuation(
    &self,
    stock_code: &str,
    date: NaiveDate,
    metrics: &[String],
  ) -> LoaderResult<ValuationRecord>;
}

#[async_trait]
impl FundamentalsSource for LixingerClient {
  async fn statements(
    &self,
    stock_code: &str,
    window: &StatementWindow,
    metrics: &[String],
  ) -> LoaderResult<Value> {
    Ok(LixingerClient::statements(self).fs_industry(stock_code, window, metrics).await?)
  }

  async fn valuation(
    &self,
    stock_code: &str,
    date: NaiveDate,
    metrics: &[String],
  ) -> LoaderResult<ValuationRecord> {
    Ok(LixingerClient::valuation(self).fundamental(stock_code, date, metrics).await?)
  }
}
