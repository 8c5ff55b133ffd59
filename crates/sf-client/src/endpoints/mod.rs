pub mod statements;
pub mod valuation;

use crate::transport::Transport;
use sf_core::Result;
use governor::{
  RateLimiter,
  clock::DefaultClock,
  middleware::NoOpMiddleware,
  state::{InMemoryState, NotKeyed},
};
use std::sync::Arc;

/// Process-wide rate limiter shared by every endpoint group
pub type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Base trait for endpoint implementations
///
/// Provides common functionality needed by all endpoint modules
#[allow(async_fn_in_trait)]
pub trait EndpointBase {
  /// Wait for rate limit before making a request
  async fn wait_for_rate_limit(&self) -> Result<()>;

  /// Get a reference to the transport layer
  fn transport(&self) -> &Arc<Transport>;
}

/// Macro to implement the EndpointBase trait for endpoint structs
macro_rules! impl_endpoint_base {
  ($struct_name:ident) => {
    impl EndpointBase for $struct_name {
      async fn wait_for_rate_limit(&self) -> Result<()> {
        self.rate_limiter.until_ready().await;
        Ok(())
      }

      fn transport(&self) -> &Arc<Transport> {
        &self.transport
      }
    }
  };
}

pub(crate) use impl_endpoint_base;

#[cfg(test)]
mod tests {
  use super::*;
  use governor::Quota;
  use std::num::NonZeroU32;

  #[test]
  fn test_rate_limiter_shared_between_groups() {
    let transport = Arc::new(Transport::new_mock());
    let quota = Quota::per_minute(NonZeroU32::new(60).unwrap());
    let rate_limiter: Arc<DirectRateLimiter> = Arc::new(RateLimiter::direct(quota));

    let statements = statements::StatementEndpoints::new(transport.clone(), rate_limiter.clone());
    let valuation = valuation::ValuationEndpoints::new(transport, rate_limiter.clone());

    assert_eq!(statements.transport().base_url(), "https://mock.lixinger.com/api");
    assert_eq!(valuation.transport().base_url(), "https://mock.lixinger.com/api");
    assert_eq!(Arc::strong_count(&rate_limiter), 3);
  }
}
