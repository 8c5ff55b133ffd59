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

use crate::endpoints::{
  DirectRateLimiter, statements::StatementEndpoints, valuation::ValuationEndpoints,
};
use crate::transport::Transport;
use governor::{Quota, RateLimiter};
use sf_core::{Config, Result};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Main Lixinger API client
///
/// Provides access to the statement and valuation endpoints. Handles the
/// token, rate limiting and transport concerns automatically.
///
/// # Examples
///
/// ```ignore
/// use sf_client::LixingerClient;
/// use sf_core::{Config, ScreenProfile};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = LixingerClient::new(Config::from_env()?)?;
///     let profile = ScreenProfile::default();
///
///     let body = client
///         .statements()
///         .fs_industry("600519", &profile.statement_window, &profile.metrics.identifiers())
///         .await?;
///     println!("{}", body);
///     Ok(())
/// }
/// ```
pub struct LixingerClient {
  rate_limiter: Arc<DirectRateLimiter>,
  transport: Arc<Transport>,
}

impl LixingerClient {
  /// Create a new Lixinger API client
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    // Ensure rate_limit is non-zero, fallback to default if invalid
    let rate_limit = NonZeroU32::new(config.rate_limit)
      .or_else(|| NonZeroU32::new(sf_core::DEFAULT_RATE_LIMIT))
      .unwrap_or(NonZeroU32::MIN);
    let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rate_limit)));

    let transport = Arc::new(Transport::new(&config)?);

    Ok(Self { transport, rate_limiter })
  }

  /// Get access to financial statement endpoints
  pub fn statements(&self) -> StatementEndpoints {
    StatementEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Get access to valuation endpoints
  pub fn valuation(&self) -> ValuationEndpoints {
    ValuationEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  pub fn base_url(&self) -> &str {
    self.transport.base_url()
  }
}

impl std::fmt::Debug for LixingerClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LixingerClient")
      .field("transport", &self.transport)
      .field("rate_limiter", &"RateLimiter")
      .finish()
  }
}
