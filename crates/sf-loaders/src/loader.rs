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

//! Base traits and types for data loaders

use crate::{FundamentalsSource, LoaderResult, ProcessTracker};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use sf_core::ScreenProfile;
use std::sync::Arc;

/// Configuration for data loaders
#[derive(Debug, Clone)]
pub struct LoaderConfig {
  /// Maximum concurrent requests
  pub max_concurrent_requests: usize,

  /// Skip rows whose remote calls fail instead of aborting the run
  pub continue_on_error: bool,

  /// Enable progress bars
  pub show_progress: bool,
}

impl Default for LoaderConfig {
  fn default() -> Self {
    Self { max_concurrent_requests: 1, continue_on_error: true, show_progress: true }
  }
}

/// Shared context for all loaders
pub struct LoaderContext {
  pub source: Arc<dyn FundamentalsSource>,
  pub profile: Arc<ScreenProfile>,
  pub config: LoaderConfig,
  pub process_tracker: Option<ProcessTracker>,
}

impl LoaderContext {
  pub fn new(source: Arc<dyn FundamentalsSource>, profile: ScreenProfile, config: LoaderConfig) -> Self {
    Self { source, profile: Arc::new(profile), config, process_tracker: None }
  }

  pub fn with_process_tracker(mut self, tracker: ProcessTracker) -> Self {
    self.process_tracker = Some(tracker);
    self
  }
}

/// Progress bar for a stage, or `None` when progress output is off
pub(crate) fn stage_progress(show: bool, len: usize) -> Option<Arc<ProgressBar>> {
  if !show {
    return None;
  }

  let pb = ProgressBar::new(len as u64);
  pb.set_style(
    ProgressStyle::default_bar()
      .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}")
      .map(|style| style.progress_chars("##-"))
      .unwrap_or_else(|_| ProgressStyle::default_bar()),
  );
  Some(Arc::new(pb))
}

/// Base trait for all data loaders
#[async_trait]
pub trait DataLoader: Send + Sync {
  /// The type of data this loader processes
  type Input;

  /// The result type after loading
  type Output;

  /// Load data from the given input
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output>;

  /// Get loader name for logging/tracking
  fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::LoaderError;
  use chrono::NaiveDate;
  use serde_json::Value;
  use sf_core::StatementWindow;
  use sf_models::valuation::ValuationRecord;

  struct NoSource;

  #[async_trait]
  impl FundamentalsSource for NoSource {
    async fn statements(&self, code: &str, _: &StatementWindow, _: &[String]) -> LoaderResult<Value> {
      Err(LoaderError::ApiError(code.to_string()))
    }

    async fn valuation(&self, code: &str, _: NaiveDate, _: &[String]) -> LoaderResult<ValuationRecord> {
      Err(LoaderError::ApiError(code.to_string()))
    }
  }

  #[test]
  fn test_loader_config_default() {
    let config = LoaderConfig::default();
    assert_eq!(config.max_concurrent_requests, 1);
    assert!(config.continue_on_error);
    assert!(config.show_progress);
  }

  #[test]
  fn test_loader_context_new() {
    let context = LoaderContext::new(Arc::new(NoSource), ScreenProfile::default(), LoaderConfig::default());
    assert!(context.process_tracker.is_none());
    assert_eq!(context.profile.version, sf_core::profile::PROFILE_VERSION);
  }

  #[test]
  fn test_loader_context_with_process_tracker() {
    let config = LoaderConfig { max_concurrent_requests: 4, ..LoaderConfig::default() };
    let context = LoaderContext::new(Arc::new(NoSource), ScreenProfile::default(), config)
      .with_process_tracker(ProcessTracker::new());

    assert!(context.process_tracker.is_some());
    assert_eq!(context.config.max_concurrent_requests, 4);
  }
}
