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

//! Bounded, order-preserving fan-out over candidate rows

use futures::stream::{self, StreamExt};
use std::future::Future;
use tracing::{debug, warn};

use crate::{LoaderError, LoaderResult};

/// Configuration for batch processing
#[derive(Debug, Clone)]
pub struct BatchConfig {
  /// Maximum number of items in flight at once
  pub max_concurrent: usize,

  /// Whether to continue processing on errors
  pub continue_on_error: bool,
}

impl Default for BatchConfig {
  fn default() -> Self {
    Self { max_concurrent: 1, continue_on_error: true }
  }
}

/// Result of batch processing
#[derive(Debug, Clone)]
pub struct BatchResult<T> {
  /// Successfully processed items, in input order
  pub success: Vec<T>,

  /// Failed items with their input index and error
  pub failures: Vec<(usize, LoaderError)>,

  /// Total items processed
  pub total_processed: usize,
}

impl<T> Default for BatchResult<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> BatchResult<T> {
  pub fn new() -> Self {
    Self { success: Vec::new(), failures: Vec::new(), total_processed: 0 }
  }

  pub fn success_count(&self) -> usize {
    self.success.len()
  }

  pub fn failure_count(&self) -> usize {
    self.failures.len()
  }
}

/// Runs one future per item with bounded concurrency
#[derive(Debug, Clone)]
pub struct BatchProcessor {
  config: BatchConfig,
}

impl BatchProcessor {
  pub fn new(config: BatchConfig) -> Self {
    Self { config }
  }

  /// Process every item, yielding outputs in input order.
  ///
  /// Up to `max_concurrent` items are in flight. A failed item is recorded
  /// and skipped when `continue_on_error` is set; otherwise the first failure
  /// (in input order) aborts the run and in-flight work is dropped. Fatal
  /// errors always abort.
  pub async fn process_ordered<T, F, Fut, O>(
    &self,
    items: Vec<T>,
    processor: F,
  ) -> LoaderResult<BatchResult<O>>
  where
    F: Fn(usize, T) -> Fut,
    Fut: Future<Output = LoaderResult<O>>,
  {
    let mut result = BatchResult::new();
    result.total_processed = items.len();
    let width = self.config.max_concurrent.max(1);

    debug!("Processing {} items, {} at a time", items.len(), width);

    let mut outcomes = stream::iter(items.into_iter().enumerate())
      .map(|(idx, item)| {
        let fut = processor(idx, item);
        async move { (idx, fut.await) }
      })
      .buffered(width);

    while let Some((idx, outcome)) = outcomes.next().await {
      match outcome {
        Ok(output) => result.success.push(output),
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
          warn!("Failed to process item {}: {}", idx, e);

          if !self.config.continue_on_error {
            return Err(LoaderError::BatchProcessingError(format!(
              "Batch processing failed at item {}: {}",
              idx, e
            )));
          }

          result.failures.push((idx, e));
        }
      }
    }

    debug!(
      "Batch processing complete: {} successes, {} failures",
      result.success_count(),
      result.failure_count()
    );

    Ok(result)
  }
}
