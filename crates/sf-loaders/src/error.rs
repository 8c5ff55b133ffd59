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

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LoaderError {
  #[error("API error: {0}")]
  ApiError(String),

  #[error("HTML parsing error: {0}")]
  HtmlError(String),

  #[error("CSV error: {0}")]
  CsvError(String),

  #[error("IO error: {0}")]
  IoError(String),

  #[error("Missing required columns: {}", .0.join(", "))]
  MissingColumns(Vec<String>),

  #[error("Invalid data: {0}")]
  InvalidData(String),

  #[error("Batch processing error: {0}")]
  BatchProcessingError(String),

  #[error("Configuration error: {0}")]
  ConfigurationError(String),
}

impl LoaderError {
  /// Errors that end the run no matter how row failures are handled
  pub fn is_fatal(&self) -> bool {
    matches!(
      self,
      LoaderError::MissingColumns(_)
        | LoaderError::HtmlError(_)
        | LoaderError::ConfigurationError(_)
        | LoaderError::IoError(_)
    )
  }
}

impl From<csv::Error> for LoaderError {
  fn from(err: csv::Error) -> Self {
    LoaderError::CsvError(err.to_string())
  }
}

impl From<std::io::Error> for LoaderError {
  fn from(err: std::io::Error) -> Self {
    LoaderError::IoError(err.to_string())
  }
}

impl From<sf_core::Error> for LoaderError {
  fn from(err: sf_core::Error) -> Self {
    match err {
      sf_core::Error::Config(msg) => LoaderError::ConfigurationError(msg),
      other => LoaderError::ApiError(other.to_string()),
    }
  }
}

pub type LoaderResult<T> = Result<T, LoaderError>;
