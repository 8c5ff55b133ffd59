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

//! Common types shared by the Lixinger API responses

use serde::{Deserialize, Serialize};

/// Response envelope wrapped around every Lixinger payload
///
/// A successful call carries `code == 1`; failures put a human readable
/// reason in `message` and usually omit `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
  pub code: Option<i64>,

  pub message: Option<String>,

  pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
  /// Take the payload, falling back to an empty one when `data` is absent
  pub fn into_data(self) -> T
  where
    T: Default,
  {
    self.data.unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_envelope_deserialize() {
    let json = r#"{"code": 1, "message": "success", "data": [1, 2, 3]}"#;
    let envelope: ApiEnvelope<Vec<u32>> = serde_json::from_str(json).unwrap();
    assert_eq!(envelope.code, Some(1));
    assert_eq!(envelope.message.as_deref(), Some("success"));
    assert_eq!(envelope.into_data(), vec![1, 2, 3]);
  }

  #[test]
  fn test_envelope_missing_data() {
    let json = r#"{"code": 0, "message": "Illegal token."}"#;
    let envelope: ApiEnvelope<Vec<u32>> = serde_json::from_str(json).unwrap();
    assert!(envelope.data.is_none());
    assert!(envelope.into_data().is_empty());
  }
}
