//! Stage tracking for a screening run
//! Kept in memory; the run summary is printed from it at the end

use crate::LoaderResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
  Running,
  Success,
  Failed,
  CompletedWithErrors,
}

#[derive(Debug, Clone)]
pub struct ProcessInfo {
  pub process_name: String,
  pub start_time: DateTime<Utc>,
  pub end_time: Option<DateTime<Utc>>,
  pub state: ProcessState,
  pub error_message: Option<String>,
  /// Rows handed to the stage
  pub records_in: usize,
  /// Rows the stage passed on
  pub records_out: usize,
  /// Rows skipped because of an error
  pub records_failed: usize,
}

impl ProcessInfo {
  /// Rows the stage deliberately filtered out
  pub fn records_dropped(&self) -> usize {
    self.records_in.saturating_sub(self.records_out + self.records_failed)
  }
}

/// In-memory process tracker, cheap to clone
#[derive(Debug, Clone, Default)]
pub struct ProcessTracker {
  processes: Arc<Mutex<Vec<ProcessInfo>>>,
}

impl ProcessTracker {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn start(&self, process_name: &str, records_in: usize) -> LoaderResult<()> {
    let mut processes = self.processes.lock().await;
    processes.push(ProcessInfo {
      process_name: process_name.to_string(),
      start_time: Utc::now(),
      end_time: None,
      state: ProcessState::Running,
      error_message: None,
      records_in,
      records_out: 0,
      records_failed: 0,
    });
    Ok(())
  }

  /// Close the most recently started stage
  pub async fn complete(&self, records_out: usize, records_failed: usize) -> LoaderResult<()> {
    let state =
      if records_failed == 0 { ProcessState::Success } else { ProcessState::CompletedWithErrors };

    let mut processes = self.processes.lock().await;
    if let Some(last) = processes.last_mut() {
      last.state = state;
      last.end_time = Some(Utc::now());
      last.records_out = records_out;
      last.records_failed = records_failed;
    }
    Ok(())
  }

  pub async fn fail(&self, message: &str) -> LoaderResult<()> {
    let mut processes = self.processes.lock().await;
    if let Some(last) = processes.last_mut() {
      last.state = ProcessState::Failed;
      last.end_time = Some(Utc::now());
      last.error_message = Some(message.to_string());
    }
    Ok(())
  }

  pub async fn get_all(&self) -> Vec<ProcessInfo> {
    self.processes.lock().await.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_stage_lifecycle() {
    let tracker = ProcessTracker::new();
    tracker.start("screening", 10).await.unwrap();
    tracker.complete(4, 1).await.unwrap();

    let stages = tracker.get_all().await;
    assert_eq!(stages.len(), 1);

    let stage = &stages[0];
    assert_eq!(stage.process_name, "screening");
    assert_eq!(stage.state, ProcessState::CompletedWithErrors);
    assert_eq!(stage.records_out, 4);
    assert_eq!(stage.records_dropped(), 5);
    assert!(stage.end_time.is_some());
  }

  #[tokio::test]
  async fn test_clean_stage_is_success() {
    let tracker = ProcessTracker::new();
    tracker.start("valuation", 3).await.unwrap();
    tracker.complete(3, 0).await.unwrap();

    assert_eq!(tracker.get_all().await[0].state, ProcessState::Success);
  }

  #[tokio::test]
  async fn test_fail_records_message_on_last_stage() {
    let tracker = ProcessTracker::new();
    tracker.start("increment_filter", 5).await.unwrap();
    tracker.complete(5, 0).await.unwrap();
    tracker.start("screening", 5).await.unwrap();

    let shared = tracker.clone();
    shared.fail("timeout").await.unwrap();

    let stages = tracker.get_all().await;
    assert_eq!(stages[0].state, ProcessState::Success);
    assert_eq!(stages[1].state, ProcessState::Failed);
    assert_eq!(stages[1].error_message.as_deref(), Some("timeout"));
  }
}
