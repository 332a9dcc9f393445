use async_trait::async_trait;
use kino_model::ProgressReport;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::sink::ProgressSink;
use crate::error::{KinoError, Result};

/// In-memory sink that records every attempt.
#[derive(Debug, Default)]
pub struct RecordingSink {
    attempts: Mutex<Vec<ProgressReport>>,
    delivered: Mutex<Vec<ProgressReport>>,
    failures_left: AtomicUsize,
    delay: Option<Duration>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the first `count` attempts with `RemoteUnavailable`.
    pub fn failing_first(count: usize) -> Self {
        Self {
            failures_left: AtomicUsize::new(count),
            ..Self::default()
        }
    }

    /// Hold every attempt open for `delay` before succeeding.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<ProgressReport> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn delivered(&self) -> Vec<ProgressReport> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn positions(&self) -> Vec<u64> {
        self.attempts()
            .iter()
            .map(|r| r.current_position)
            .collect()
    }
}

#[async_trait]
impl ProgressSink for RecordingSink {
    async fn update_progress(&self, report: &ProgressReport) -> Result<()> {
        self.attempts.lock().unwrap().push(report.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let failing = self
            .failures_left
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| {
                left.checked_sub(1)
            })
            .is_ok();
        if failing {
            return Err(KinoError::remote("simulated outage"));
        }
        self.delivered.lock().unwrap().push(report.clone());
        Ok(())
    }
}
