use async_trait::async_trait;
use kino_model::ProgressReport;
use std::fmt::Debug;
use tracing::{debug, warn};

use super::events::ReportTrigger;
use crate::error::Result;

/// Remote "update progress" collaborator.
#[async_trait]
pub trait ProgressSink: Send + Sync + Debug {
    /// Deliver one report. Only success or failure is consumed.
    async fn update_progress(&self, report: &ProgressReport) -> Result<()>;
}

/// Send a report, logging and discarding any failure.
///
/// Progress reporting is best-effort telemetry: nothing is retried and
/// nothing reaches the caller.
pub(crate) async fn send_best_effort(
    sink: &dyn ProgressSink,
    report: &ProgressReport,
    trigger: ReportTrigger,
) {
    match sink.update_progress(report).await {
        Ok(()) => debug!(
            media_id = %report.media_id,
            position = report.current_position,
            trigger = trigger.as_str(),
            "progress reported"
        ),
        Err(e) => warn!(
            media_id = %report.media_id,
            position = report.current_position,
            trigger = trigger.as_str(),
            "dropping progress report: {}",
            e
        ),
    }
}
