use chrono::{DateTime, Utc};

use crate::{MediaId, ViewerId};

/// Telemetry message recording how far into a piece of media a viewer has
/// watched.
///
/// `reported_at` is stamped when the report is built so the receiving side
/// can discard a report that arrives after a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProgressReport {
    pub viewer_id: ViewerId,
    pub media_id: MediaId,
    /// Whole seconds into the media
    pub current_position: u64,
    pub reported_at: DateTime<Utc>,
}

impl ProgressReport {
    pub fn new(
        viewer_id: ViewerId,
        media_id: MediaId,
        current_position: u64,
    ) -> Self {
        Self {
            viewer_id,
            media_id,
            current_position,
            reported_at: Utc::now(),
        }
    }
}

/// Convert a player timestamp into whole seconds.
///
/// Negative and non-finite inputs have no meaningful position and map to
/// `None`.
pub fn whole_seconds(seconds: f64) -> Option<u64> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(seconds.floor() as u64)
}
