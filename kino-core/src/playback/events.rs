use kino_model::MediaId;

/// Player and host-environment signals that drive a progress reporter.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Play,
    Pause,
    /// High-frequency position update, in fractional seconds
    TimeUpdate(f64),
    /// Explicit user seek, in fractional seconds
    Seeked(f64),
    Ended,
    /// Viewer picked a different episode/title in the same view
    MediaSelected(MediaId),
}

/// Why a progress report was sent; used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTrigger {
    Interval,
    Pause,
    Ended,
    MediaChanged,
    Teardown,
}

impl ReportTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportTrigger::Interval => "interval",
            ReportTrigger::Pause => "pause",
            ReportTrigger::Ended => "ended",
            ReportTrigger::MediaChanged => "media_changed",
            ReportTrigger::Teardown => "teardown",
        }
    }
}
