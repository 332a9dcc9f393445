//! Playback progress tracking and reporting.

pub mod driver;
pub mod events;
pub mod reporter;
pub mod session;
pub mod sink;

#[cfg(test)]
mod testing;

pub use driver::{DEFAULT_EVENT_BUFFER, SessionHandle, run_session};
pub use events::{PlayerEvent, ReportTrigger};
pub use reporter::{
    DEFAULT_REPORT_INTERVAL, MIN_REPORT_INTERVAL, PlaybackProgressReporter,
    ReporterConfig,
};
pub use session::{PlaybackSession, PositionHolder, SessionState};
pub use sink::ProgressSink;
