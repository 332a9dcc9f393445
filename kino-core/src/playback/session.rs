use kino_model::watch::whole_seconds;
use kino_model::{MediaId, ProgressReport, ViewerId};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lifecycle state of one viewing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Playing,
    Paused,
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::Ended => "ended",
        };
        f.write_str(label)
    }
}

/// Latest observed playback offset in whole seconds.
///
/// Written by the time-update path, read by the tick task and the flush
/// paths. Writing never triggers a report.
#[derive(Debug, Clone, Default)]
pub struct PositionHolder(Arc<AtomicU64>);

impl PositionHolder {
    pub fn new(seconds: u64) -> Self {
        Self(Arc::new(AtomicU64::new(seconds)))
    }

    pub fn load(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    pub fn store(&self, seconds: u64) {
        self.0.store(seconds, Ordering::Release);
    }

    /// Move forward only; returns the value now held.
    pub fn advance_to(&self, seconds: u64) -> u64 {
        self.0.fetch_max(seconds, Ordering::AcqRel).max(seconds)
    }
}

/// One active viewing of one media item by one viewer.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    media_id: MediaId,
    viewer_id: ViewerId,
    position: PositionHolder,
    state: SessionState,
}

impl PlaybackSession {
    pub fn new(viewer_id: ViewerId, media_id: MediaId) -> Self {
        Self {
            media_id,
            viewer_id,
            position: PositionHolder::default(),
            state: SessionState::Idle,
        }
    }

    /// Resume an earlier viewing at a known offset.
    pub fn resume_at(
        viewer_id: ViewerId,
        media_id: MediaId,
        seconds: u64,
    ) -> Self {
        Self {
            position: PositionHolder::new(seconds),
            ..Self::new(viewer_id, media_id)
        }
    }

    pub fn media_id(&self) -> &MediaId {
        &self.media_id
    }

    pub fn viewer_id(&self) -> &ViewerId {
        &self.viewer_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }

    pub fn position(&self) -> u64 {
        self.position.load()
    }

    pub(crate) fn position_holder(&self) -> PositionHolder {
        self.position.clone()
    }

    /// Record a player time update.
    ///
    /// While playing the offset never moves backwards; explicit seeks go
    /// through [`PlaybackSession::seek`].
    pub fn observe(&self, seconds: f64) {
        let Some(seconds) = whole_seconds(seconds) else {
            return;
        };
        if self.state == SessionState::Playing {
            self.position.advance_to(seconds);
        } else {
            self.position.store(seconds);
        }
    }

    /// Record an explicit seek, in either direction.
    pub fn seek(&self, seconds: f64) {
        if let Some(seconds) = whole_seconds(seconds) {
            self.position.store(seconds);
        }
    }

    /// Start over on different media. The position resets to zero.
    pub(crate) fn switch_media(&mut self, media_id: MediaId) {
        self.media_id = media_id;
        // A fresh holder so a tick task still alive on the old media can
        // never observe the new offset.
        self.position = PositionHolder::default();
        self.state = SessionState::Idle;
    }

    /// Build a report from the position held right now.
    pub fn report(&self) -> ProgressReport {
        ProgressReport::new(
            self.viewer_id.clone(),
            self.media_id.clone(),
            self.position.load(),
        )
    }
}
