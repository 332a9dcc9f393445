//! Timer-driven progress reporting for an active playback session.
//!
//! Position updates from the player land in a [`PositionHolder`] and never
//! touch the network. A single recurring tick task reads the holder on a
//! fixed cadence and fires one report per tick; lifecycle transitions
//! (pause, end, media change, teardown) cancel the task and flush the latest
//! position immediately. Network volume is therefore bounded by one report
//! per interval plus one per transition, whatever the player's event rate.

use kino_model::{MediaId, ViewerId};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use super::events::{PlayerEvent, ReportTrigger};
use super::session::{PlaybackSession, SessionState};
use super::sink::{ProgressSink, send_best_effort};

/// Cadence used when none is configured.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(30);

/// Shortest cadence the ticker accepts.
pub const MIN_REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Wall-clock time between interval reports while playing
    pub interval: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

impl ReporterConfig {
    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }
}

/// Relays a viewer's playback progress to a [`ProgressSink`].
///
/// Must be used from within a Tokio runtime. Dropping the reporter aborts
/// the tick task; use [`PlaybackProgressReporter::terminate`] first when the
/// final position should be delivered.
#[derive(Debug)]
pub struct PlaybackProgressReporter {
    sink: Arc<dyn ProgressSink>,
    config: ReporterConfig,
    session: PlaybackSession,
    ticker: Option<JoinHandle<()>>,
}

impl PlaybackProgressReporter {
    pub fn new(
        sink: Arc<dyn ProgressSink>,
        viewer_id: ViewerId,
        media_id: MediaId,
        config: ReporterConfig,
    ) -> Self {
        let session = PlaybackSession::new(viewer_id, media_id);
        Self::with_session(sink, session, config)
    }

    pub fn with_session(
        sink: Arc<dyn ProgressSink>,
        session: PlaybackSession,
        config: ReporterConfig,
    ) -> Self {
        info!(
            viewer_id = %session.viewer_id(),
            media_id = %session.media_id(),
            interval_secs = config.interval.as_secs(),
            "playback session created"
        );
        Self {
            sink,
            config,
            session,
            ticker: None,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn position(&self) -> u64 {
        self.session.position()
    }

    /// Whether the recurring tick task is running.
    pub fn is_reporting(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Dispatch one player event.
    pub async fn handle(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Play => self.on_play(),
            PlayerEvent::Pause => self.on_pause().await,
            PlayerEvent::TimeUpdate(seconds) => self.on_time_update(seconds),
            PlayerEvent::Seeked(seconds) => self.on_seek(seconds),
            PlayerEvent::Ended => self.on_ended().await,
            PlayerEvent::MediaSelected(media_id) => {
                self.select_media(media_id).await
            }
        }
    }

    /// Player started or resumed playback.
    pub fn on_play(&mut self) {
        self.session.set_state(SessionState::Playing);
        self.start_ticker();
    }

    /// Player paused. Stops the ticker and flushes the latest position; a
    /// no-op when no ticker is running.
    pub async fn on_pause(&mut self) {
        self.session.set_state(SessionState::Paused);
        self.stop(ReportTrigger::Pause).await;
    }

    /// Player reached the end. Same stop semantics as a pause.
    pub async fn on_ended(&mut self) {
        self.session.set_state(SessionState::Ended);
        self.stop(ReportTrigger::Ended).await;
    }

    /// Store the latest player offset without reporting it.
    pub fn on_time_update(&self, seconds: f64) {
        self.session.observe(seconds);
    }

    pub fn on_seek(&self, seconds: f64) {
        self.session.seek(seconds);
    }

    /// Viewer navigated away or the host is closing. Delivers the last
    /// observed position regardless of state.
    pub async fn terminate(&mut self) {
        self.stop_ticker();
        self.flush(ReportTrigger::Teardown).await;
        info!(
            media_id = %self.session.media_id(),
            position = self.session.position(),
            "playback session torn down"
        );
    }

    /// Switch to different media: flush the old session, then reset.
    pub async fn select_media(&mut self, media_id: MediaId) {
        if &media_id == self.session.media_id() {
            return;
        }
        self.stop_ticker();
        self.flush(ReportTrigger::MediaChanged).await;
        info!(
            from = %self.session.media_id(),
            to = %media_id,
            "playback media changed"
        );
        self.session.switch_media(media_id);
    }

    /// Start the recurring tick task. No-op when one is already running.
    fn start_ticker(&mut self) {
        if self.is_reporting() {
            debug!("progress ticker already running");
            return;
        }

        let sink = Arc::clone(&self.sink);
        let session = self.session.clone();
        let period = self.config.interval.max(MIN_REPORT_INTERVAL);
        // First report one full period after playback starts.
        let first_tick = Instant::now() + period;

        self.ticker = Some(tokio::spawn(async move {
            let mut ticks = interval_at(first_tick, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let report = session.report();
                let sink = Arc::clone(&sink);
                // Fire-and-forget: the next tick never waits on this one.
                tokio::spawn(async move {
                    send_best_effort(
                        sink.as_ref(),
                        &report,
                        ReportTrigger::Interval,
                    )
                    .await;
                });
            }
        }));
        debug!(media_id = %self.session.media_id(), "progress ticker started");
    }

    /// Cancel the tick task if any. Returns whether one was running.
    fn stop_ticker(&mut self) -> bool {
        match self.ticker.take() {
            Some(handle) => {
                handle.abort();
                debug!(
                    media_id = %self.session.media_id(),
                    "progress ticker stopped"
                );
                true
            }
            None => false,
        }
    }

    /// Tear down the ticker, then report the position held at this moment.
    /// Stopping an idle reporter does nothing.
    async fn stop(&mut self, trigger: ReportTrigger) {
        if self.stop_ticker() {
            self.flush(trigger).await;
        } else {
            debug!(trigger = trigger.as_str(), "no ticker running");
        }
    }

    /// Report the position held right now and wait for the attempt.
    async fn flush(&self, trigger: ReportTrigger) {
        let report = self.session.report();
        send_best_effort(self.sink.as_ref(), &report, trigger).await;
    }
}

impl Drop for PlaybackProgressReporter {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
