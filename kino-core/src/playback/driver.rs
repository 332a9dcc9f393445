use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, warn};

use super::events::PlayerEvent;
use super::reporter::PlaybackProgressReporter;

/// Player event queue depth for [`SessionHandle::attach`].
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Drive a reporter from player events until the stream closes or the host
/// signals teardown, then deliver the final position.
///
/// Every exit path goes through [`PlaybackProgressReporter::terminate`].
pub async fn run_session(
    mut reporter: PlaybackProgressReporter,
    mut events: mpsc::Receiver<PlayerEvent>,
    shutdown: CancellationToken,
) -> PlaybackProgressReporter {
    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                debug!("host signalled teardown");
                // Position updates already queued are part of what was
                // observed before the page went away.
                while let Ok(event) = events.try_recv() {
                    match event {
                        PlayerEvent::TimeUpdate(seconds) => {
                            reporter.on_time_update(seconds)
                        }
                        PlayerEvent::Seeked(seconds) => reporter.on_seek(seconds),
                        _ => {}
                    }
                }
                break;
            }
            event = events.recv() => match event {
                Some(event) => reporter.handle(event).await,
                None => {
                    debug!("player event stream closed");
                    break;
                }
            },
        }
    }

    reporter.terminate().await;
    reporter
}

/// Scoped listener registration for one playback view.
///
/// Attaching spawns the event loop; closing or dropping the handle signals
/// teardown so the final flush happens on every exit path.
#[derive(Debug)]
pub struct SessionHandle {
    events: mpsc::Sender<PlayerEvent>,
    shutdown: CancellationToken,
    task: JoinHandle<PlaybackProgressReporter>,
    _teardown: DropGuard,
}

impl SessionHandle {
    pub fn attach(reporter: PlaybackProgressReporter, buffer: usize) -> Self {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(run_session(reporter, rx, shutdown.clone()));
        Self {
            events: tx,
            _teardown: shutdown.clone().drop_guard(),
            shutdown,
            task,
        }
    }

    /// Forward a player event to the session loop.
    pub async fn send(
        &self,
        event: PlayerEvent,
    ) -> Result<(), SendError<PlayerEvent>> {
        self.events.send(event).await
    }

    /// Sender for player callbacks that outlive a borrow of the handle.
    pub fn sender(&self) -> mpsc::Sender<PlayerEvent> {
        self.events.clone()
    }

    /// Token representing "page is going away"; cancel it from a host
    /// signal (tab close, reload, process shutdown).
    pub fn teardown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Navigate away: signal teardown and wait for the final flush.
    pub async fn close(self) -> Option<PlaybackProgressReporter> {
        self.shutdown.cancel();
        match self.task.await {
            Ok(reporter) => Some(reporter),
            Err(e) => {
                warn!("playback session task failed: {}", e);
                None
            }
        }
    }
}
