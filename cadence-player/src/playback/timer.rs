//! Background timer task
//!
//! While playback is active exactly one timer task runs per player. It waits,
//! without holding the state lock, on cancellation of the caller's token, a
//! pause signal, release of its session, or the current track running out.
//! Each event is applied under the lock, and only while the task's session
//! is still the current one; a superseded task exits without touching state.
//!
//! Stop is applied in the foreground: `next`/`prev` reset the flags, bump the
//! session and drop the [`TimerHandle`], which wakes the task so it can exit.
//!
//! The task only holds a weak reference to the player state, so dropping the
//! last [`Player`](super::Player) handle also ends playback.

use std::sync::Weak;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::controller::PlayerInner;

/// Sending half kept in player state for the active session
///
/// Consumed by a pause, so a session sees at most one. Dropping it releases
/// the session.
#[derive(Debug)]
pub(super) struct TimerHandle {
    pause_tx: oneshot::Sender<()>,
}

impl TimerHandle {
    /// Ask the timer to pause, without blocking
    pub(super) fn pause(self) {
        if self.pause_tx.send(()).is_err() {
            debug!("Timer already exited, pause dropped");
        }
    }
}

enum TimerEvent {
    Cancelled,
    Released,
    Paused(Duration),
    Expired,
}

struct TimerTask {
    shared: Weak<Mutex<PlayerInner>>,
    session: u64,
    cancel: CancellationToken,
    pause_rx: oneshot::Receiver<()>,
    started_at: Instant,
    remaining: Duration,
}

/// Spawn the timer task for `session`
///
/// `remaining` is what is left of the current track, measured from
/// `started_at`.
pub(super) fn spawn_timer(
    shared: Weak<Mutex<PlayerInner>>,
    session: u64,
    cancel: CancellationToken,
    started_at: Instant,
    remaining: Duration,
) -> TimerHandle {
    let (pause_tx, pause_rx) = oneshot::channel();

    let task = TimerTask {
        shared,
        session,
        cancel,
        pause_rx,
        started_at,
        remaining,
    };
    tokio::spawn(task.run());

    TimerHandle { pause_tx }
}

impl TimerTask {
    async fn run(mut self) {
        debug!(session = self.session, remaining = ?self.remaining, "Timer started");

        loop {
            let event = self.wait().await;
            if let TimerEvent::Released = event {
                debug!(session = self.session, "Session released, exiting");
                return;
            }

            let Some(shared) = self.shared.upgrade() else {
                debug!(session = self.session, "Player dropped, exiting");
                return;
            };
            let mut inner = shared.lock().await;
            if inner.session != self.session {
                debug!(session = self.session, "Timer superseded, exiting");
                return;
            }

            match event {
                TimerEvent::Cancelled => {
                    debug!(session = self.session, "Playback cancelled");
                    inner.elapsed = Duration::ZERO;
                    inner.finish_session();
                    return;
                }
                TimerEvent::Paused(played) => {
                    inner.elapsed = inner.elapsed.saturating_add(played);
                    debug!(session = self.session, elapsed = ?inner.elapsed, "Playback paused");
                    inner.finish_session();
                    return;
                }
                TimerEvent::Expired => {
                    inner.elapsed = Duration::ZERO;

                    if !inner.playlist.has_next() {
                        info!("End of playlist reached, returning to first track");
                        inner.playlist.reset_to_head();
                        inner.finish_session();
                        return;
                    }
                    inner.playlist.step_forward();

                    let Some(track) = inner.playlist.current_track() else {
                        inner.finish_session();
                        return;
                    };
                    info!("Now playing: {}", track);

                    self.remaining = track.duration();
                    self.started_at = Instant::now();
                    inner.started_at = Some(self.started_at);
                }
                TimerEvent::Released => unreachable!("handled before locking"),
            }
        }
    }

    /// The only suspension point: first of cancel, pause/release, deadline
    async fn wait(&mut self) -> TimerEvent {
        let started_at = self.started_at;
        // Past the clock's range: tokio clamps a relative sleep instead
        let expiry = match started_at.checked_add(self.remaining) {
            Some(deadline) => time::sleep_until(deadline),
            None => time::sleep(self.remaining),
        };

        tokio::select! {
            biased;

            _ = self.cancel.cancelled() => TimerEvent::Cancelled,
            signal = &mut self.pause_rx => match signal {
                Ok(()) => TimerEvent::Paused(started_at.elapsed()),
                Err(_) => TimerEvent::Released,
            },
            _ = expiry => TimerEvent::Expired,
        }
    }
}
