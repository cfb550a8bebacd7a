//! Playback controller
//!
//! Owns the playlist and the playback flags behind a single lock, and
//! starts the timer task that advances through the playlist.
//!
//! State machine:
//! - `Idle --play--> Playing` (playlist not empty, not already playing)
//! - `Playing --pause--> Idle` (elapsed kept for resume)
//! - `Playing --cancel/stop--> Idle` (elapsed discarded)
//! - `Playing --expiry, has next--> Playing` (next track, elapsed reset)
//! - `Playing --expiry, at tail--> Idle` (cursor back to head, elapsed reset)

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::playlist::Playlist;
use super::state::{PlaybackSnapshot, PlaybackState};
use super::timer::{spawn_timer, TimerHandle};
use super::track::Track;
use crate::error::{Error, Result};

/// State shared between the player handle and its timer task
#[derive(Debug)]
pub(super) struct PlayerInner {
    pub(super) playlist: Playlist,
    pub(super) is_playing: bool,
    pub(super) elapsed: Duration,
    pub(super) started_at: Option<Instant>,
    /// Generation of the timer task allowed to mutate state
    pub(super) session: u64,
    pub(super) timer: Option<TimerHandle>,
}

impl PlayerInner {
    fn new(playlist: Playlist) -> Self {
        Self {
            playlist,
            is_playing: false,
            elapsed: Duration::ZERO,
            started_at: None,
            session: 0,
            timer: None,
        }
    }

    /// Clear the playing flags when the active timer exits
    pub(super) fn finish_session(&mut self) {
        self.is_playing = false;
        self.started_at = None;
        self.timer = None;
    }

    /// Tear down the active session from the foreground
    ///
    /// Bumps the session first so the old timer cannot touch state after
    /// this returns. Never blocks, with or without a running timer.
    fn stop_session(&mut self) {
        self.session = self.session.wrapping_add(1);
        self.is_playing = false;
        self.elapsed = Duration::ZERO;
        self.started_at = None;
        // Dropping the handle releases the old timer
        self.timer = None;
    }

    fn position(&self) -> Duration {
        let running = self
            .started_at
            .map(|started| started.elapsed())
            .unwrap_or(Duration::ZERO);
        let position = self.elapsed.saturating_add(running);
        match self.playlist.current_track() {
            Some(track) => position.min(track.duration()),
            None => position,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Skip {
    Forward,
    Backward,
}

/// Playback controller handle
///
/// Cheap to clone; all clones drive the same playlist and timer.
#[derive(Debug, Clone)]
pub struct Player {
    inner: Arc<Mutex<PlayerInner>>,
}

impl Player {
    /// Create a player over already validated tracks, in order
    ///
    /// The cursor starts on the first track.
    pub fn new(tracks: impl IntoIterator<Item = Track>) -> Self {
        Self::with_playlist(tracks.into_iter().collect())
    }

    /// Create a player from raw `(name, duration)` pairs
    ///
    /// Fails on the first invalid entry, reporting its index.
    pub fn try_new<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Duration)>,
        S: Into<String>,
    {
        let tracks = specs
            .into_iter()
            .enumerate()
            .map(|(index, (name, duration))| {
                Track::new(name, duration)
                    .map_err(|source| Error::InvalidInitialTrack { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(tracks))
    }

    fn with_playlist(playlist: Playlist) -> Self {
        debug!("Creating player with {} tracks", playlist.len());
        Self {
            inner: Arc::new(Mutex::new(PlayerInner::new(playlist))),
        }
    }

    /// Start or resume playback of the track under the cursor
    ///
    /// No-op when the playlist is empty or playback is already running.
    /// Cancelling `cancel` stops playback and discards the resume point.
    pub async fn play(&self, cancel: &CancellationToken) -> Result<()> {
        let mut inner = self.inner.lock().await;
        self.play_locked(&mut inner, cancel)
    }

    /// Pause playback, keeping the resume point
    ///
    /// Returns once the timer has been signalled; the timer records the
    /// elapsed time and clears the playing flag shortly after.
    pub async fn pause(&self) {
        let mut inner = self.inner.lock().await;
        if !inner.is_playing {
            debug!("Pause ignored, not playing");
            return;
        }

        match inner.timer.take() {
            Some(timer) => timer.pause(),
            None => debug!("Pause already pending"),
        }
    }

    /// Append a track to the end of the playlist
    pub async fn add_song(&self, track: Track) {
        let mut inner = self.inner.lock().await;
        debug!("Adding track: {}", track);
        inner.playlist.append(track);
    }

    /// Skip to the following track and play it
    ///
    /// On the last track the cursor stays there and the track restarts.
    pub async fn next(&self, cancel: &CancellationToken) -> Result<()> {
        let mut inner = self.inner.lock().await;
        self.skip_locked(&mut inner, Skip::Forward, cancel)
    }

    /// Skip to the preceding track and play it
    ///
    /// On the first track the cursor stays there and the track restarts.
    pub async fn prev(&self, cancel: &CancellationToken) -> Result<()> {
        let mut inner = self.inner.lock().await;
        self.skip_locked(&mut inner, Skip::Backward, cancel)
    }

    fn play_locked(&self, inner: &mut PlayerInner, cancel: &CancellationToken) -> Result<()> {
        if inner.is_playing {
            debug!("Play ignored, already playing");
            return Ok(());
        }

        let Some(duration) = inner.playlist.current_track().map(Track::duration) else {
            debug!("Play ignored, playlist is empty");
            return Ok(());
        };

        // Resume point already at or past the end: move on instead
        if inner.elapsed >= duration {
            debug!(elapsed = ?inner.elapsed, "Resume point past end of track, skipping");
            return self.skip_locked(inner, Skip::Forward, cancel);
        }

        let started_at = Instant::now();
        inner.session = inner.session.wrapping_add(1);
        inner.is_playing = true;
        inner.started_at = Some(started_at);

        let remaining = duration - inner.elapsed;
        inner.timer = Some(spawn_timer(
            Arc::downgrade(&self.inner),
            inner.session,
            cancel.clone(),
            started_at,
            remaining,
        ));

        if let Some(track) = inner.playlist.current_track() {
            info!("Playing: {} (from {:?})", track, inner.elapsed);
        }
        Ok(())
    }

    fn skip_locked(
        &self,
        inner: &mut PlayerInner,
        skip: Skip,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if inner.playlist.is_empty() {
            return Err(Error::EmptyPlaylist);
        }

        inner.stop_session();

        let moved = match skip {
            Skip::Forward => inner.playlist.step_forward(),
            Skip::Backward => inner.playlist.step_backward(),
        };
        if !moved {
            debug!(?skip, "Already at end of playlist, restarting current track");
        }

        self.play_locked(inner, cancel)
    }

    /// Current state, position and track
    pub async fn snapshot(&self) -> PlaybackSnapshot {
        let inner = self.inner.lock().await;
        PlaybackSnapshot {
            state: if inner.is_playing {
                PlaybackState::Playing
            } else {
                PlaybackState::Idle
            },
            elapsed: inner.elapsed,
            position: inner.position(),
            current: inner.playlist.current_track().cloned(),
            cursor: inner.playlist.cursor_position(),
            track_count: inner.playlist.len(),
        }
    }

    pub async fn is_playing(&self) -> bool {
        self.inner.lock().await.is_playing
    }

    /// Accumulated elapsed time of the current track (excludes a running segment)
    pub async fn elapsed(&self) -> Duration {
        self.inner.lock().await.elapsed
    }

    pub async fn current_track(&self) -> Option<Track> {
        self.inner.lock().await.playlist.current_track().cloned()
    }

    pub async fn cursor_position(&self) -> Option<usize> {
        self.inner.lock().await.playlist.cursor_position()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.playlist.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.playlist.is_empty()
    }

    /// Tracks in playback order
    pub async fn tracks(&self) -> Vec<Track> {
        self.inner.lock().await.playlist.iter().cloned().collect()
    }

    /// Copy of the playlist, links and cursor included
    pub async fn playlist(&self) -> Playlist {
        self.inner.lock().await.playlist.clone()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::with_playlist(Playlist::new())
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
