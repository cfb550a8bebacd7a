//! Playback state reporting

use cadence_common::human_time::format_progress;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use super::track::Track;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No timer task running
    Idle,
    /// One timer task owns forward progress
    Playing,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Playing => write!(f, "playing"),
        }
    }
}

/// Point-in-time view of a player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,

    /// Accumulated time from finished play segments (pause/resume cycles)
    pub elapsed: Duration,

    /// `elapsed` plus the running segment, when playing
    pub position: Duration,

    /// Track under the cursor
    pub current: Option<Track>,

    /// Zero-based cursor position
    pub cursor: Option<usize>,

    /// Number of tracks in the playlist
    pub track_count: usize,
}

impl fmt::Display for PlaybackSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.current, self.cursor) {
            (Some(track), Some(cursor)) => write!(
                f,
                "[{}] {}/{} {} {}",
                self.state,
                cursor + 1,
                self.track_count,
                track.name(),
                format_progress(self.position, track.duration())
            ),
            _ => write!(f, "[{}] empty playlist", self.state),
        }
    }
}
