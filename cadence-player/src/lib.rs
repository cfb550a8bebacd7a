//! # Cadence Player Library (cadence-player)
//!
//! Sequential playback controller: an ordered playlist traversed by a
//! cursor, with play/pause/skip operations that stay consistent under
//! concurrent callers and time-driven automatic advancement.
//!
//! **Architecture:** one shared state behind a tokio mutex, plus at most one
//! background timer task per player that owns forward progress while
//! playback is active.

pub mod config;
pub mod error;
pub mod playback;

pub use error::{Error, Result, TrackError};
pub use playback::{PlaybackSnapshot, PlaybackState, Player, Playlist, Track};
