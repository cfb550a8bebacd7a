//! Error types for cadence-player
//!
//! Track validation errors are kept separate from controller errors so
//! construction failures can name the offending input.

use std::time::Duration;
use thiserror::Error;

/// Track validation errors, raised only at track construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// Track name is empty
    #[error("Track name is empty")]
    EmptyName,

    /// Track is shorter than the allowed minimum
    #[error("Track duration {duration:?} is shorter than {minimum:?}")]
    TooShort { duration: Duration, minimum: Duration },
}

/// Main error type for cadence-player
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid track while seeding the initial playlist
    #[error("Invalid initial track at index {index}: {source}")]
    InvalidInitialTrack {
        index: usize,
        #[source]
        source: TrackError,
    },

    /// Operation needs at least one track
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] cadence_common::Error),
}

/// Convenience Result type using cadence-player Error
pub type Result<T> = std::result::Result<T, Error>;
