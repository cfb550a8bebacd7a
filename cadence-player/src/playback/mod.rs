//! Playlist, playback controller and timer task

pub mod controller;
pub mod playlist;
pub mod state;
mod timer;
pub mod track;

pub use controller::Player;
pub use playlist::{NodeId, Playlist};
pub use state::{PlaybackSnapshot, PlaybackState};
pub use track::{Track, MIN_TRACK_DURATION};
