//! Track values

use cadence_common::human_time::format_duration;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::error::TrackError;

/// Shortest track accepted by [`Track::new`]
pub const MIN_TRACK_DURATION: Duration = Duration::from_secs(1);

/// A named playable item with a fixed duration
///
/// Immutable once built; the name is never empty and the duration is at
/// least [`MIN_TRACK_DURATION`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    name: String,
    duration: Duration,
}

impl Track {
    /// Validate and build a track
    pub fn new(name: impl Into<String>, duration: Duration) -> Result<Self, TrackError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TrackError::EmptyName);
        }
        if duration < MIN_TRACK_DURATION {
            return Err(TrackError::TooShort {
                duration,
                minimum: MIN_TRACK_DURATION,
            });
        }
        Ok(Self { name, duration })
    }

    /// Sub-second tracks for timing tests
    #[cfg(test)]
    pub(crate) fn unchecked(name: &str, duration: Duration) -> Self {
        assert!(!duration.is_zero());
        Self {
            name: name.to_string(),
            duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, format_duration(self.duration))
    }
}
