//! Human-readable duration formatting
//!
//! Provides consistent duration display for track lengths and playback
//! positions in logs and the runner output.

use std::time::Duration;

/// Format selection thresholds (seconds)
const SHORT_FORMAT_MAX: u64 = 100; // < 100s → X.XXs
const MEDIUM_FORMAT_MAX: u64 = 6000; // < 100m → M:SS
                                     // >= 100m → H:MM:SS

/// Format a duration for display.
///
/// - Short format (`X.XXs`): below 100 seconds, keeps sub-second precision
/// - Medium format (`M:SS`): 100 seconds up to 100 minutes
/// - Long format (`H:MM:SS`): 100 minutes and above
///
/// # Examples
///
/// ```
/// use cadence_common::human_time::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(185)), "3:05");
/// assert_eq!(format_duration(Duration::from_secs(7261)), "2:01:01");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs < SHORT_FORMAT_MAX {
        format!("{:.2}s", duration.as_secs_f64())
    } else if total_secs < MEDIUM_FORMAT_MAX {
        format!("{}:{:02}", total_secs / 60, total_secs % 60)
    } else {
        let hours = total_secs / 3600;
        let mins = (total_secs % 3600) / 60;
        let secs = total_secs % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    }
}

/// Format a playback position against the track length, e.g. `0:42 / 3:05`.
///
/// Both sides use the format chosen for `total` so the column width stays
/// stable while the position advances.
pub fn format_progress(position: Duration, total: Duration) -> String {
    if total.as_secs() < SHORT_FORMAT_MAX {
        format!(
            "{:.2}s / {:.2}s",
            position.as_secs_f64(),
            total.as_secs_f64()
        )
    } else {
        format!("{} / {}", format_clock(position, total), format_duration(total))
    }
}

fn format_clock(position: Duration, total: Duration) -> String {
    let secs = position.as_secs();
    if total.as_secs() < MEDIUM_FORMAT_MAX {
        format!("{}:{:02}", secs / 60, secs % 60)
    } else {
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
