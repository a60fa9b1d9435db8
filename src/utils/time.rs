//! Time utilities: HH:MM:SS conversions, clock formatting, duration helpers.

use chrono::{DateTime, Local, NaiveTime, TimeDelta};

/// Format a number of seconds as `HH:MM:SS`.
///
/// Fractions are truncated, negative values clamp to zero and hours are not
/// wrapped at 24.
pub fn seconds_to_hms(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Parse `HH:MM:SS` back into seconds. Anything that is not exactly three
/// integer fields, or that overflows, yields 0.
pub fn hms_to_seconds(hms: &str) -> u64 {
    let parts: Vec<&str> = hms.trim().split(':').collect();
    if parts.len() != 3 {
        return 0;
    }

    let mut values = [0u64; 3];
    for (slot, part) in values.iter_mut().zip(parts) {
        match part.parse::<u64>() {
            Ok(v) => *slot = v,
            Err(_) => return 0,
        }
    }

    values[0]
        .checked_mul(3600)
        .and_then(|h| values[1].checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(values[2]))
        .unwrap_or(0)
}

pub fn delta_to_hms(delta: TimeDelta) -> String {
    seconds_to_hms(delta_secs(delta))
}

/// Seconds of a delta as float, with millisecond precision.
pub fn delta_secs(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1000.0
}

/// Wall clock of a timestamp, `HH:MM:SS`.
pub fn clock(ts: &DateTime<Local>) -> String {
    ts.format("%H:%M:%S").to_string()
}

pub fn parse_clock(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M:%S").ok()
}
