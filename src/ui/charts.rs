//! Plain-text charts for the statistics views.

use crate::models::daily_record::DailyRecord;
use crate::utils::formatting::pad_right;
use crate::utils::time::parse_clock;
use chrono::{DateTime, Local, Timelike};

pub const BAR_WIDTH: usize = 40;
pub const SLOTS_PER_DAY: usize = 48;
pub const HISTOGRAM_BINS: usize = 10;

const SECS_PER_DAY: usize = 86_400;
const FULL: char = '█';
const EMPTY_SLOT: char = '·';

/// A stats entry as yielded by `DailyStats::filtered`.
pub type DayRow<'a> = (&'a String, &'a DailyRecord);

fn bar(value: f64, max: f64, width: usize) -> String {
    if value <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    FULL.to_string().repeat(cells.clamp(1, width))
}

pub fn runtime_trend(days: &[DayRow<'_>]) -> String {
    let hours: Vec<f64> = days
        .iter()
        .map(|(_, d)| d.total_seconds() as f64 / 3600.0)
        .collect();
    let max = hours.iter().copied().fold(0.0, f64::max);

    let mut out = String::from("Daily work time (hours)\n");
    for ((date, _), h) in days.iter().zip(&hours) {
        out.push_str(&format!(
            "{} │{} {:.2}h\n",
            date,
            pad_right(&bar(*h, max, BAR_WIDTH), BAR_WIDTH),
            h
        ));
    }
    out
}

pub fn alert_frequency(days: &[DayRow<'_>]) -> String {
    let max = days.iter().map(|(_, d)| d.alert_count()).max().unwrap_or(0) as f64;

    let mut out = String::from("Alerts per day\n");
    for (date, day) in days {
        let count = day.alert_count();
        out.push_str(&format!(
            "{} │{} {}\n",
            date,
            pad_right(&bar(count as f64, max, BAR_WIDTH), BAR_WIDTH),
            count
        ));
    }
    out
}

/// One character per half hour, `█` where a work session was running.
/// A session whose end clock is before its start ran past midnight and is
/// drawn up to the end of the row.
pub fn timeline_row(day: &DailyRecord) -> String {
    let slot_secs = SECS_PER_DAY / SLOTS_PER_DAY;
    let mut slots = vec![false; SLOTS_PER_DAY];

    for session in &day.work_sessions {
        let (Some(start), Some(end)) = (
            parse_clock(&session.start_time),
            parse_clock(&session.end_time),
        ) else {
            continue;
        };

        let from = start.num_seconds_from_midnight() as usize;
        let to = if end >= start {
            end.num_seconds_from_midnight() as usize
        } else {
            SECS_PER_DAY
        };

        let first = from / slot_secs;
        let last = if to > from { (to - 1) / slot_secs } else { first };
        for slot in slots
            .iter_mut()
            .take(last.min(SLOTS_PER_DAY - 1) + 1)
            .skip(first)
        {
            *slot = true;
        }
    }

    slots
        .iter()
        .map(|&on| if on { FULL } else { EMPTY_SLOT })
        .collect()
}

fn timeline_axis() -> String {
    (0..24)
        .step_by(4)
        .map(|h| format!("{:<8}", format!("{:02}", h)))
        .collect()
}

pub fn session_timeline(days: &[DayRow<'_>]) -> String {
    let with_sessions: Vec<&DayRow<'_>> = days
        .iter()
        .filter(|(_, d)| !d.work_sessions.is_empty())
        .collect();

    let mut out = String::from("Work sessions over the day (one cell = 30 min)\n");
    if with_sessions.is_empty() {
        out.push_str("No work sessions recorded.\n");
        return out;
    }

    out.push_str(&format!("{}  {}\n", " ".repeat(10), timeline_axis()));
    for (date, day) in with_sessions {
        out.push_str(&format!("{} │{}\n", date, timeline_row(day)));
    }
    out
}

/// Equal-width bins over the value range: `(low, high, count)`.
/// A single distinct value gets a range of one unit centred on it.
pub fn histogram(values: &[f64], bins: usize) -> Vec<(f64, f64, usize)> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| (lo + i as f64 * width, lo + (i + 1) as f64 * width, c))
        .collect()
}

pub fn duration_histogram(days: &[DayRow<'_>]) -> String {
    let durations: Vec<f64> = days
        .iter()
        .flat_map(|(_, d)| d.work_sessions.iter())
        .map(|s| s.duration_seconds() as f64 / 3600.0)
        .collect();

    let mut out = String::from("Work session length (hours)\n");
    let bins = histogram(&durations, HISTOGRAM_BINS);
    if bins.is_empty() {
        out.push_str("No work sessions recorded.\n");
        return out;
    }

    let max = bins.iter().map(|b| b.2).max().unwrap_or(0) as f64;
    for (low, high, count) in bins {
        out.push_str(&format!(
            "{:>5.2}-{:<5.2} │{} {}\n",
            low,
            high,
            pad_right(&bar(count as f64, max, BAR_WIDTH), BAR_WIDTH),
            count
        ));
    }
    out
}

pub fn alert_list(alerts: &[DateTime<Local>]) -> String {
    if alerts.is_empty() {
        return "No alerts yet in this session.\n".to_string();
    }

    alerts
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{:>3}. {}\n", i + 1, t.format("%Y-%m-%d %H:%M:%S")))
        .collect()
}

pub fn render_all(days: &[DayRow<'_>]) -> String {
    if days.is_empty() {
        return "No statistics recorded yet.\n".to_string();
    }

    [
        runtime_trend(days),
        alert_frequency(days),
        session_timeline(days),
        duration_histogram(days),
    ]
    .join("\n")
}
