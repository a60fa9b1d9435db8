use rfocus::models::daily_record::{DailyRecord, SessionEntry};
use rfocus::store::DailyStats;
use rfocus::ui::charts::{
    SLOTS_PER_DAY, alert_frequency, histogram, render_all, runtime_trend, timeline_row,
};
use rfocus::ui::report::{history_table, totals_line};

fn session(start: &str, end: &str, duration: &str) -> SessionEntry {
    SessionEntry {
        start_time: start.into(),
        end_time: end.into(),
        duration: duration.into(),
    }
}

fn record(total: &str, alerts: usize, sessions: Vec<SessionEntry>) -> DailyRecord {
    DailyRecord {
        total_time: total.into(),
        alert_times: vec!["10:00:00".to_string(); alerts],
        work_sessions: sessions,
    }
}

fn sample() -> DailyStats {
    let mut stats = DailyStats::new();
    stats.insert(
        "2025-03-03",
        record("02:00:00", 4, vec![session("09:00:00", "11:00:00", "02:00:00")]),
    );
    stats.insert(
        "2025-03-04",
        record("01:00:00", 2, vec![session("14:00:00", "15:00:00", "01:00:00")]),
    );
    stats
}

#[test]
fn histogram_spreads_values_over_bins() {
    let bins = histogram(&[0.0, 1.0, 5.0, 10.0], 10);
    assert_eq!(bins.len(), 10);
    assert_eq!(bins[0].2, 1);
    assert_eq!(bins[1].2, 1);
    assert_eq!(bins[5].2, 1);
    assert_eq!(bins[9].2, 1);
    assert_eq!(bins.iter().map(|b| b.2).sum::<usize>(), 4);
    assert!((bins[9].1 - 10.0).abs() < 1e-9);
}

#[test]
fn histogram_single_value_and_empty() {
    let bins = histogram(&[2.0, 2.0, 2.0], 10);
    assert_eq!(bins.iter().map(|b| b.2).sum::<usize>(), 3);
    assert!((bins[0].0 - 1.5).abs() < 1e-9);
    assert!((bins[9].1 - 2.5).abs() < 1e-9);

    assert!(histogram(&[], 10).is_empty());
}

#[test]
fn timeline_marks_half_hour_slots() {
    let day = record("01:00:00", 0, vec![session("09:00:00", "10:00:00", "01:00:00")]);
    let row: Vec<char> = timeline_row(&day).chars().collect();

    assert_eq!(row.len(), SLOTS_PER_DAY);
    assert_eq!(row[18], '█');
    assert_eq!(row[19], '█');
    assert_eq!(row[17], '·');
    assert_eq!(row[20], '·');
}

#[test]
fn timeline_clips_sessions_past_midnight() {
    let day = record("02:00:00", 0, vec![session("23:00:00", "01:00:00", "02:00:00")]);
    let row: Vec<char> = timeline_row(&day).chars().collect();

    assert_eq!(row[46], '█');
    assert_eq!(row[47], '█');
    assert_eq!(row[0], '·');
}

#[test]
fn bars_scale_to_the_largest_day() {
    let stats = sample();
    let days = stats.filtered(None);

    let trend = runtime_trend(&days);
    assert!(trend.contains("2025-03-03 │"));
    assert!(trend.contains("2.00h"));
    assert!(trend.contains("1.00h"));
    let full = trend.lines().find(|l| l.starts_with("2025-03-03")).unwrap();
    assert_eq!(full.matches('█').count(), 40);

    let alerts = alert_frequency(&days);
    let half = alerts.lines().find(|l| l.starts_with("2025-03-04")).unwrap();
    assert_eq!(half.matches('█').count(), 20);
}

#[test]
fn history_table_is_newest_first() {
    let stats = sample();
    let days = stats.filtered(None);
    let table = history_table(&days);

    let newest = table.find("2025-03-04").unwrap();
    let oldest = table.find("2025-03-03").unwrap();
    assert!(newest < oldest);
    assert!(table.starts_with("Date"));
    assert_eq!(
        totals_line(&days),
        "2 day(s), 03:00:00 total, 6 alert(s), 2 session(s)"
    );
}

#[test]
fn render_all_without_data() {
    let stats = DailyStats::new();
    assert_eq!(
        render_all(&stats.filtered(None)),
        "No statistics recorded yet.\n"
    );
}
