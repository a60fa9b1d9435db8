use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone};
use rfocus::models::session::{SessionRecord, WorkSpan};
use rfocus::store::log::{ActivityLog, read_entries};
use rfocus::store::{DailyStats, commit_session};
use rfocus::utils::{hms_to_seconds, seconds_to_hms};
use std::env;
use std::fs;
use std::path::PathBuf;

mod common;
use common::{FIXTURE, write_stats};

fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 3, 4, h, m, s).single().unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
}

fn sample_session() -> SessionRecord {
    SessionRecord {
        work_time: TimeDelta::seconds(90),
        alerts: vec![at(9, 0, 30)],
        spans: vec![WorkSpan::closed(at(9, 0, 0), at(9, 1, 30))],
    }
}

fn temp_path(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("rfocus_store_{}.json", name));
    fs::remove_file(&path).ok();
    path
}

#[test]
fn merge_is_additive_per_day() {
    let mut stats = DailyStats::new();
    stats.merge(&day(), &sample_session());
    stats.merge(&day(), &sample_session());

    let rec = stats.get("2025-03-04").unwrap();
    assert_eq!(rec.total_time, "00:03:00");
    assert_eq!(rec.alert_times, vec!["09:00:30", "09:00:30"]);
    assert_eq!(rec.work_sessions.len(), 2);
    assert_eq!(rec.work_sessions[0].start_time, "09:00:00");
    assert_eq!(rec.work_sessions[0].end_time, "09:01:30");
    assert_eq!(rec.work_sessions[0].duration, "00:01:30");
    assert_eq!(stats.len(), 1);
}

#[test]
fn legacy_numeric_seconds_are_accepted() {
    let path = write_stats("store_legacy", FIXTURE);
    let stats = DailyStats::load(std::path::Path::new(&path));

    assert_eq!(stats.len(), 3);
    let legacy = stats.get("2025-03-04").unwrap();
    assert_eq!(legacy.total_time, "01:30:00");
    assert_eq!(legacy.work_sessions[0].duration, "01:30:00");
    assert_eq!(legacy.total_seconds(), 5400);
}

#[test]
fn save_writes_pretty_json_that_loads_back() {
    let path = temp_path("save_load");
    let mut stats = DailyStats::new();
    stats.merge(&day(), &sample_session());
    stats.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"2025-03-04\": {"));
    assert!(text.ends_with("}\n"));
    assert_eq!(DailyStats::load(&path), stats);
}

#[test]
fn missing_and_empty_files_load_empty() {
    let path = temp_path("missing");
    assert!(DailyStats::load(&path).is_empty());

    fs::write(&path, "  \n").unwrap();
    assert!(DailyStats::load(&path).is_empty());
}

#[test]
fn malformed_file_is_copied_aside() {
    let path = temp_path("malformed");
    let aside = PathBuf::from(format!("{}.corrupt", path.display()));
    fs::remove_file(&aside).ok();
    fs::write(&path, "[1, 2").unwrap();

    assert!(DailyStats::load(&path).is_empty());
    assert_eq!(fs::read_to_string(&aside).unwrap(), "[1, 2");
}

#[test]
fn commit_session_keeps_other_days_and_skips_empty() {
    let path = temp_path("commit");

    commit_session(&path, &day(), &SessionRecord::default()).unwrap();
    assert!(!path.exists());

    fs::write(&path, FIXTURE).unwrap();
    let merged = commit_session(&path, &day(), &sample_session()).unwrap();
    assert_eq!(merged.len(), 3);

    let reloaded = DailyStats::load(&path);
    let rec = reloaded.get("2025-03-04").unwrap();
    assert_eq!(rec.total_time, "01:31:30");
    assert_eq!(rec.alert_times.len(), 2);
    assert!(reloaded.get("2025-03-03").is_some());
}

#[test]
fn commit_into_non_utf8_file_keeps_a_copy() {
    let path = temp_path("non_utf8");
    let aside = PathBuf::from(format!("{}.corrupt", path.display()));
    fs::remove_file(&aside).ok();

    let mut original =
        br#"{"2025-01-01": {"total_time": "01:00:00", "alert_times": [], "work_sessions": []}}"#
            .to_vec();
    original.push(0xE9);
    fs::write(&path, &original).unwrap();

    commit_session(&path, &day(), &sample_session()).unwrap();

    assert_eq!(fs::read(&aside).unwrap(), original);
    assert!(DailyStats::load(&path).get("2025-03-04").is_some());
}

#[cfg(unix)]
#[test]
fn commit_refuses_unreadable_stats_path() {
    let mut dir = env::temp_dir();
    dir.push("rfocus_store_stats_dir.json");
    fs::remove_file(&dir).ok();
    fs::create_dir_all(&dir).unwrap();

    assert!(DailyStats::load_checked(&dir).is_err());
    assert!(commit_session(&dir, &day(), &sample_session()).is_err());
    assert!(dir.is_dir());
    assert!(DailyStats::load(&dir).is_empty());
}

#[test]
fn filtered_respects_bounds() {
    let path = write_stats("store_filtered", FIXTURE);
    let stats = DailyStats::load(std::path::Path::new(&path));

    let bounds = Some((
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
    ));
    let days: Vec<&String> = stats.filtered(bounds).into_iter().map(|(d, _)| d).collect();
    assert_eq!(days, vec!["2025-03-04", "2025-04-01"]);
    assert_eq!(stats.subset(bounds).len(), 2);
    assert_eq!(stats.filtered(None).len(), 3);
}

#[test]
fn hms_helpers() {
    assert_eq!(seconds_to_hms(90061.9), "25:01:01");
    assert_eq!(seconds_to_hms(-5.0), "00:00:00");
    assert_eq!(hms_to_seconds("01:02:03"), 3723);
    assert_eq!(hms_to_seconds("100:00:00"), 360_000);
    assert_eq!(hms_to_seconds("01:02"), 0);
    assert_eq!(hms_to_seconds("aa:00:00"), 0);
    assert_eq!(hms_to_seconds("9999999999999999:00:00"), 0);
    assert_eq!(hms_to_seconds("00:00:18446744073709551615"), u64::MAX);
    assert_eq!(hms_to_seconds("00:01:18446744073709551615"), 0);
}

#[test]
fn activity_journal_appends_entries() {
    let mut path = env::temp_dir();
    path.push("rfocus_store_journal.jsonl");
    fs::remove_file(&path).ok();

    let journal = ActivityLog::new(path.clone());
    journal.ftlog("init", "", "first").unwrap();
    journal.record("export", "/tmp/x.json", "second");
    fs::write(
        &path,
        format!("{}not json\n", fs::read_to_string(&path).unwrap()),
    )
    .unwrap();

    let entries = read_entries(&path).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].operation, "init");
    assert_eq!(entries[1].target, "/tmp/x.json");

    let disabled = ActivityLog::disabled();
    disabled.ftlog("init", "", "dropped").unwrap();
    assert!(disabled.path().is_none());
}
