use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{FIXTURE, rfocus_in, temp_home, temp_out, write_stats};

#[test]
fn test_init_test_mode_creates_only_stats_file() {
    let home = temp_home("init_test_mode");
    let stats = home.join("custom_stats.json");
    let stats_str = stats.to_string_lossy().to_string();

    rfocus_in(&home)
        .args(["--stats", &stats_str, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("rfocus initialization completed"));

    assert_eq!(fs::read_to_string(&stats).unwrap(), "{}");
    assert!(!home.join(".rfocus").join("rfocus.conf").exists());
    assert!(!home.join(".rfocus").join("activity.jsonl").exists());
}

#[cfg(not(windows))]
#[test]
fn test_init_writes_config_and_journal() {
    let home = temp_home("init_full");

    rfocus_in(&home).arg("init").assert().success();

    let dir = home.join(".rfocus");
    let conf = fs::read_to_string(dir.join("rfocus.conf")).unwrap();
    assert!(conf.contains("work_minutes: 90"));
    assert!(conf.contains("break_minutes: 20"));
    assert!(conf.contains("min_interval_secs: 180"));
    assert!(conf.contains("max_interval_secs: 300"));
    assert!(dir.join("rfocus_stats.json").exists());

    rfocus_in(&home)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("Activity journal"))
        .stdout(contains("init"));

    rfocus_in(&home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("stats_file"))
        .stdout(contains("notifications: true"));
}

#[test]
fn test_log_print_on_empty_journal() {
    let home = temp_home("log_empty");

    rfocus_in(&home)
        .args(["--test", "log", "--print", "--lines", "5"])
        .assert()
        .success()
        .stdout(contains("Activity journal is empty"));
}

#[test]
fn test_stats_lists_all_days_and_totals() {
    let home = temp_home("stats_all");
    let stats = write_stats("stats_all", FIXTURE);

    rfocus_in(&home)
        .args(["--stats", &stats, "--test", "stats"])
        .assert()
        .success()
        .stdout(contains("2025-03-03"))
        .stdout(contains("2025-03-04"))
        .stdout(contains("2025-04-01"))
        .stdout(contains("3 day(s), 03:45:10 total, 3 alert(s), 2 session(s)"));
}

#[test]
fn test_stats_period_filter() {
    let home = temp_home("stats_period");
    let stats = write_stats("stats_period", FIXTURE);

    rfocus_in(&home)
        .args(["--stats", &stats, "--test", "stats", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-03"))
        .stdout(contains("2025-03-04"))
        .stdout(contains("2025-04-01").not());

    rfocus_in(&home)
        .args([
            "--stats",
            &stats,
            "--test",
            "stats",
            "--period",
            "2025-03-04:2025-04-30",
        ])
        .assert()
        .success()
        .stdout(contains("2025-03-03").not())
        .stdout(contains("2 day(s)"));
}

#[test]
fn test_stats_invalid_period_fails() {
    let home = temp_home("stats_bad_period");
    let stats = write_stats("stats_bad_period", FIXTURE);

    rfocus_in(&home)
        .args(["--stats", &stats, "--test", "stats", "--period", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn test_stats_charts() {
    let home = temp_home("stats_charts");
    let stats = write_stats("stats_charts", FIXTURE);

    rfocus_in(&home)
        .args(["--stats", &stats, "--test", "stats", "--charts"])
        .assert()
        .success()
        .stdout(contains("Daily work time (hours)"))
        .stdout(contains("Alerts per day"))
        .stdout(contains("Work sessions over the day"))
        .stdout(contains("Work session length (hours)"));
}

#[test]
fn test_stats_missing_file() {
    let home = temp_home("stats_missing");
    let stats = home.join("nope.json").to_string_lossy().to_string();

    rfocus_in(&home)
        .args(["--stats", &stats, "--test", "stats"])
        .assert()
        .success()
        .stdout(contains("No statistics recorded"));
}

#[test]
fn test_stats_malformed_file_is_kept_aside() {
    let home = temp_home("stats_corrupt");
    let stats = write_stats("stats_corrupt", "{ not json");
    let aside = format!("{}.corrupt", stats);
    fs::remove_file(&aside).ok();

    rfocus_in(&home)
        .args(["--stats", &stats, "--test", "stats"])
        .assert()
        .success()
        .stdout(contains("No statistics recorded"));

    assert_eq!(fs::read_to_string(&aside).unwrap(), "{ not json");
}

#[test]
fn test_export_json_all() {
    let home = temp_home("export_json");
    let stats = write_stats("export_json", FIXTURE);
    let out = temp_out("export_json", "json");

    rfocus_in(&home)
        .args([
            "--stats", &stats, "--test", "export", "--format", "json", "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(doc["current_session"].is_null());
    assert_eq!(doc["daily_stats"]["2025-03-03"]["total_time"], "01:30:00");
    // legacy numeric seconds come out as HH:MM:SS
    assert_eq!(doc["daily_stats"]["2025-03-04"]["total_time"], "01:30:00");
    assert_eq!(
        doc["daily_stats"]["2025-03-04"]["work_sessions"][0]["duration"],
        "01:30:00"
    );
    assert!(doc["daily_stats"]["2025-04-01"].is_object());
}

#[test]
fn test_export_csv_with_range() {
    let home = temp_home("export_csv");
    let stats = write_stats("export_csv", FIXTURE);
    let out = temp_out("export_csv", "csv");

    rfocus_in(&home)
        .args([
            "--stats", &stats, "--test", "export", "--format", "csv", "--file", &out, "--range",
            "2025-03",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("date,total_time,total_seconds,alert_count,work_session_count")
    );
    assert!(content.contains("2025-03-03,01:30:00,5400,2,1"));
    assert!(content.contains("2025-03-04,01:30:00,5400,1,1"));
    assert!(!content.contains("2025-04-01"));
}

#[test]
fn test_export_relative_path_rejected() {
    let home = temp_home("export_relative");
    let stats = write_stats("export_relative", FIXTURE);

    rfocus_in(&home)
        .args(["--stats", &stats, "--test", "export", "--file", "out.json"])
        .assert()
        .failure()
        .stderr(contains("absolute"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let home = temp_home("export_empty");
    let stats = write_stats("export_empty", FIXTURE);
    let out = temp_out("export_empty", "json");

    rfocus_in(&home)
        .args([
            "--stats", &stats, "--test", "export", "--file", &out, "--range", "2020",
        ])
        .assert()
        .success()
        .stdout(contains("Nothing to export"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_existing_file_needs_confirmation() {
    let home = temp_home("export_existing");
    let stats = write_stats("export_existing", FIXTURE);
    let out = temp_out("export_existing", "json");
    fs::write(&out, "keep me").unwrap();

    rfocus_in(&home)
        .args(["--stats", &stats, "--test", "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    rfocus_in(&home)
        .args(["--stats", &stats, "--test", "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("daily_stats"));
}

#[test]
fn test_run_rejects_inverted_intervals() {
    let home = temp_home("run_bad_intervals");

    rfocus_in(&home)
        .args([
            "--test",
            "run",
            "--min-interval",
            "300",
            "--max-interval",
            "60",
        ])
        .assert()
        .failure()
        .stderr(contains("min_interval_secs"));

    for (flag, value, field) in [
        ("--work", "200000000000000", "work_minutes"),
        ("--rest", "18446744073709551615", "break_minutes"),
        ("--max-interval", "9223372036854775807", "max_interval_secs"),
    ] {
        rfocus_in(&home)
            .args(["--test", "run", flag, value])
            .assert()
            .failure()
            .stderr(contains("Error:"))
            .stderr(contains(field))
            .stderr(contains("panicked").not());
    }
}
