#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Three days of stats; 2025-03-04 uses the older numeric-seconds format.
pub const FIXTURE: &str = r#"{
  "2025-03-03": {
    "total_time": "01:30:00",
    "alert_times": ["09:04:10", "09:08:55"],
    "work_sessions": [
      {"start_time": "09:00:00", "end_time": "10:30:00", "duration": "01:30:00"}
    ]
  },
  "2025-03-04": {
    "total_time": 5400.5,
    "alert_times": ["13:03:00"],
    "work_sessions": [
      {"start_time": "13:00:00", "end_time": "14:30:00", "duration": 5400}
    ]
  },
  "2025-04-01": {
    "total_time": "00:45:10",
    "alert_times": [],
    "work_sessions": []
  }
}"#;

pub fn rfocus() -> Command {
    cargo_bin_cmd!("rfocus")
}

/// A fresh, empty directory used as `$HOME` for one test.
pub fn temp_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rfocus_home_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path
}

/// The binary with `$HOME` pointed at `home`, so no real config is touched.
pub fn rfocus_in(home: &Path) -> Command {
    let mut cmd = rfocus();
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rfocus_{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` as a stats file inside the temp dir and return its path.
pub fn write_stats(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rfocus_{}_stats.json", name));
    fs::write(&path, content).expect("write stats fixture");
    path.to_string_lossy().to_string()
}
