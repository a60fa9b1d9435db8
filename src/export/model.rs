// src/export/model.rs

use crate::core::timer::TimerSnapshot;
use crate::store::DailyStats;
use crate::utils::time::delta_secs;
use serde::Serialize;

/// Top-level JSON export document.
#[derive(Serialize, Debug)]
pub struct ExportDocument<'a> {
    pub daily_stats: &'a DailyStats,
    pub current_session: Option<CurrentSessionExport>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CurrentSessionExport {
    pub start_time: Option<String>, // YYYY-MM-DD HH:MM:SS
    pub run_time: f64,              // seconds
    pub alert_times: Vec<String>,   // YYYY-MM-DD HH:MM:SS
}

impl CurrentSessionExport {
    pub fn from_snapshot(snapshot: &TimerSnapshot) -> Self {
        const FMT: &str = "%Y-%m-%d %H:%M:%S";
        Self {
            start_time: snapshot.session_start.map(|t| t.format(FMT).to_string()),
            run_time: delta_secs(snapshot.run_time),
            alert_times: snapshot
                .alerts
                .iter()
                .map(|t| t.format(FMT).to_string())
                .collect(),
        }
    }
}

/// Flat per-day row for CSV.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DayExport {
    pub date: String,
    pub total_time: String,
    pub total_seconds: u64,
    pub alert_count: usize,
    pub work_session_count: usize,
}

pub(crate) fn days_to_rows(stats: &DailyStats) -> Vec<DayExport> {
    stats
        .iter()
        .map(|(date, day)| DayExport {
            date: date.clone(),
            total_time: day.total_time.clone(),
            total_seconds: day.total_seconds(),
            alert_count: day.alert_count(),
            work_session_count: day.session_count(),
        })
        .collect()
}
