//! Per-day statistics persisted as one flat JSON object keyed by date.

use crate::errors::AppResult;
use crate::models::daily_record::{DailyRecord, SessionEntry};
use crate::models::session::SessionRecord;
use crate::utils::date::key_in_bounds;
use crate::utils::path::write_atomic;
use crate::utils::time::{clock, delta_secs, delta_to_hms};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DailyStats {
    days: BTreeMap<String, DailyRecord>,
}

impl DailyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stats file.
    ///
    /// A missing file gives empty stats. A malformed file also gives empty
    /// stats, but is first copied aside to `<file>.corrupt` so the next save
    /// cannot destroy it. An unreadable file is logged and reads as empty;
    /// use `load_checked` before writing anything back.
    pub fn load(path: &Path) -> Self {
        match Self::load_checked(path) {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "cannot load stats file");
                Self::new()
            }
        }
    }

    /// Like `load`, but fails when an existing file cannot be read, or when a
    /// malformed one cannot be copied aside.
    pub fn load_checked(path: &Path) -> AppResult<Self> {
        let content = match fs::read(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }

        match serde_json::from_slice::<DailyStats>(&content) {
            Ok(stats) => Ok(stats),
            Err(e) => {
                let aside = corrupt_path(path);
                warn!(
                    error = %e,
                    path = %path.display(),
                    backup = %aside.display(),
                    "stats file is not valid JSON, starting empty"
                );
                fs::copy(path, &aside)?;
                Ok(Self::new())
            }
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        write_atomic(path, json.as_bytes())?;
        Ok(())
    }

    /// Add a finished session to the record of `date`, creating it if needed.
    pub fn merge(&mut self, date: &NaiveDate, session: &SessionRecord) {
        let key = date.format("%Y-%m-%d").to_string();
        let day = self.days.entry(key).or_default();

        day.add_seconds(delta_secs(session.work_time));
        day.alert_times
            .extend(session.alerts.iter().map(clock));
        day.work_sessions
            .extend(session.spans.iter().map(|span| SessionEntry {
                start_time: clock(&span.start),
                end_time: clock(&span.end),
                duration: delta_to_hms(span.duration),
            }));
    }

    pub fn get(&self, date: &str) -> Option<&DailyRecord> {
        self.days.get(date)
    }

    pub fn insert(&mut self, date: &str, record: DailyRecord) {
        self.days.insert(date.to_string(), record);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DailyRecord)> {
        self.days.iter()
    }

    /// Days within the inclusive bounds, ascending. `None` keeps everything.
    pub fn filtered(
        &self,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<(&String, &DailyRecord)> {
        self.days
            .iter()
            .filter(|(key, _)| key_in_bounds(key, bounds))
            .collect()
    }

    /// Copy restricted to the bounds, for export.
    pub fn subset(&self, bounds: Option<(NaiveDate, NaiveDate)>) -> DailyStats {
        DailyStats {
            days: self
                .filtered(bounds)
                .into_iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut p = path.as_os_str().to_owned();
    p.push(".corrupt");
    PathBuf::from(p)
}

/// Reload the stats file, fold the session into `date` and save it back.
/// Returns the merged stats. Empty sessions leave the file untouched, and a
/// file that cannot be read or set aside is never overwritten.
pub fn commit_session(
    path: &Path,
    date: &NaiveDate,
    session: &SessionRecord,
) -> AppResult<DailyStats> {
    if session.is_empty() {
        return Ok(DailyStats::load(path));
    }

    let mut stats = DailyStats::load_checked(path)?;

    stats.merge(date, session);
    stats.save(path)?;
    info!(
        path = %path.display(),
        work_secs = session.work_time.num_seconds(),
        alerts = session.alerts.len(),
        spans = session.spans.len(),
        "session committed"
    );
    Ok(stats)
}
