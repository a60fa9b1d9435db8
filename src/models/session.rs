use chrono::{DateTime, Local, TimeDelta};

/// A closed stretch of uninterrupted work.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkSpan {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub duration: TimeDelta,
}

impl WorkSpan {
    pub fn closed(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self {
            start,
            end,
            duration: end - start,
        }
    }
}

/// Everything a finished session contributes to the daily statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRecord {
    pub work_time: TimeDelta,
    pub alerts: Vec<DateTime<Local>>,
    pub spans: Vec<WorkSpan>,
}

impl SessionRecord {
    pub fn is_empty(&self) -> bool {
        self.work_time <= TimeDelta::zero() && self.alerts.is_empty() && self.spans.is_empty()
    }
}
