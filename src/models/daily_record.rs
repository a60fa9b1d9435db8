use crate::utils::time::{hms_to_seconds, seconds_to_hms};
use serde::{Deserialize, Deserializer, Serialize};

/// One day of persisted statistics, keyed by `YYYY-MM-DD` in the stats file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    #[serde(default = "zero_hms", deserialize_with = "hms_compat")]
    pub total_time: String, // HH:MM:SS, hours may exceed 24
    #[serde(default)]
    pub alert_times: Vec<String>, // HH:MM:SS
    #[serde(default)]
    pub work_sessions: Vec<SessionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionEntry {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default = "zero_hms", deserialize_with = "hms_compat")]
    pub duration: String,
}

impl Default for DailyRecord {
    fn default() -> Self {
        Self {
            total_time: zero_hms(),
            alert_times: Vec::new(),
            work_sessions: Vec::new(),
        }
    }
}

impl DailyRecord {
    pub fn total_seconds(&self) -> u64 {
        hms_to_seconds(&self.total_time)
    }

    pub fn add_seconds(&mut self, secs: f64) {
        let total = self.total_seconds() as f64 + secs.max(0.0);
        self.total_time = seconds_to_hms(total);
    }

    pub fn alert_count(&self) -> usize {
        self.alert_times.len()
    }

    pub fn session_count(&self) -> usize {
        self.work_sessions.len()
    }
}

impl SessionEntry {
    pub fn duration_seconds(&self) -> u64 {
        hms_to_seconds(&self.duration)
    }
}

fn zero_hms() -> String {
    "00:00:00".to_string()
}

/// Older stats files stored durations as plain seconds.
#[derive(Deserialize)]
#[serde(untagged)]
enum HmsOrSeconds {
    Text(String),
    Seconds(f64),
}

fn hms_compat<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match HmsOrSeconds::deserialize(deserializer)? {
        HmsOrSeconds::Text(s) => s,
        HmsOrSeconds::Seconds(n) => seconds_to_hms(n),
    })
}
