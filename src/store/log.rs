//! Activity journal: one JSON object per line, appended on notable actions
//! (init, breaks, session commits, exports).

use crate::errors::AppResult;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    pub date: String, // RFC 3339
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Handle on the journal file. A disabled journal silently drops entries.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: Option<PathBuf>,
}

impl ActivityLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one entry.
    pub fn ftlog(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entry = ActivityEntry {
            date: Local::now().to_rfc3339(),
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Like `ftlog`, but failures only end up in the diagnostic log.
    pub fn record(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.ftlog(operation, target, message) {
            tracing::warn!(error = %e, operation, "failed to write activity journal");
        }
    }
}

/// Read every well-formed entry of a journal file, oldest first.
/// A missing file reads as empty; malformed lines are skipped.
pub fn read_entries(path: &Path) -> AppResult<Vec<ActivityEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(fs::File::open(path)?);
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ActivityEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::debug!(error = %e, "skipping malformed journal line"),
        }
    }
    Ok(entries)
}
