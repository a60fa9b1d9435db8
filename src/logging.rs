//! Diagnostic logging to `~/.rfocus/rfocus.log`.
//!
//! Nothing goes to the terminal: the dashboard owns the screen in raw mode.

use crate::config::Config;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install the file subscriber. Without `enabled`, or when the log file cannot
/// be opened, events are dropped.
pub fn init(enabled: bool) {
    if !enabled {
        return;
    }

    let log_path = Config::log_file();
    if let Some(dir) = log_path.parent()
        && std::fs::create_dir_all(dir).is_err()
    {
        return;
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!(path = %log_path.display(), "tracing initialized");
    }
}
