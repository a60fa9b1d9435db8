// src/export/logic.rs

use crate::core::timer::TimerSnapshot;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json, write_json};
use crate::export::model::{CurrentSessionExport, ExportDocument, days_to_rows};
use crate::store::DailyStats;
use crate::ui::messages::warning;
use crate::utils::date::resolve_bounds;
use std::path::Path;

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the daily statistics.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a period expression:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `YYYY:YYYY`
    ///   - `YYYY-MM:YYYY-MM`
    ///   - `YYYY-MM-DD:YYYY-MM-DD`
    /// - `current`: live session to embed (JSON only)
    ///
    /// Returns `false` when there was nothing to export.
    pub fn export(
        stats: &DailyStats,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
        current: Option<&TimerSnapshot>,
    ) -> AppResult<bool> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = resolve_bounds(range).map_err(AppError::InvalidDate)?;
        let selected = stats.subset(bounds);

        if selected.is_empty() && current.is_none() {
            warning("No statistics found for the selected range. Nothing to export.");
            return Ok(false);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Json => {
                let doc = ExportDocument {
                    daily_stats: &selected,
                    current_session: current.map(CurrentSessionExport::from_snapshot),
                };
                export_json(&doc, path)?
            }
            ExportFormat::Csv => export_csv(&days_to_rows(&selected), path)?,
        }

        Ok(true)
    }

    /// Full history plus the live session as JSON, silently.
    /// Used from the dashboard, where console output would garble the screen.
    pub fn write_snapshot(
        stats: &DailyStats,
        snapshot: &TimerSnapshot,
        path: &Path,
    ) -> AppResult<()> {
        let doc = ExportDocument {
            daily_stats: stats,
            current_session: Some(CurrentSessionExport::from_snapshot(snapshot)),
        };
        write_json(&doc, path)
    }
}
