// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::model::{DayExport, ExportDocument};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use crate::utils::path::write_atomic;
use std::path::Path;

/// Write the document pretty-printed, without console output.
pub(crate) fn write_json(doc: &ExportDocument<'_>, path: &Path) -> AppResult<()> {
    let mut json_data = serde_json::to_string_pretty(doc)?;
    json_data.push('\n');
    write_atomic(path, json_data.as_bytes())?;
    Ok(())
}

/// Export JSON pretty-printed.
pub(crate) fn export_json(doc: &ExportDocument<'_>, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));
    write_json(doc, path)?;
    notify_export_success("JSON", path);
    Ok(())
}

/// Export one CSV row per day; serde writes the header.
pub(crate) fn export_csv(rows: &[DayExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
