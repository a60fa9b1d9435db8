use crate::errors::AppResult;
use crate::store::log::{ActivityEntry, read_entries};
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const OP_MAX_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    match ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()) {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// ANSI colour for a journal operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "session" => Colour::Green,
        "break" => Colour::Yellow,
        "break_end" => Colour::Cyan,
        "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)` cut to `OP_MAX_WIDTH` visible characters, with only
/// the operation word coloured.
fn op_target_cell(entry: &ActivityEntry) -> String {
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.chars().count() > OP_MAX_WIDTH {
        let mut s: String = plain.chars().take(OP_MAX_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&entry.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

/// Display form of an RFC 3339 stamp; unparsable values are shown as stored.
fn display_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub struct LogLogic;

impl LogLogic {
    /// Render journal entries as aligned lines, numbered from 1.
    pub fn format_entries(entries: &[(usize, ActivityEntry)]) -> Vec<String> {
        let cells: Vec<(usize, String, String, &str)> = entries
            .iter()
            .map(|(id, e)| (*id, display_date(&e.date), op_target_cell(e), e.message.as_str()))
            .collect();

        let id_w = cells.iter().map(|c| c.0.to_string().len()).max().unwrap_or(1);
        let date_w = cells.iter().map(|c| c.1.len()).max().unwrap_or(10);
        let op_w = cells
            .iter()
            .map(|c| strip_ansi(&c.2).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_MAX_WIDTH);

        cells
            .iter()
            .map(|(id, date, op, message)| {
                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(op).chars().count()));
                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    id,
                    date,
                    op,
                    padding,
                    message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect()
    }

    /// Print the journal, oldest first; `lines` keeps only the newest N.
    pub fn print_log(path: &Path, lines: Option<usize>) -> AppResult<()> {
        let entries = read_entries(path)?;
        if entries.is_empty() {
            info(format!("Activity journal is empty ({}).", path.display()));
            return Ok(());
        }

        let skip = lines.map_or(0, |n| entries.len().saturating_sub(n));
        let numbered: Vec<(usize, ActivityEntry)> = entries
            .into_iter()
            .enumerate()
            .skip(skip)
            .map(|(i, e)| (i + 1, e))
            .collect();

        println!("📜 Activity journal:\n");
        for line in Self::format_entries(&numbered) {
            println!("{}", line);
        }

        Ok(())
    }
}
