use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::DailyStats;
use crate::ui::charts::render_all;
use crate::ui::messages::{header, warning};
use crate::ui::report::{history_table, totals_line};
use crate::utils::date::{date_key, resolve_bounds, today};

/// Handle the `stats` command: history table, totals and optional charts.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats {
        period,
        today: only_today,
        charts,
    } = cmd
    {
        let stats = DailyStats::load(&cfg.stats_path());

        let period = if *only_today {
            Some(date_key(&today()))
        } else {
            period.clone()
        };
        let bounds = resolve_bounds(period.as_deref()).map_err(AppError::InvalidDate)?;
        let days = stats.filtered(bounds);

        if days.is_empty() {
            warning("No statistics recorded for the selected period.");
            return Ok(());
        }

        header("Focus history");
        println!("{}", history_table(&days));
        println!("{}", totals_line(&days));

        if *charts {
            println!();
            header("Charts");
            println!("{}", render_all(&days));
        }
    }

    Ok(())
}
