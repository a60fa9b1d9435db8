use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::store::DailyStats;
use crate::store::log::ActivityLog;

pub fn handle(cmd: &Commands, cfg: &Config, journal: &ActivityLog) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let stats = DailyStats::load(&cfg.stats_path());
        let written = ExportLogic::export(&stats, *format, file, range.as_deref(), *force, None)?;

        if written {
            journal.record(
                "export",
                file,
                &format!(
                    "{} export, range {}",
                    format.as_str(),
                    range.as_deref().unwrap_or("all")
                ),
            );
        }
    }
    Ok(())
}
