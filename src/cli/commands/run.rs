use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::alert::{AlertDispatcher, AlertPlayer};
use crate::errors::AppResult;
use crate::store::log::ActivityLog;
use crate::ui::dashboard::Dashboard;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::delta_to_hms;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::warn;

/// Handle the `run` command: apply the CLI overrides, then hand over to the
/// dashboard until the user quits.
pub fn handle(cmd: &Commands, cfg: &Config, journal: &ActivityLog) -> AppResult<()> {
    if let Commands::Run {
        work,
        rest,
        min_interval,
        max_interval,
        mute,
    } = cmd
    {
        let mut cfg = cfg.clone();
        if let Some(m) = work {
            cfg.work_minutes = *m;
        }
        if let Some(m) = rest {
            cfg.break_minutes = *m;
        }
        if let Some(s) = min_interval {
            cfg.min_interval_secs = *s;
        }
        if let Some(s) = max_interval {
            cfg.max_interval_secs = *s;
        }

        let settings = cfg.timer_settings()?;
        let player = AlertPlayer::from_config(&cfg, *mute);
        tracing::info!(
            sound = ?player.sound(),
            player = ?player.player(),
            enabled = player.is_enabled(),
            "alert player ready"
        );
        if !player.is_enabled() {
            warning("Alert sounds are muted for this session.");
        }
        let sink = Arc::new(AlertDispatcher::new(
            player,
            cfg.notifications,
            journal.clone(),
        ));

        let dashboard = Dashboard::new(settings, sink, cfg.stats_path(), journal.clone());

        let quit = dashboard.quit_flag();
        if let Err(e) = ctrlc::set_handler(move || quit.store(true, Ordering::SeqCst)) {
            warn!(error = %e, "cannot install the termination handler");
        }

        let record = dashboard.run()?;

        if record.is_empty() {
            info("Nothing recorded in this session.");
        } else {
            success(format!(
                "Session saved: {} of work, {} alert(s), {} work span(s) -> {}",
                delta_to_hms(record.work_time),
                record.alerts.len(),
                record.spans.len(),
                cfg.stats_path().display()
            ));
        }
    }

    Ok(())
}
