//! Interactive terminal front end for `rfocus run`.

use crate::config::Config;
use crate::core::alert::{AlertSink, dispatch};
use crate::core::poller::{POLL_INTERVAL_MS, Poller, SharedTimer};
use crate::core::timer::{FocusTimer, TimerSettings, TimerSnapshot};
use crate::errors::{AppError, AppResult};
use crate::export::ExportLogic;
use crate::models::session::SessionRecord;
use crate::store::log::ActivityLog;
use crate::store::{DailyStats, commit_session};
use crate::ui::report::{history_table, session_summary, totals_line};
use crate::utils::colors::colorize_optional;
use crate::utils::formatting::bold;
use crate::utils::time::{clock, delta_to_hms};
use chrono::Local;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use rand::Rng;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};

const KEY_HELP: &str =
    "[space] start/pause  [f] end fragment  [c] end cycle  [b] end break  [v] stats  [x] export  [q] quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle,
    EndFragment,
    EndCycle,
    EndBreak,
    ToggleStats,
    Export,
    Quit,
}

pub fn action_for_key(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('f') => Some(Action::EndFragment),
        KeyCode::Char('c') => Some(Action::EndCycle),
        KeyCode::Char('b') => Some(Action::EndBreak),
        KeyCode::Char('v') => Some(Action::ToggleStats),
        KeyCode::Char('x') => Some(Action::Export),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Restores the terminal on drop, including on early returns.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> AppResult<Self> {
        terminal::enable_raw_mode().map_err(|e| AppError::Terminal(e.to_string()))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(AppError::Terminal(e.to_string()));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub struct Dashboard {
    timer: SharedTimer,
    settings: TimerSettings,
    sink: Arc<dyn AlertSink>,
    stats_path: PathBuf,
    journal: ActivityLog,
    quit: Arc<AtomicBool>,
    message: Option<String>,
    show_stats: bool,
    history: DailyStats,
}

impl Dashboard {
    pub fn new(
        settings: TimerSettings,
        sink: Arc<dyn AlertSink>,
        stats_path: PathBuf,
        journal: ActivityLog,
    ) -> Self {
        Self {
            timer: Arc::new(Mutex::new(FocusTimer::new(settings.clone()))),
            settings,
            sink,
            stats_path,
            journal,
            quit: Arc::new(AtomicBool::new(false)),
            message: None,
            show_stats: false,
            history: DailyStats::new(),
        }
    }

    /// Setting this flag ends the loop and commits the session.
    pub fn quit_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    /// Run until the user quits, then persist the session.
    pub fn run(mut self) -> AppResult<SessionRecord> {
        let mut poller = Poller::spawn(Arc::clone(&self.timer), Arc::clone(&self.sink))?;
        info!(stats = %self.stats_path.display(), "dashboard started");

        let loop_result = TerminalGuard::enter().and_then(|_guard| self.event_loop());

        poller.stop();
        let record = self.commit()?;
        loop_result?;
        Ok(record)
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, FocusTimer>> {
        self.timer
            .lock()
            .map_err(|_| AppError::Other("timer state poisoned".into()))
    }

    fn event_loop(&mut self) -> AppResult<()> {
        let mut out = io::stdout();
        let mut rng = rand::thread_rng();

        while !self.quit.load(Ordering::SeqCst) {
            self.render(&mut out)?;

            if !event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                continue;
            }
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(action) = action_for_key(&key)
            {
                if action == Action::Quit {
                    break;
                }
                self.apply(action, &mut rng)?;
            }
        }
        Ok(())
    }

    fn apply<R: Rng>(&mut self, action: Action, rng: &mut R) -> AppResult<()> {
        let now = Local::now();

        let (outcome, done, refused) = {
            let mut timer = self.lock()?;
            match action {
                Action::Toggle => (
                    timer.toggle(now, rng),
                    None,
                    "Cannot start during a break. Press [b] to end it early.",
                ),
                Action::EndFragment => (
                    timer.end_fragment(now),
                    Some("Fragment ended, a new one has started."),
                    "Timer not running, cannot end the fragment.",
                ),
                Action::EndCycle => (
                    timer.end_cycle(now),
                    Some("Work cycle ended, break time."),
                    "Timer not running, cannot end the cycle.",
                ),
                Action::EndBreak => (
                    timer.end_break(now),
                    Some("Break ended early."),
                    "Not on a break.",
                ),
                Action::ToggleStats => {
                    drop(timer);
                    self.show_stats = !self.show_stats;
                    if self.show_stats {
                        self.history = DailyStats::load(&self.stats_path);
                    }
                    return Ok(());
                }
                Action::Export => {
                    drop(timer);
                    self.export_now();
                    return Ok(());
                }
                Action::Quit => return Ok(()),
            }
        };

        match outcome {
            Ok(events) => {
                dispatch(self.sink.as_ref(), &events);
                self.message = done.map(str::to_string);
            }
            Err(AppError::InvalidState { .. }) => self.message = Some(refused.to_string()),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn export_now(&mut self) {
        let now = Local::now();
        let locked = self.lock().map(|t| t.snapshot(now));
        let snapshot = match locked {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.message = Some(format!("Export failed: {}", e));
                return;
            }
        };

        let stats = DailyStats::load(&self.stats_path);
        let path = Config::config_dir().join(format!(
            "rfocus-export-{}.json",
            now.format("%Y%m%d-%H%M%S")
        ));

        self.message = Some(match ExportLogic::write_snapshot(&stats, &snapshot, &path) {
            Ok(()) => {
                self.journal
                    .record("export", &path.to_string_lossy(), "Dashboard export");
                format!("Exported to {}", path.display())
            }
            Err(e) => {
                warn!(error = %e, "dashboard export failed");
                format!("Export failed: {}", e)
            }
        });
    }

    fn screen_lines(&self, snap: &TimerSnapshot) -> Vec<String> {
        let next_alert = snap
            .next_alert_at
            .map(|t| clock(&t))
            .unwrap_or_else(|| "--:--:--".to_string());

        let mut lines = vec![
            bold("rfocus focus timer"),
            String::new(),
            format!("Status:          {}", snap.phase.status()),
            format!("Fragment:        {}", delta_to_hms(snap.fragment_elapsed)),
            format!("Next alert:      {}", colorize_optional(&next_alert)),
            format!(
                "Last fragment:   {}",
                colorize_optional(&delta_to_hms(snap.last_fragment))
            ),
            format!("Total work:      {}", delta_to_hms(snap.work_time)),
        ];

        if let Some(remaining) = snap.break_remaining {
            lines.push(format!("Break remaining: {}", delta_to_hms(remaining)));
        }

        lines.push(format!(
            "Cycle:           {} min work / {} min break, alerts every {}-{} s",
            self.settings.work.num_minutes(),
            self.settings.rest.num_minutes(),
            self.settings.min_interval_secs,
            self.settings.max_interval_secs
        ));
        lines.push(String::new());
        lines.push(KEY_HELP.to_string());

        if let Some(msg) = &self.message {
            lines.push(String::new());
            lines.push(format!("> {}", msg));
        }

        if self.show_stats {
            let days = self.history.filtered(None);
            lines.push(String::new());
            lines.extend(history_table(&days).lines().map(str::to_string));
            lines.push(totals_line(&days));
            lines.push(String::new());
            lines.extend(session_summary(snap).lines().map(str::to_string));
        }

        lines
    }

    fn render(&self, out: &mut impl Write) -> AppResult<()> {
        let snapshot = self.lock()?.snapshot(Local::now());

        queue!(out, MoveTo(0, 0))?;
        for line in self.screen_lines(&snapshot) {
            queue!(out, Print(line), Clear(ClearType::UntilNewLine), Print("\r\n"))?;
        }
        queue!(out, Clear(ClearType::FromCursorDown))?;
        out.flush()?;
        Ok(())
    }

    fn commit(&self) -> AppResult<SessionRecord> {
        let now = Local::now();
        let record = self.lock()?.commit(now);

        commit_session(&self.stats_path, &now.date_naive(), &record)?;
        if !record.is_empty() {
            self.journal.record(
                "session",
                &self.stats_path.to_string_lossy(),
                &format!(
                    "Committed {} of work, {} alert(s), {} span(s)",
                    delta_to_hms(record.work_time),
                    record.alerts.len(),
                    record.spans.len()
                ),
            );
        }
        Ok(record)
    }
}
