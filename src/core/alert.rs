//! Alert playback, desktop notifications and timer event dispatch.

use crate::config::Config;
use crate::core::synth;
use crate::core::timer::TimerEvent;
use crate::store::log::ActivityLog;
use crate::utils::time::clock;
use notify_rust::Notification;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause between repeated plays of the same alert.
pub const REPEAT_GAP: Duration = Duration::from_secs(1);

const KNOWN_PLAYERS: [&str; 3] = ["paplay", "aplay", "afplay"];

/// Receiver of timer side effects. Implementations must not block: the
/// poller calls them from its loop.
pub trait AlertSink: Send + Sync {
    fn alert(&self, repeat: u32);

    fn notify(&self, _summary: &str, _body: &str) {}

    fn record(&self, _operation: &str, _message: &str) {}
}

/// Turn timer events into sounds, notifications and journal entries.
pub fn dispatch(sink: &dyn AlertSink, events: &[TimerEvent]) {
    for event in events {
        match event {
            TimerEvent::Alert { at, repeat, reason } => {
                debug!(at = %clock(at), repeat, ?reason, "alert");
                sink.alert(*repeat);
            }
            TimerEvent::BreakStarted { until } => {
                info!(until = %clock(until), "break started");
                sink.notify(
                    "Break time",
                    &format!("Work cycle complete. Rest until {}.", clock(until)),
                );
                sink.record("break", &format!("Break until {}", clock(until)));
            }
            TimerEvent::BreakFinished { early } => {
                info!(early, "break finished");
                sink.notify("Break over", "Start the timer to continue working.");
                sink.record(
                    "break_end",
                    if *early {
                        "Break ended early"
                    } else {
                        "Break completed"
                    },
                );
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Player {
    External { program: String, args: Vec<String> },
    PowerShell,
    /// No usable player: ring the terminal bell.
    Bell,
}

impl Player {
    /// Configured command line, or the first known player found on PATH.
    pub fn resolve(configured: Option<&str>) -> Self {
        if let Some(cmdline) = configured {
            let mut parts = cmdline.split_whitespace().map(str::to_string);
            if let Some(program) = parts.next() {
                return Player::External {
                    program,
                    args: parts.collect(),
                };
            }
        }

        if cfg!(target_os = "windows") {
            return Player::PowerShell;
        }

        KNOWN_PLAYERS
            .iter()
            .find(|p| find_in_path(p).is_some())
            .map(|p| Player::External {
                program: p.to_string(),
                args: Vec::new(),
            })
            .unwrap_or(Player::Bell)
    }

    fn command(&self, sound: &Path) -> Option<Command> {
        match self {
            Player::External { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args).arg(sound);
                Some(cmd)
            }
            Player::PowerShell => {
                let script = format!(
                    "(New-Object Media.SoundPlayer '{}').PlaySync()",
                    sound.display()
                );
                let mut cmd = Command::new("powershell");
                cmd.args(["-NoProfile", "-NonInteractive", "-Command", &script]);
                Some(cmd)
            }
            Player::Bell => None,
        }
    }
}

pub fn find_in_path(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

fn bell() {
    print!("\x07");
    io::stdout().flush().ok();
}

/// Plays the alert sound on a background thread.
#[derive(Debug, Clone)]
pub struct AlertPlayer {
    sound: Option<PathBuf>,
    player: Player,
    enabled: bool,
}

impl AlertPlayer {
    pub fn new(sound: Option<PathBuf>, player: Player, enabled: bool) -> Self {
        Self {
            sound,
            player,
            enabled,
        }
    }

    pub fn from_config(cfg: &Config, mute: bool) -> Self {
        let enabled = cfg.sound && !mute;
        let configured = cfg.alert_sound_path();

        let sound = if configured.is_file() {
            Some(configured)
        } else {
            debug!(path = %configured.display(), "alert sound not found, using synthesized chime");
            ensure_chime(&Config::chime_file())
        };

        Self::new(sound, Player::resolve(cfg.player.as_deref()), enabled)
    }

    pub fn sound(&self) -> Option<&Path> {
        self.sound.as_deref()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Play `repeat` times, one second apart, without blocking the caller.
    pub fn play(&self, repeat: u32) {
        if !self.enabled || repeat == 0 {
            return;
        }

        let this = self.clone();
        let spawned = thread::Builder::new()
            .name("rfocus-alert".into())
            .spawn(move || {
                for i in 0..repeat {
                    this.play_once();
                    if i + 1 < repeat {
                        thread::sleep(REPEAT_GAP);
                    }
                }
            });

        if let Err(e) = spawned {
            warn!(error = %e, "failed to spawn alert thread");
        }
    }

    fn play_once(&self) {
        let command = self
            .sound
            .as_deref()
            .and_then(|sound| self.player.command(sound));

        let Some(mut cmd) = command else {
            bell();
            return;
        };

        match cmd.stdout(Stdio::null()).stderr(Stdio::null()).status() {
            Ok(status) if status.success() => {}
            Ok(status) => {
                warn!(?status, player = ?self.player, "alert player exited with failure");
                bell();
            }
            Err(e) => {
                warn!(error = %e, player = ?self.player, "alert player could not be started");
                bell();
            }
        }
    }
}

/// Write the synthesized chime once and return its path.
pub fn ensure_chime(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let written = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::write(path, synth::chime_wav()));

    match written {
        Ok(()) => Some(path.to_path_buf()),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "failed to write fallback chime");
            None
        }
    }
}

/// The production sink: sound, desktop notification and journal.
#[derive(Debug, Clone)]
pub struct AlertDispatcher {
    player: AlertPlayer,
    notifications: bool,
    journal: ActivityLog,
}

impl AlertDispatcher {
    pub fn new(player: AlertPlayer, notifications: bool, journal: ActivityLog) -> Self {
        Self {
            player,
            notifications,
            journal,
        }
    }

    /// Show a desktop notification on its own thread, since `show` can block
    /// on the session bus. Returns `None` when notifications are off or the
    /// thread could not be started.
    pub fn send_notification(&self, summary: &str, body: &str) -> Option<JoinHandle<()>> {
        if !self.notifications {
            return None;
        }

        let summary = summary.to_string();
        let body = body.to_string();
        let spawned = thread::Builder::new()
            .name("rfocus-notify".into())
            .spawn(move || {
                if let Err(e) = Notification::new()
                    .summary(&summary)
                    .body(&body)
                    .appname("rfocus")
                    .show()
                {
                    warn!(error = %e, "failed to send desktop notification");
                }
            });

        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "failed to spawn notification thread");
                None
            }
        }
    }
}

impl AlertSink for AlertDispatcher {
    fn alert(&self, repeat: u32) {
        self.player.play(repeat);
    }

    fn notify(&self, summary: &str, body: &str) {
        self.send_notification(summary, body);
    }

    fn record(&self, operation: &str, message: &str) {
        self.journal.record(operation, "timer", message);
    }
}
