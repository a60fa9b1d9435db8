use chrono::{Local, TimeDelta};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rfocus::core::alert::{
    AlertDispatcher, AlertPlayer, AlertSink, Player, dispatch, ensure_chime,
};
use rfocus::core::poller::Poller;
use rfocus::core::synth::chime_wav;
use rfocus::core::timer::{AlertReason, FocusTimer, TimerEvent, TimerSettings};
use rfocus::store::log::ActivityLog;
use rfocus::ui::dashboard::{Action, action_for_key};
use std::env;
use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Sink that only remembers what it was asked to do.
#[derive(Default)]
struct Recorder {
    alerts: Mutex<Vec<u32>>,
    notes: Mutex<Vec<String>>,
    journal: Mutex<Vec<String>>,
}

impl AlertSink for Recorder {
    fn alert(&self, repeat: u32) {
        self.alerts.lock().unwrap().push(repeat);
    }

    fn notify(&self, summary: &str, _body: &str) {
        self.notes.lock().unwrap().push(summary.to_string());
    }

    fn record(&self, operation: &str, _message: &str) {
        self.journal.lock().unwrap().push(operation.to_string());
    }
}

#[test]
fn dispatch_routes_each_event() {
    let sink = Recorder::default();
    let now = Local::now();

    dispatch(
        &sink,
        &[
            TimerEvent::Alert {
                at: now,
                repeat: 3,
                reason: AlertReason::CycleCompleted,
            },
            TimerEvent::BreakStarted { until: now },
            TimerEvent::BreakFinished { early: true },
        ],
    );

    assert_eq!(*sink.alerts.lock().unwrap(), vec![3]);
    assert_eq!(*sink.notes.lock().unwrap(), vec!["Break time", "Break over"]);
    assert_eq!(*sink.journal.lock().unwrap(), vec!["break", "break_end"]);
}

#[test]
fn poller_fires_due_alert_and_stops() {
    let settings = TimerSettings {
        min_interval_secs: 1,
        max_interval_secs: 1,
        ..TimerSettings::default()
    };
    let mut timer = FocusTimer::new(settings);
    let mut rng = StdRng::seed_from_u64(1);
    // started two seconds ago: the first alert is already overdue
    timer
        .start(Local::now() - TimeDelta::seconds(2), &mut rng)
        .unwrap();

    let shared = Arc::new(Mutex::new(timer));
    let sink = Arc::new(Recorder::default());

    let mut poller =
        Poller::spawn_with_interval(shared.clone(), sink.clone(), Duration::from_millis(10))
            .unwrap();
    assert!(poller.is_running());
    thread::sleep(Duration::from_millis(300));
    poller.stop();
    assert!(!poller.is_running());

    let alerts = sink.alerts.lock().unwrap().clone();
    assert!(!alerts.is_empty());
    assert!(alerts.iter().all(|r| *r == 1));
    assert_eq!(shared.lock().unwrap().alerts().len(), alerts.len());
}

#[test]
fn desktop_notifications_run_off_the_caller_thread() {
    let silent = || AlertPlayer::new(None, Player::Bell, false);

    let off = AlertDispatcher::new(silent(), false, ActivityLog::disabled());
    assert!(off.send_notification("rfocus", "off").is_none());

    let on = AlertDispatcher::new(silent(), true, ActivityLog::disabled());
    let started = Instant::now();
    let handle = on.send_notification("rfocus", "background").unwrap();
    assert_eq!(handle.thread().name(), Some("rfocus-notify"));

    on.notify("rfocus", "through the sink");
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn configured_player_command_line_is_split() {
    assert_eq!(
        Player::resolve(Some("mpv --really-quiet")),
        Player::External {
            program: "mpv".into(),
            args: vec!["--really-quiet".into()],
        }
    );
}

#[test]
fn ensure_chime_writes_the_synthesized_wav_once() {
    let mut dir = env::temp_dir();
    dir.push("rfocus_chime_test");
    fs::remove_dir_all(&dir).ok();
    let path = dir.join("chime.wav");

    assert_eq!(ensure_chime(&path), Some(path.clone()));
    assert_eq!(fs::read(&path).unwrap(), chime_wav());

    fs::write(&path, b"custom").unwrap();
    assert_eq!(ensure_chime(&path), Some(path.clone()));
    assert_eq!(fs::read(&path).unwrap(), b"custom");
}

#[test]
fn dashboard_key_bindings() {
    let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

    assert_eq!(action_for_key(&key(KeyCode::Char(' '))), Some(Action::Toggle));
    assert_eq!(action_for_key(&key(KeyCode::Char('s'))), Some(Action::Toggle));
    assert_eq!(action_for_key(&key(KeyCode::Char('f'))), Some(Action::EndFragment));
    assert_eq!(action_for_key(&key(KeyCode::Char('c'))), Some(Action::EndCycle));
    assert_eq!(action_for_key(&key(KeyCode::Char('b'))), Some(Action::EndBreak));
    assert_eq!(action_for_key(&key(KeyCode::Char('v'))), Some(Action::ToggleStats));
    assert_eq!(action_for_key(&key(KeyCode::Char('x'))), Some(Action::Export));
    assert_eq!(action_for_key(&key(KeyCode::Char('q'))), Some(Action::Quit));
    assert_eq!(action_for_key(&key(KeyCode::Char('z'))), None);

    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(action_for_key(&ctrl_c), Some(Action::Quit));
}
