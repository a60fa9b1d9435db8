//! Focus timer state machine.
//!
//! Every operation takes the current wall-clock time explicitly, so the
//! controller never reads the clock itself. The background poller and the
//! dashboard feed it `Local::now()`; tests feed it fixed instants.

use crate::errors::{AppError, AppResult};
use crate::models::phase::TimerPhase;
use crate::models::session::{SessionRecord, WorkSpan};
use chrono::{DateTime, Local, TimeDelta};
use rand::Rng;
use std::mem;

/// Alerts fired at the end of a work cycle and of a break are played this
/// many times.
pub const LONG_ALERT_REPEAT: u32 = 3;

/// Upper bound for any single timing setting: one day.
pub const MAX_SETTING_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct TimerSettings {
    pub work: TimeDelta,
    pub rest: TimeDelta,
    pub min_interval_secs: u64,
    pub max_interval_secs: u64,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work: TimeDelta::minutes(90),
            rest: TimeDelta::minutes(20),
            min_interval_secs: 3 * 60,
            max_interval_secs: 5 * 60,
        }
    }
}

impl TimerSettings {
    /// Reject settings the timer cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        let limit = TimeDelta::seconds(MAX_SETTING_SECS as i64);

        if self.work <= TimeDelta::zero() || self.rest <= TimeDelta::zero() {
            return Err(AppError::Config(
                "work and break durations must be positive".into(),
            ));
        }
        if self.work > limit || self.rest > limit {
            return Err(AppError::Config(format!(
                "work and break durations cannot exceed {} minutes",
                MAX_SETTING_SECS / 60
            )));
        }
        if self.min_interval_secs == 0 {
            return Err(AppError::Config("alert intervals must be positive".into()));
        }
        if self.min_interval_secs > self.max_interval_secs {
            return Err(AppError::Config(format!(
                "min_interval_secs ({}) is greater than max_interval_secs ({})",
                self.min_interval_secs, self.max_interval_secs
            )));
        }
        if self.max_interval_secs > MAX_SETTING_SECS {
            return Err(AppError::Config(format!(
                "max_interval_secs ({}) cannot exceed {}",
                self.max_interval_secs, MAX_SETTING_SECS
            )));
        }
        Ok(())
    }

    /// Uniform draw in `[min, max]` seconds, both ends included.
    pub fn draw_interval<R: Rng>(&self, rng: &mut R) -> TimeDelta {
        let hi = self.max_interval_secs.min(MAX_SETTING_SECS);
        let lo = self.min_interval_secs.min(hi);
        TimeDelta::seconds(rng.gen_range(lo..=hi) as i64)
    }

    fn rest_span(&self) -> TimeDelta {
        self.rest
            .clamp(TimeDelta::zero(), TimeDelta::seconds(MAX_SETTING_SECS as i64))
    }

    fn cycle_index(&self, work_time: TimeDelta) -> i64 {
        work_time.num_milliseconds() / self.work.num_milliseconds().max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertReason {
    /// A randomized sub-interval ran out.
    Fragment,
    /// The user ended the fragment by hand.
    FragmentEnded,
    /// The user ended the work cycle by hand.
    CycleEnded,
    /// Accumulated work crossed a cycle boundary.
    CycleCompleted,
    BreakFinished,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    Alert {
        at: DateTime<Local>,
        repeat: u32,
        reason: AlertReason,
    },
    BreakStarted {
        until: DateTime<Local>,
    },
    BreakFinished {
        early: bool,
    },
}

/// Read-only view of the timer, for display and export.
#[derive(Debug, Clone)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub fragment_elapsed: TimeDelta,
    pub next_alert_at: Option<DateTime<Local>>,
    pub last_fragment: TimeDelta,
    pub work_time: TimeDelta,
    pub break_remaining: Option<TimeDelta>,
    pub session_start: Option<DateTime<Local>>,
    pub run_time: TimeDelta,
    pub alerts: Vec<DateTime<Local>>,
}

#[derive(Debug, Clone)]
pub struct FocusTimer {
    settings: TimerSettings,
    phase: TimerPhase,
    session_start: Option<DateTime<Local>>,
    pause_start: Option<DateTime<Local>>,
    pure_work: TimeDelta,
    work_start: Option<DateTime<Local>>,
    span_start: Option<DateTime<Local>>,
    fragment_start: Option<DateTime<Local>>,
    last_fragment: TimeDelta,
    next_alert_at: Option<DateTime<Local>>,
    break_ends_at: Option<DateTime<Local>>,
    alerts: Vec<DateTime<Local>>,
    spans: Vec<WorkSpan>,
}

fn elapsed(from: DateTime<Local>, now: DateTime<Local>) -> TimeDelta {
    (now - from).max(TimeDelta::zero())
}

impl FocusTimer {
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            phase: TimerPhase::Idle,
            session_start: None,
            pause_start: None,
            pure_work: TimeDelta::zero(),
            work_start: None,
            span_start: None,
            fragment_start: None,
            last_fragment: TimeDelta::zero(),
            next_alert_at: None,
            break_ends_at: None,
            alerts: Vec::new(),
            spans: Vec::new(),
        }
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn next_alert_at(&self) -> Option<DateTime<Local>> {
        self.next_alert_at
    }

    pub fn break_ends_at(&self) -> Option<DateTime<Local>> {
        self.break_ends_at
    }

    pub fn alerts(&self) -> &[DateTime<Local>] {
        &self.alerts
    }

    pub fn spans(&self) -> &[WorkSpan] {
        &self.spans
    }

    /// Work accumulated so far, including the stretch in progress.
    pub fn work_time(&self, now: DateTime<Local>) -> TimeDelta {
        match self.work_start {
            Some(ws) => self.pure_work + elapsed(ws, now),
            None => self.pure_work,
        }
    }

    fn reject(&self, action: &'static str) -> AppError {
        AppError::InvalidState {
            phase: self.phase.as_str(),
            action,
        }
    }

    fn alert(&mut self, now: DateTime<Local>, repeat: u32, reason: AlertReason) -> TimerEvent {
        self.alerts.push(now);
        TimerEvent::Alert {
            at: now,
            repeat,
            reason,
        }
    }

    /// Fold the running stretch into pure work time and close the open span.
    fn close_stretch(&mut self, now: DateTime<Local>) {
        if let Some(ws) = self.work_start.take() {
            self.pure_work += elapsed(ws, now);
        }
        if let Some(start) = self.span_start.take() {
            self.spans.push(WorkSpan::closed(start, now.max(start)));
        }
    }

    pub fn toggle<R: Rng>(
        &mut self,
        now: DateTime<Local>,
        rng: &mut R,
    ) -> AppResult<Vec<TimerEvent>> {
        if self.phase.is_running() {
            self.pause(now)
        } else {
            self.start(now, rng)
        }
    }

    pub fn start<R: Rng>(
        &mut self,
        now: DateTime<Local>,
        rng: &mut R,
    ) -> AppResult<Vec<TimerEvent>> {
        if !self.phase.can_start() {
            return Err(self.reject("start"));
        }

        match self.session_start {
            None => {
                self.session_start = Some(now);
                self.last_fragment = TimeDelta::zero();
            }
            Some(start) => {
                if let Some(paused_at) = self.pause_start.take() {
                    self.session_start = Some(start + elapsed(paused_at, now));
                }
            }
        }

        self.phase = TimerPhase::Running;
        self.work_start = Some(now);
        self.span_start = Some(now);
        self.fragment_start = Some(now);
        self.next_alert_at = Some(now + self.settings.draw_interval(rng));
        Ok(Vec::new())
    }

    pub fn pause(&mut self, now: DateTime<Local>) -> AppResult<Vec<TimerEvent>> {
        if !self.phase.is_running() {
            return Err(self.reject("pause"));
        }

        self.close_stretch(now);
        self.phase = TimerPhase::Paused;
        self.pause_start = Some(now);
        self.next_alert_at = None;
        Ok(Vec::new())
    }

    /// Close the current fragment early. The next scheduled alert stays put.
    pub fn end_fragment(&mut self, now: DateTime<Local>) -> AppResult<Vec<TimerEvent>> {
        if !self.phase.is_running() {
            return Err(self.reject("end fragment"));
        }

        let event = self.alert(now, 1, AlertReason::FragmentEnded);
        if let Some(start) = self.fragment_start {
            self.last_fragment = elapsed(start, now);
        }
        self.fragment_start = Some(now);
        Ok(vec![event])
    }

    /// Close the work cycle early and go straight into the break.
    pub fn end_cycle(&mut self, now: DateTime<Local>) -> AppResult<Vec<TimerEvent>> {
        if !self.phase.is_running() {
            return Err(self.reject("end cycle"));
        }

        let event = self.alert(now, 1, AlertReason::CycleEnded);
        Ok(vec![event, self.enter_break(now)])
    }

    pub fn end_break(&mut self, now: DateTime<Local>) -> AppResult<Vec<TimerEvent>> {
        if !self.phase.is_break() {
            return Err(self.reject("end break"));
        }
        Ok(self.finish_break(now, true))
    }

    /// One poll step: cycle boundary, alert schedule and break countdown.
    pub fn tick<R: Rng>(&mut self, now: DateTime<Local>, rng: &mut R) -> Vec<TimerEvent> {
        match self.phase {
            TimerPhase::Running => self.tick_running(now, rng),
            TimerPhase::Break => match self.break_ends_at {
                Some(end) if now >= end => self.finish_break(now, false),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn tick_running<R: Rng>(&mut self, now: DateTime<Local>, rng: &mut R) -> Vec<TimerEvent> {
        let total = self.work_time(now);
        if self.settings.cycle_index(total) > self.settings.cycle_index(self.pure_work) {
            let event = self.alert(now, LONG_ALERT_REPEAT, AlertReason::CycleCompleted);
            return vec![event, self.enter_break(now)];
        }

        match self.next_alert_at {
            Some(due) if now >= due => {
                let event = self.alert(now, 1, AlertReason::Fragment);
                if let Some(start) = self.fragment_start {
                    self.last_fragment = elapsed(start, now);
                }
                self.fragment_start = Some(now);
                self.next_alert_at = Some(now + self.settings.draw_interval(rng));
                vec![event]
            }
            _ => Vec::new(),
        }
    }

    fn enter_break(&mut self, now: DateTime<Local>) -> TimerEvent {
        self.close_stretch(now);
        let until = now + self.settings.rest_span();
        self.phase = TimerPhase::Break;
        self.break_ends_at = Some(until);
        self.next_alert_at = None;
        TimerEvent::BreakStarted { until }
    }

    /// Pure work time and the session start survive the break.
    fn finish_break(&mut self, now: DateTime<Local>, early: bool) -> Vec<TimerEvent> {
        let alert = self.alert(now, LONG_ALERT_REPEAT, AlertReason::BreakFinished);
        self.phase = TimerPhase::BreakOver;
        self.break_ends_at = None;
        self.work_start = None;
        self.fragment_start = None;
        vec![alert, TimerEvent::BreakFinished { early }]
    }

    pub fn snapshot(&self, now: DateTime<Local>) -> TimerSnapshot {
        let run_time = match self.session_start {
            Some(start) => elapsed(start, self.pause_start.unwrap_or(now)),
            None => TimeDelta::zero(),
        };

        TimerSnapshot {
            phase: self.phase,
            fragment_elapsed: match (self.phase, self.fragment_start) {
                (TimerPhase::Running, Some(start)) => elapsed(start, now),
                _ => TimeDelta::zero(),
            },
            next_alert_at: self.next_alert_at,
            last_fragment: self.last_fragment,
            work_time: self.work_time(now),
            break_remaining: self.break_ends_at.map(|end| elapsed(now, end)),
            session_start: self.session_start,
            run_time,
            alerts: self.alerts.clone(),
        }
    }

    /// End the session: close whatever is open, hand back what should be
    /// persisted and start over from `Idle`.
    pub fn commit(&mut self, now: DateTime<Local>) -> SessionRecord {
        self.close_stretch(now);

        let record = SessionRecord {
            work_time: self.pure_work,
            alerts: mem::take(&mut self.alerts),
            spans: mem::take(&mut self.spans),
        };

        *self = FocusTimer::new(self.settings.clone());
        record
    }
}
