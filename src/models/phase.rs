use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Break,
    BreakOver,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Break => "break",
            TimerPhase::BreakOver => "break over",
        }
    }

    /// Status line shown by the dashboard.
    pub fn status(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "Ready",
            TimerPhase::Running => "Running",
            TimerPhase::Paused => "Paused",
            TimerPhase::Break => "Break time",
            TimerPhase::BreakOver => "Break over, press start to continue working",
        }
    }

    pub fn can_start(&self) -> bool {
        matches!(
            self,
            TimerPhase::Idle | TimerPhase::Paused | TimerPhase::BreakOver
        )
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerPhase::Running)
    }

    pub fn is_break(&self) -> bool {
        matches!(self, TimerPhase::Break)
    }
}
