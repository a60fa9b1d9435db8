use crate::core::timer::TimerSnapshot;
use crate::ui::charts::{DayRow, alert_list};
use crate::utils::seconds_to_hms;
use crate::utils::table::{Column, Table};
use crate::utils::time::delta_to_hms;

/// History table, newest day first.
pub fn history_table(days: &[DayRow<'_>]) -> String {
    let mut table = Table::new(vec![
        Column::new("Date"),
        Column::new("Total time"),
        Column::new("Alerts"),
        Column::new("Sessions"),
    ]);

    for (date, day) in days.iter().rev() {
        table.add_row(vec![
            date.to_string(),
            day.total_time.clone(),
            day.alert_count().to_string(),
            day.session_count().to_string(),
        ]);
    }

    table.render()
}

pub fn totals_line(days: &[DayRow<'_>]) -> String {
    let secs: u64 = days.iter().map(|(_, d)| d.total_seconds()).sum();
    let alerts: usize = days.iter().map(|(_, d)| d.alert_count()).sum();
    let sessions: usize = days.iter().map(|(_, d)| d.session_count()).sum();

    format!(
        "{} day(s), {} total, {} alert(s), {} session(s)",
        days.len(),
        seconds_to_hms(secs as f64),
        alerts,
        sessions
    )
}

/// Summary of the session in progress, for the dashboard stats view.
pub fn session_summary(snapshot: &TimerSnapshot) -> String {
    let started = snapshot
        .session_start
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "--".to_string());

    let mut out = String::new();
    out.push_str(&format!("Session started: {}\n", started));
    out.push_str(&format!("Run time:        {}\n", delta_to_hms(snapshot.run_time)));
    out.push_str(&format!("Work time:       {}\n", delta_to_hms(snapshot.work_time)));
    out.push_str(&format!("Alerts:          {}\n", snapshot.alerts.len()));
    out.push_str(&alert_list(&snapshot.alerts));
    out
}
