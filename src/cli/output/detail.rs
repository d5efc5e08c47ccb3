use std::fmt::Write;

use chrono::TimeZone;

use crate::analytics::{mode_breakdown, DailyStats};

use super::format_minutes;

/// Day detail panel: headline numbers, the daily task, minutes per mode and every session.
pub fn render_day<Tz: TimeZone>(
    stats: &DailyStats,
    task: Option<&str>,
    goal_minutes: u32,
    tz: &Tz,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    let goal_state = if stats.goal_met { "met" } else { "not met" };

    // Writing into a String can't fail.
    let _ = writeln!(out, "{}", stats.date.format("%A %d %B %Y"));
    if let Some(task) = task {
        let _ = writeln!(out, "Task        {task}");
    }

    if stats.is_empty() {
        let _ = writeln!(out, "No focus sessions yet");
        let _ = writeln!(out, "Goal        {}", format_minutes(goal_minutes as u64));
        return out;
    }

    let _ = writeln!(out, "Focus score {}", stats.score);
    let _ = writeln!(
        out,
        "Focused     {} of {} ({goal_state})",
        format_minutes(stats.deep_work_minutes),
        format_minutes(goal_minutes as u64)
    );
    let _ = writeln!(out, "Pomodoros   {}", stats.pomodoros);

    let _ = writeln!(out, "\nModes");
    for (mode, minutes) in mode_breakdown(stats) {
        let _ = writeln!(out, "  {:<10} {}", mode.to_string(), format_minutes(minutes));
    }

    let _ = writeln!(out, "\nSessions");
    for session in &stats.sessions {
        let start = session.start_time.with_timezone(tz);
        let rating = session
            .rating
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "  {}  {:<10} {:>6}  {:>3}  {}",
            start.format("%H:%M"),
            session.mode.to_string(),
            format_minutes(session.duration_minutes as u64),
            rating,
            session.id
        );
    }
    out
}
