use std::fmt::Write;

use ansi_term::{Colour, Style};
use chrono::Datelike;

use crate::analytics::DailyStats;

use super::paint;

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const CELL_WIDTH: usize = 6;

/// Month grid, one cell per day with its Focus Score. `days` is expected to hold a single month in
/// date order.
pub fn render_calendar(days: &[DailyStats], color: bool) -> String {
    let mut out = String::new();
    let Some(first) = days.first() else {
        return out;
    };

    let _ = writeln!(out, "{}", first.date.format("%B %Y"));
    let header = WEEKDAYS
        .iter()
        .map(|v| format!("{v:<width$}", width = CELL_WIDTH))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "{}", header.trim_end());

    let offset = first.date.weekday().num_days_from_monday() as usize;
    let mut row = vec![" ".repeat(CELL_WIDTH); offset];
    for day in days {
        row.push(paint(cell_text(day), cell_style(day), color));
        if row.len() == WEEKDAYS.len() {
            let _ = writeln!(out, "{}", row.join(" "));
            row.clear();
        }
    }
    if !row.is_empty() {
        let _ = writeln!(out, "{}", row.join(" "));
    }

    let met = days.iter().filter(|v| v.goal_met).count();
    let active = days.iter().filter(|v| !v.is_empty()).count();
    let _ = writeln!(
        out,
        "Goal met on {met} of {} days, {active} days with focus sessions",
        days.len()
    );
    out
}

fn cell_text(day: &DailyStats) -> String {
    if day.is_empty() {
        format!("{:>2} {:>3}", day.date.day(), "-")
    } else {
        format!("{:>2} {:>3}", day.date.day(), day.score)
    }
}

fn cell_style(day: &DailyStats) -> Style {
    if day.goal_met {
        Colour::Green.bold()
    } else if !day.is_empty() {
        Colour::Yellow.normal()
    } else {
        Style::new().dimmed()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use crate::{
        analytics::DailyStats,
        storage::entities::{FocusSession, SessionMode},
        utils::time::month_bounds,
    };

    use super::render_calendar;

    fn month(date: NaiveDate) -> Vec<DailyStats> {
        let (start, end) = month_bounds(date);
        start
            .iter_days()
            .take_while(|v| *v <= end)
            .map(DailyStats::empty)
            .collect()
    }

    #[test]
    fn april_2024_layout() {
        let mut days = month(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        days[4].score = 100;
        days[4].goal_met = true;
        days[4].deep_work_minutes = 120;
        days[4].sessions = vec![FocusSession::new(SessionMode::Flow, Utc::now(), 120, None)];

        let out = render_calendar(&days, false);
        let lines = out.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "April 2024");
        assert_eq!(lines[1], "Mo     Tu     We     Th     Fr     Sa     Su");
        // The 1st of April 2024 is a Monday.
        assert_eq!(lines[2], " 1   -  2   -  3   -  4   -  5 100  6   -  7   -");
        assert_eq!(lines[6], "29   - 30   -");
        assert_eq!(
            lines[7],
            "Goal met on 1 of 30 days, 1 days with focus sessions"
        );
    }

    #[test]
    fn month_starting_on_sunday() {
        let days = month(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        let out = render_calendar(&days, false);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[2], format!("{} 1   -", " ".repeat(6 * 7)));
    }

    #[test]
    fn nothing_to_render() {
        assert_eq!(render_calendar(&[], true), "");
    }
}
