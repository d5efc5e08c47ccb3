use std::fmt::Write;

use ansi_term::Colour;

use crate::analytics::DailyStats;

use super::{format_minutes, paint};

pub const DEFAULT_BAR_WIDTH: usize = 40;

/// One horizontal bar per day of focused minutes. Bars share a scale that always fits the goal, so
/// a bar reaching the `|` marker means the goal was met.
pub fn render_graph(days: &[DailyStats], goal_minutes: u32, width: usize, color: bool) -> String {
    let mut out = String::new();
    let max_minutes = days
        .iter()
        .map(|v| v.deep_work_minutes)
        .max()
        .unwrap_or(0)
        .max(goal_minutes as u64)
        .max(1);

    let goal_column = scaled(goal_minutes as u64, max_minutes, width);

    for day in days {
        let filled = scaled(day.deep_work_minutes, max_minutes, width);
        let mut bar = "█".repeat(filled);
        if goal_minutes > 0 && filled < goal_column {
            bar += &" ".repeat(goal_column - filled - 1);
            bar.push('|');
        }
        let bar_width = filled.max(goal_column);
        let padding = " ".repeat(width.saturating_sub(bar_width));

        let colour = if day.goal_met {
            Colour::Green
        } else {
            Colour::Yellow
        };
        let _ = writeln!(
            out,
            "{}  {}{}  {:>6}  {:>3}",
            day.date.format("%a %d/%m"),
            paint(bar, colour.normal(), color),
            padding,
            format_minutes(day.deep_work_minutes),
            day.score
        );
    }
    out
}

fn scaled(minutes: u64, max_minutes: u64, width: usize) -> usize {
    ((minutes as f64 / max_minutes as f64) * width as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::analytics::DailyStats;

    use super::render_graph;

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();

    fn day(offset: u64, minutes: u64, score: u8, goal_met: bool) -> DailyStats {
        DailyStats {
            deep_work_minutes: minutes,
            score,
            goal_met,
            ..DailyStats::empty(TEST_DATE + chrono::Days::new(offset))
        }
    }

    #[test]
    fn bars_share_scale() {
        let days = vec![day(0, 120, 100, true), day(1, 60, 50, false), day(2, 0, 0, false)];

        let out = render_graph(&days, 120, 10, false);
        let lines = out.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], format!("Fri 05/04  {}   2h00m  100", "█".repeat(10)));
        assert_eq!(lines[1], format!("Sat 06/04  {}    |   1h00m   50", "█".repeat(5)));
        assert_eq!(lines[2], format!("Sun 07/04  {}|      0m    0", " ".repeat(9)));
    }

    #[test]
    fn goal_scaled_when_exceeded() {
        let days = vec![day(0, 240, 100, true)];
        let out = render_graph(&days, 120, 10, false);
        assert_eq!(out, format!("Fri 05/04  {}   4h00m  100\n", "█".repeat(10)));
    }

    #[test]
    fn zero_goal() {
        let days = vec![day(0, 0, 0, false)];
        let out = render_graph(&days, 0, 4, false);
        assert_eq!(out, format!("Fri 05/04{}0m    0\n", " ".repeat(12)));
    }
}
