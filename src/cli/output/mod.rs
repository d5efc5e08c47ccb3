//! Plain text renderings of [DailyStats](crate::analytics::DailyStats). Everything here only reads
//! the stats, and returns strings so commands decide where they go.

pub mod calendar;
pub mod detail;
pub mod graph;

use ansi_term::Style;

/// Formats minutes the way they are shown across the cli, e.g. `45m` or `2h05m`.
pub fn format_minutes(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h{:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// Applies `style` only when colors are enabled. Padding has to happen before painting, escape
/// codes would otherwise count towards the width.
pub(crate) fn paint(text: String, style: Style, color: bool) -> String {
    if color {
        style.paint(text).to_string()
    } else {
        text
    }
}
