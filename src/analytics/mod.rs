//! Daily Focus Analytics. Turns the raw session log into one [DailyStats] per calendar day.
//!
//! Everything in here is pure. Sessions are passed in explicitly and only ever borrowed, so the
//! same input always yields the same [DailyStats] and days can be aggregated independently.

pub mod range;
pub mod scoring;

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, TimeZone};
use scoring::{score, FocusTotals};
use serde::Serialize;
use tracing::trace;

use crate::storage::entities::{FocusSession, SessionMode};

/// Per-day summary used by calendar, day detail and graph views. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: NaiveDate,
    pub score: u8,
    pub pomodoros: usize,
    /// Total focused minutes of the day across every mode, not only deep work.
    pub deep_work_minutes: u64,
    pub sessions: Vec<FocusSession>,
    pub goal_met: bool,
}

impl DailyStats {
    /// State of a day without any activity.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            score: 0,
            pomodoros: 0,
            deep_work_minutes: 0,
            sessions: vec![],
            goal_met: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Aggregates sessions for `date` using local day boundaries.
pub fn aggregate(sessions: &[FocusSession], date: NaiveDate, goal_minutes: u32) -> DailyStats {
    aggregate_in(sessions, date, goal_minutes, &Local)
}

/// Aggregates sessions whose start falls on `date` in `tz`. Sessions from other days are ignored,
/// so the whole log can be passed in.
///
/// Sessions are expected to be valid, see [FocusSession::validate].
pub fn aggregate_in<Tz: TimeZone>(
    sessions: &[FocusSession],
    date: NaiveDate,
    goal_minutes: u32,
    tz: &Tz,
) -> DailyStats {
    let mut day_sessions = sessions
        .iter()
        .filter(|session| session.day_in(tz) == date)
        .cloned()
        .collect::<Vec<_>>();

    if day_sessions.is_empty() {
        return DailyStats::empty(date);
    }

    // Stable, so sessions starting at the same second keep their log order.
    day_sessions.sort_by_key(|session| session.start_time);

    let totals = FocusTotals::from_sessions(&day_sessions);
    let outcome = score(&totals, goal_minutes);
    trace!(
        "Aggregated {date}: {} sessions, {} minutes, score {}",
        totals.session_count,
        totals.total_minutes,
        outcome.score
    );

    DailyStats {
        date,
        score: outcome.score,
        pomodoros: totals.pomodoros,
        deep_work_minutes: totals.total_minutes,
        sessions: day_sessions,
        goal_met: outcome.goal_met,
    }
}

/// Minutes spent in every mode that was used during the day.
pub fn mode_breakdown(stats: &DailyStats) -> BTreeMap<SessionMode, u64> {
    let mut breakdown = BTreeMap::new();
    for session in &stats.sessions {
        *breakdown.entry(session.mode).or_insert(0) += session.duration_minutes as u64;
    }
    breakdown
}
