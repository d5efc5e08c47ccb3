use std::{collections::HashSet, sync::Arc};

use anyhow::Result;
use chrono::{NaiveDate, TimeZone};
use futures::{stream, Stream, StreamExt};
use tracing::{error, instrument};

use crate::storage::{entities::FocusSession, session_storage::SessionStorage};

use super::{aggregate_in, DailyStats};

/// How many day files are read at the same time.
const CONCURRENT_DAYS: usize = 4;

/// Loads sessions for every date from `start` to `end` (both inclusive). Days are read a few at a
/// time but come out in date order.
pub fn sessions_between(
    storage: impl SessionStorage,
    start: NaiveDate,
    end: NaiveDate,
) -> impl Stream<Item = Result<(NaiveDate, Vec<FocusSession>)>> {
    let storage = Arc::new(storage);

    stream::iter(date_range(start, end))
        .map(move |day| {
            let storage = storage.clone();
            async move {
                storage
                    .get_sessions_for(day)
                    .await
                    .inspect_err(|e| error!("Failed to load sessions for {day} {e}"))
                    .map(|sessions| (day, sessions))
            }
        })
        .buffered(CONCURRENT_DAYS)
}

/// Builds one [DailyStats] per date in the range, including empty days, so the result can be laid
/// out directly on a calendar or a graph axis.
#[instrument(skip(storage, tz))]
pub async fn summarize_days<Tz: TimeZone>(
    storage: impl SessionStorage,
    start: NaiveDate,
    end: NaiveDate,
    goal_minutes: u32,
    tz: &Tz,
) -> Result<Vec<DailyStats>> {
    let sessions = sessions_around(storage, start, end).await?;
    Ok(date_range(start, end)
        .map(|date| aggregate_in(&sessions, date, goal_minutes, tz))
        .collect())
}

/// [summarize_days] for a single date.
pub async fn summarize_day<Tz: TimeZone>(
    storage: impl SessionStorage,
    date: NaiveDate,
    goal_minutes: u32,
    tz: &Tz,
) -> Result<DailyStats> {
    let sessions = sessions_around(storage, date, date).await?;
    Ok(aggregate_in(&sessions, date, goal_minutes, tz))
}

/// Every session from the files of `start..=end` plus one file on each side. A file holds the
/// sessions of the local date they were written under, which shifts when the zone changes.
async fn sessions_around(
    storage: impl SessionStorage,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<FocusSession>> {
    let first = start.pred_opt().unwrap_or(start);
    let last = end.succ_opt().unwrap_or(end);

    let mut days = std::pin::pin!(sessions_between(storage, first, last));
    let mut sessions = vec![];
    while let Some(day) = days.next().await {
        let (_, mut day_sessions) = day?;
        sessions.append(&mut day_sessions);
    }
    Ok(sessions)
}

/// Number of consecutive goal-met days ending at `today`. A today that hasn't met the goal yet
/// doesn't break the streak, counting starts from yesterday then.
pub fn goal_streak(days: &[DailyStats], today: NaiveDate) -> u32 {
    let met = days
        .iter()
        .filter(|day| day.goal_met)
        .map(|day| day.date)
        .collect::<HashSet<_>>();

    let mut current = if met.contains(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut streak = 0;
    while let Some(day) = current.filter(|day| met.contains(day)) {
        streak += 1;
        current = day.pred_opt();
    }
    streak
}

fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
