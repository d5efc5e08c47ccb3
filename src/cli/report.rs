use std::io::IsTerminal;

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::{CommandFactory, Parser};
use serde::Serialize;

use crate::{
    analytics::{
        range::{goal_streak, summarize_day, summarize_days},
        DailyStats,
    },
    storage::task_storage::TaskStorage,
    utils::time::month_bounds,
};

use super::{
    context::AppContext,
    dates::DATE_HELP,
    output::{
        calendar::render_calendar,
        detail::render_day,
        graph::{render_graph, DEFAULT_BAR_WIDTH},
    },
    Args,
};

/// Days shown by `graph` when no start is given, today included.
const DEFAULT_GRAPH_DAYS: i64 = 14;

#[derive(Debug, Parser)]
pub struct DayCommand {
    #[arg(help = format!("Day to show. Defaults to today. {DATE_HELP}"))]
    date: Option<String>,
    #[arg(long, help = "Daily goal in minutes. Defaults to the configured goal")]
    goal: Option<u32>,
    #[arg(long, help = "Print the day as json")]
    json: bool,
}

#[derive(Debug, Parser)]
pub struct CalendarCommand {
    #[arg(short, long, help = format!("Any day of the month to show. Defaults to today. {DATE_HELP}"))]
    month: Option<String>,
    #[arg(long, help = "Daily goal in minutes. Defaults to the configured goal")]
    goal: Option<u32>,
}

#[derive(Debug, Parser)]
pub struct GraphCommand {
    #[arg(long = "start", short, help = format!("First day of the graph. Defaults to 13 days before the end. {DATE_HELP}"))]
    start_date: Option<String>,
    #[arg(long = "end", short, help = format!("Last day of the graph. Defaults to today. {DATE_HELP}"))]
    end_date: Option<String>,
    #[arg(long, help = "Daily goal in minutes. Defaults to the configured goal")]
    goal: Option<u32>,
    #[arg(long, default_value_t = DEFAULT_BAR_WIDTH, help = "Width of the longest bar")]
    width: usize,
}

/// Shape of `day --json`. Meant for other tools, so it carries the goal the stats were computed with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DayReport<'a> {
    #[serde(flatten)]
    stats: &'a DailyStats,
    goal_minutes: u32,
    task: Option<&'a str>,
}

pub async fn process_day_command(
    DayCommand { date, goal, json }: DayCommand,
    context: &AppContext,
) -> Result<DailyStats> {
    let date = context.parse_day(date.as_deref(), "date")?;
    let goal = context.goal(goal);

    let stats = summarize_day(context.session_storage()?, date, goal, &Local).await?;
    let task = context.task_storage()?.get_task(date).await?;

    if json {
        let report = DayReport {
            stats: &stats,
            goal_minutes: goal,
            task: task.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_day(&stats, task.as_deref(), goal, &Local));
    }
    Ok(stats)
}

pub async fn process_calendar_command(
    CalendarCommand { month, goal }: CalendarCommand,
    context: &AppContext,
) -> Result<Vec<DailyStats>> {
    let (start, end) = month_bounds(context.parse_day(month.as_deref(), "month")?);
    let days = summarize_days(
        context.session_storage()?,
        start,
        end,
        context.goal(goal),
        &Local,
    )
    .await?;

    print!("{}", render_calendar(&days, std::io::stdout().is_terminal()));
    Ok(days)
}

pub async fn process_graph_command(
    GraphCommand {
        start_date,
        end_date,
        goal,
        width,
    }: GraphCommand,
    context: &AppContext,
) -> Result<Vec<DailyStats>> {
    let (start, end) = graph_range(start_date, end_date, context)?;
    let goal = context.goal(goal);
    let days = summarize_days(context.session_storage()?, start, end, goal, &Local).await?;

    print!(
        "{}",
        render_graph(&days, goal, width, std::io::stdout().is_terminal())
    );

    let today = context.today();
    if (start..=end).contains(&today) {
        let streak = goal_streak(&days, today);
        println!("Goal streak: {streak} days");
    }
    Ok(days)
}

fn graph_range(
    start_date: Option<String>,
    end_date: Option<String>,
    context: &AppContext,
) -> Result<(NaiveDate, NaiveDate)> {
    let end = context.parse_day(end_date.as_deref(), "end")?;
    let start = match start_date {
        Some(start) => context.parse_day(Some(&start), "start")?,
        None => end - Duration::days(DEFAULT_GRAPH_DAYS - 1),
    };
    if start > end {
        return Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Start {start} is after end {end}"),
            )
            .into());
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Duration, Local, NaiveDate, TimeZone, Utc};
    use clap::Parser;

    use crate::{
        cli::{
            context::test_context::frozen_context,
            session::{process_log_command, LogCommand},
        },
        storage::task_storage::TaskStorage,
    };

    use super::{
        graph_range, process_calendar_command, process_day_command, process_graph_command,
        CalendarCommand, DayCommand, GraphCommand,
    };

    #[tokio::test]
    async fn day_after_logging() -> Result<()> {
        // A day later in UTC is past the 20th everywhere, the sessions below are always complete.
        let now = Utc.with_ymd_and_hms(2025, 3, 21, 12, 0, 0).unwrap();
        let (context, _dir) = frozen_context(now);
        let day = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

        for args in [
            ["-m", "pomodoro", "-n", "25", "-s", "20/03/2025 09:00"],
            ["-m", "deep_work", "-n", "95", "-s", "20/03/2025 10:00"],
        ] {
            let command = LogCommand::parse_from(std::iter::once("log").chain(args));
            process_log_command(command, &context).await?;
        }
        context.task_storage()?.set_task(day, "ship it").await?;

        let stats = process_day_command(
            DayCommand::parse_from(["day", "20/03/2025", "--json"]),
            &context,
        )
        .await?;

        assert_eq!(stats.date, day);
        assert_eq!(stats.pomodoros, 1);
        assert_eq!(stats.deep_work_minutes, 120);
        assert!(stats.goal_met);
        assert_eq!(stats.score, 100);
        Ok(())
    }

    #[tokio::test]
    async fn empty_day_with_goal_override() -> Result<()> {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 14, 30, 0).unwrap();
        let (context, _dir) = frozen_context(now);

        let stats = process_day_command(
            DayCommand::parse_from(["day", "10/03/2025", "--goal", "30"]),
            &context,
        )
        .await?;

        assert_eq!(stats.date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert!(stats.is_empty());
        assert!(!stats.goal_met);
        Ok(())
    }

    #[tokio::test]
    async fn calendar_covers_month() -> Result<()> {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();
        let (context, _dir) = frozen_context(now);

        let days = process_calendar_command(
            CalendarCommand::parse_from(["calendar", "--month", "15/02/2024"]),
            &context,
        )
        .await?;

        assert_eq!(days.len(), 29);
        assert!(days.iter().all(|v| v.is_empty()));
        Ok(())
    }

    #[tokio::test]
    async fn graph_defaults_to_two_weeks() -> Result<()> {
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let (context, _dir) = frozen_context(now);
        let today = now.with_timezone(&Local).date_naive();

        let (start, end) = graph_range(None, None, &context)?;
        assert_eq!(end, today);
        assert_eq!(end - start, Duration::days(13));

        assert!(graph_range(Some("20/03/2025".into()), Some("10/03/2025".into()), &context).is_err());

        let days =
            process_graph_command(GraphCommand::parse_from(["graph", "--width", "20"]), &context)
                .await?;
        assert_eq!(days.len(), 14);
        Ok(())
    }
}
