use anyhow::Result;
use chrono::{Duration, Local};
use clap::{CommandFactory, Parser};
use tracing::info;

use crate::{
    analytics::range::summarize_day,
    storage::{
        entities::{FocusSession, Rating, SessionMode},
        session_storage::SessionStorage,
    },
};

use super::{
    context::AppContext,
    dates::{parse_moment, DATE_HELP},
    output::format_minutes,
    Args,
};

#[derive(Debug, Parser)]
pub struct LogCommand {
    #[arg(short, long, value_enum, help = "Technique used during the session")]
    mode: SessionMode,
    #[arg(short = 'n', long, help = "Focused minutes completed")]
    minutes: u32,
    #[arg(short, long, help = "Efficiency self-rating from 1 to 5")]
    rating: Option<Rating>,
    #[arg(short, long = "start", help = format!("When the session started. Defaults to now minus its duration. {DATE_HELP}"))]
    start_date: Option<String>,
}

#[derive(Debug, Parser)]
pub struct DeleteCommand {
    #[arg(help = "Id of the session, as shown by `day`")]
    id: String,
    #[arg(short, long, help = format!("Day the session belongs to. Defaults to today. {DATE_HELP}"))]
    date: Option<String>,
}

/// Records a completed session and prints where the day stands afterwards.
pub async fn process_log_command(command: LogCommand, context: &AppContext) -> Result<FocusSession> {
    let session = build_session(command, context)?;
    let storage = context.session_storage()?;
    storage.append_session(&session).await?;

    let date = session.day_in(&Local);
    let goal = context.goal(None);
    let stats = summarize_day(&storage, date, goal, &Local).await?;
    println!(
        "Logged {} {} session {}",
        format_minutes(session.duration_minutes as u64),
        session.mode,
        session.id
    );
    println!(
        "{}: {} of {} focused, score {}",
        date.format("%x"),
        format_minutes(stats.deep_work_minutes),
        format_minutes(goal as u64),
        stats.score
    );
    Ok(session)
}

fn build_session(
    LogCommand {
        mode,
        minutes,
        rating,
        start_date,
    }: LogCommand,
    context: &AppContext,
) -> Result<FocusSession> {
    let now = context.now();
    let start = match start_date {
        Some(start) => parse_moment(&start, now, context.config.date_style, "start")?,
        None => now - Duration::minutes(minutes as i64),
    };
    if start > now {
        return Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                "Only completed sessions can be logged, start is in the future",
            )
            .into());
    }

    let session = FocusSession::new(mode, start.to_utc(), minutes, rating);
    session.validate()?;
    Ok(session)
}

pub async fn process_delete_command(
    DeleteCommand { id, date }: DeleteCommand,
    context: &AppContext,
) -> Result<bool> {
    let date = context.parse_day(date.as_deref(), "date")?;
    let removed = context.session_storage()?.delete_session(date, &id).await?;
    if removed {
        info!("Removed session {id}");
        println!("Deleted session {id}");
    } else {
        println!("No session {id} on {}", date.format("%x"));
    }
    Ok(removed)
}
