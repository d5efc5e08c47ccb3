use anyhow::Result;
use clap::Parser;

use crate::storage::task_storage::TaskStorage;

use super::{context::AppContext, dates::DATE_HELP, output::format_minutes};

#[derive(Debug, Parser)]
pub struct TaskCommand {
    #[arg(help = "New focus task. Shows the current one when missing, an empty string clears it")]
    text: Option<String>,
    #[arg(short, long, help = format!("Day of the task. Defaults to today. {DATE_HELP}"))]
    date: Option<String>,
}

#[derive(Debug, Parser)]
pub struct GoalCommand {
    #[arg(help = "New daily goal in minutes. Shows the current goal when missing")]
    minutes: Option<u32>,
}

pub async fn process_task_command(
    TaskCommand { text, date }: TaskCommand,
    context: &AppContext,
) -> Result<Option<String>> {
    let date = context.parse_day(date.as_deref(), "date")?;
    let storage = context.task_storage()?;
    if let Some(text) = text {
        storage.set_task(date, &text).await?;
    }

    let task = storage.get_task(date).await?;
    match &task {
        Some(task) => println!("{}: {task}", date.format("%x")),
        None => println!("{}: no focus task", date.format("%x")),
    }
    Ok(task)
}

pub fn process_goal_command(
    GoalCommand { minutes }: GoalCommand,
    context: &mut AppContext,
) -> Result<u32> {
    if let Some(minutes) = minutes {
        context.config.daily_goal_minutes = minutes;
        context.config.save(&context.dir)?;
    }
    let goal = context.config.daily_goal_minutes;
    if goal == 0 {
        println!("Daily goal: none, any focused minute counts");
    } else {
        println!("Daily goal: {}", format_minutes(goal as u64));
    }
    Ok(goal)
}
