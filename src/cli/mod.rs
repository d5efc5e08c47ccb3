pub mod context;
pub mod dates;
pub mod output;
pub mod report;
pub mod session;
pub mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use context::AppContext;
use report::{
    process_calendar_command, process_day_command, process_graph_command, CalendarCommand,
    DayCommand, GraphCommand,
};
use session::{process_delete_command, process_log_command, DeleteCommand, LogCommand};
use settings::{process_goal_command, process_task_command, GoalCommand, TaskCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::utils::{
    config::DateStyle,
    dir::{create_application_default_path, create_application_path},
    logging::{enable_logging, CLI_PREFIX},
};

#[derive(Parser, Debug)]
#[command(name = "Focustally", version, long_about = None)]
#[command(about = "Tracks focus sessions and scores your days", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging to the console")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year. Defaults to the configured style")]
    date_style: Option<DateStyle>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Record a completed focus session")]
    Log {
        #[command(flatten)]
        command: LogCommand,
    },
    #[command(about = "Show the focus score, totals and sessions of a day")]
    Day {
        #[command(flatten)]
        command: DayCommand,
    },
    #[command(about = "Show a month of focus scores")]
    Calendar {
        #[command(flatten)]
        command: CalendarCommand,
    },
    #[command(about = "Show focused minutes per day as a bar graph")]
    Graph {
        #[command(flatten)]
        command: GraphCommand,
    },
    #[command(about = "Delete a recorded session")]
    Delete {
        #[command(flatten)]
        command: DeleteCommand,
    },
    #[command(about = "Set or show the focus task of a day")]
    Task {
        #[command(flatten)]
        command: TaskCommand,
    },
    #[command(about = "Set or show the daily goal")]
    Goal {
        #[command(flatten)]
        command: GoalCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let dir = match args.dir {
        Some(dir) => create_application_path(dir)?,
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &dir.join("logs"), logging_level, args.log)?;
    debug!("Using application directory {dir:?}");

    let mut context = AppContext::load(dir, args.date_style)?;

    match args.commands {
        Commands::Log { command } => process_log_command(command, &context).await.map(|_| ()),
        Commands::Day { command } => process_day_command(command, &context).await.map(|_| ()),
        Commands::Calendar { command } => {
            process_calendar_command(command, &context).await.map(|_| ())
        }
        Commands::Graph { command } => process_graph_command(command, &context).await.map(|_| ()),
        Commands::Delete { command } => {
            process_delete_command(command, &context).await.map(|_| ())
        }
        Commands::Task { command } => process_task_command(command, &context).await.map(|_| ()),
        Commands::Goal { command } => process_goal_command(command, &mut context).map(|_| ()),
    }
}
