use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};

use crate::{
    storage::{session_storage::SessionStorageImpl, task_storage::TaskStorageImpl},
    utils::{
        clock::{today_in, Clock, DefaultClock},
        config::{Config, DateStyle},
    },
};

use super::dates::parse_day;

/// Everything a command needs besides its own arguments.
pub struct AppContext {
    pub dir: PathBuf,
    pub config: Config,
    pub clock: Box<dyn Clock>,
}

impl AppContext {
    pub fn load(dir: PathBuf, date_style: Option<DateStyle>) -> Result<Self> {
        let mut config = Config::load(&dir)?;
        if let Some(date_style) = date_style {
            config.date_style = date_style;
        }
        Ok(Self {
            dir,
            config,
            clock: Box::new(DefaultClock),
        })
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.time().with_timezone(&Local)
    }

    pub fn today(&self) -> NaiveDate {
        today_in(self.clock.as_ref(), &Local)
    }

    /// Goal passed on the command line wins over the configured one.
    pub fn goal(&self, goal_override: Option<u32>) -> u32 {
        goal_override.unwrap_or(self.config.daily_goal_minutes)
    }

    pub fn parse_day(&self, input: Option<&str>, argument: &str) -> Result<NaiveDate> {
        parse_day(input, self.now(), self.config.date_style, argument)
    }

    pub fn session_storage(&self) -> Result<SessionStorageImpl> {
        Ok(SessionStorageImpl::new(self.dir.join("sessions"))?)
    }

    pub fn task_storage(&self) -> Result<TaskStorageImpl> {
        Ok(TaskStorageImpl::new(self.dir.join("tasks"))?)
    }
}
