use std::{future::Future, io::ErrorKind, path::PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::utils::time::date_to_record_name;

/// Stores the daily focus task, a short note of what a day is supposed to be about.
pub trait TaskStorage {
    fn get_task(&self, date: NaiveDate) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Sets the task of a day. A blank task clears it.
    fn set_task(&self, date: NaiveDate, task: &str) -> impl Future<Output = Result<()>>;
}

pub struct TaskStorageImpl {
    task_dir: PathBuf,
}

impl TaskStorageImpl {
    pub fn new(task_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&task_dir)?;

        Ok(Self { task_dir })
    }
}

impl TaskStorage for TaskStorageImpl {
    async fn get_task(&self, date: NaiveDate) -> Result<Option<String>> {
        let path = self.task_dir.join(date_to_record_name(date));
        debug!("Reading task {path:?}");
        match tokio::fs::read_to_string(&path).await {
            Ok(task) => {
                let task = task.trim();
                Ok((!task.is_empty()).then(|| task.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_task(&self, date: NaiveDate, task: &str) -> Result<()> {
        let path = self.task_dir.join(date_to_record_name(date));
        let task = task.trim();
        if task.is_empty() {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => info!("Cleared task for {date}"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            return Ok(());
        }
        tokio::fs::write(&path, task).await?;
        info!("Set task for {date}");
        Ok(())
    }
}
