use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, AsyncSeekExt, AsyncWriteExt, BufReader},
};
use tracing::{debug, info, warn};

use crate::utils::time::date_to_record_name;

use super::entities::FocusSession;

/// Interface for abstracting storage of sessions.
pub trait SessionStorage {
    /// Appends a completed session to the file of the local day it started on.
    fn append_session(&self, session: &FocusSession) -> impl Future<Output = Result<()>>;

    /// Retrieves sessions stored for a certain day, in the order they were written.
    fn get_sessions_for(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<FocusSession>>> + Send;

    /// Removes a session from a day. Returns `false` if there was nothing to remove.
    fn delete_session(&self, date: NaiveDate, id: &str) -> impl Future<Output = Result<bool>>;
}

impl<T: Deref> SessionStorage for T
where
    T::Target: SessionStorage,
{
    fn append_session(&self, session: &FocusSession) -> impl Future<Output = Result<()>> {
        self.deref().append_session(session)
    }

    fn get_sessions_for(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<FocusSession>>> + Send {
        self.deref().get_sessions_for(date)
    }

    fn delete_session(&self, date: NaiveDate, id: &str) -> impl Future<Output = Result<bool>> {
        self.deref().delete_session(date, id)
    }
}

/// The main realization of [SessionStorage]. Every day is a file of json lines.
pub struct SessionStorageImpl {
    session_dir: PathBuf,
}

impl SessionStorageImpl {
    pub fn new(session_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&session_dir)?;

        Ok(Self { session_dir })
    }

    fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.session_dir.join(date_to_record_name(date))
    }

    async fn read_day(path: &Path) -> Result<Vec<FocusSession>> {
        debug!("Extracting {path:?}");
        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };

        file.lock_shared()?;
        let mut reader = BufReader::new(file);
        let lines = read_lines(&mut reader).await;
        reader.into_inner().unlock_async().await?;

        Ok(lines?
            .iter()
            .filter_map(|line| parse_line(path, line))
            .collect())
    }

    /// Drops the line holding session `id`. Lines that don't parse are written back untouched.
    async fn remove_line(file: &mut File, path: &Path, id: &str) -> Result<bool> {
        let lines = read_lines(BufReader::new(&mut *file)).await?;
        let (removed, kept): (Vec<_>, Vec<_>) = lines
            .into_iter()
            .partition(|line| parse_line(path, line).is_some_and(|session| session.id == id));

        match removed.len() {
            0 => return Ok(false),
            1 => {}
            _ => bail!("Session id {id} is not unique in {path:?}"),
        }

        let mut buffer = Vec::<u8>::new();
        for line in kept {
            buffer.extend_from_slice(&line);
            buffer.push(b'\n');
        }

        file.set_len(0).await?;
        file.rewind().await?;
        file.write_all(&buffer).await?;
        file.flush().await?;
        Ok(true)
    }
}

/// Splits a day file into raw lines. Decoding happens per line so one broken line can't hide the
/// rest of the file.
async fn read_lines<R: AsyncBufRead + Unpin>(mut reader: R) -> std::io::Result<Vec<Vec<u8>>> {
    let mut lines = vec![];
    loop {
        let mut line = vec![];
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(lines);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        lines.push(line);
    }
}

fn parse_line(path: &Path, line: &[u8]) -> Option<FocusSession> {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text.trim(),
        Err(e) => {
            warn!(
                "During parsing in path {path:?} found illegal utf-8 line {}: {e}",
                String::from_utf8_lossy(line)
            );
            return None;
        }
    };
    if text.is_empty() {
        return None;
    }

    match serde_json::from_str::<FocusSession>(text) {
        Ok(session) => match session.validate() {
            Ok(()) => Some(session),
            Err(e) => {
                warn!("During parsing in path {path:?} found invalid session {text}: {e}");
                None
            }
        },
        Err(e) => {
            // Edited by hand or cut off by a crash mid-write.
            warn!("During parsing in path {path:?} found illegal json string {text}: {e}");
            None
        }
    }
}

impl SessionStorage for SessionStorageImpl {
    async fn append_session(&self, session: &FocusSession) -> Result<()> {
        session.validate()?;
        let path = self.day_path(session.day_in(&Local));

        let mut line = serde_json::to_vec(session)?;
        line.push(b'\n');

        let mut file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        // Semi-safe acquire-release for a file
        file.lock_exclusive()?;
        let result = async {
            file.write_all(&line).await?;
            file.flush().await
        }
        .await;
        file.unlock_async().await?;
        result?;

        info!("Stored session {} in {path:?}", session.id);
        Ok(())
    }

    async fn get_sessions_for(&self, date: NaiveDate) -> Result<Vec<FocusSession>> {
        Self::read_day(&self.day_path(date)).await
    }

    async fn delete_session(&self, date: NaiveDate, id: &str) -> Result<bool> {
        let path = self.day_path(date);
        let mut file = match File::options().read(true).write(true).open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        // One lock for both the read and the rewrite.
        file.lock_exclusive()?;
        let result = Self::remove_line(&mut file, &path, id).await;
        file.unlock_async().await?;

        let deleted = result?;
        if deleted {
            info!("Deleted session {id} from {path:?}");
        }
        Ok(deleted)
    }
}
