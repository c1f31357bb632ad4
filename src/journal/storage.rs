use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tokio::{
    fs::{File, OpenOptions},
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
};
use tracing::{debug, info};

use crate::utils::time::date_to_journal_name;

use super::entry::{parse_line, DayEntries};

/// Interface for abstracting access to the daily journal files.
pub trait JournalStorage {
    /// Retrieves tasks written down for a certain day. A day without a journal file has no
    /// tasks, this is not an error.
    fn entries_for(&self, date: NaiveDate) -> impl Future<Output = Result<DayEntries>> + Send;

    /// Appends a block of text at the end of the journal for `date`, creating the file if needed.
    fn append(&self, date: NaiveDate, section: &str) -> impl Future<Output = Result<()>> + Send;
}

impl<T: Deref> JournalStorage for T
where
    T::Target: JournalStorage,
{
    fn entries_for(&self, date: NaiveDate) -> impl Future<Output = Result<DayEntries>> + Send {
        self.deref().entries_for(date)
    }

    fn append(&self, date: NaiveDate, section: &str) -> impl Future<Output = Result<()>> + Send {
        self.deref().append(date, section)
    }
}

/// The main realization of [JournalStorage]: a directory of `YYYY_MM_DD.md` files, the way
/// Logseq keeps its journals.
pub struct JournalDirectory {
    journal_dir: PathBuf,
}

impl JournalDirectory {
    pub fn new(journal_dir: PathBuf) -> Self {
        Self { journal_dir }
    }

    pub fn journal_path(&self, date: NaiveDate) -> PathBuf {
        self.journal_dir.join(date_to_journal_name(date))
    }

    async fn read_entries(path: &Path) -> Result<DayEntries, std::io::Error> {
        debug!("Reading {path:?}");
        let file = File::open(path).await?;
        let mut lines = BufReader::new(file).lines();
        let mut entries = DayEntries::default();
        while let Some(line) = lines.next_line().await? {
            if let Some(record) = parse_line(&line) {
                entries.push(record);
            }
        }
        Ok(entries)
    }
}

impl JournalStorage for JournalDirectory {
    async fn entries_for(&self, date: NaiveDate) -> Result<DayEntries> {
        let path = self.journal_path(date);
        match Self::read_entries(&path).await {
            Ok(entries) => {
                debug!(
                    "Found {} done and {} open tasks for {date}",
                    entries.done.len(),
                    entries.todo.len()
                );
                Ok(entries)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No journal for {date}");
                Ok(DayEntries::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read journal {path:?}")),
        }
    }

    async fn append(&self, date: NaiveDate, section: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.journal_dir)
            .await
            .with_context(|| format!("Failed to create journal directory {:?}", self.journal_dir))?;

        let path = self.journal_path(date);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open journal {path:?}"))?;
        file.write_all(section.as_bytes()).await?;
        file.flush().await?;
        info!("Appended {} bytes to {path:?}", section.len());
        Ok(())
    }
}
