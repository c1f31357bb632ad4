use anyhow::Result;
use chrono::NaiveDate;
use futures::{pin_mut, stream, StreamExt};
use tracing::{debug, info};

use crate::utils::time::days_before;

use super::{entry::DayEntries, storage::JournalStorage};

/// The most recent day with any tasks. `date` is `None` when nothing was found inside the window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestEntries {
    pub date: Option<NaiveDate>,
    pub entries: DayEntries,
}

/// Walks backwards from the day before `date`, one day at a time, and stops at the first journal
/// that has at least one task. Days without a journal (weekends, holidays) are skipped. At most
/// `max_days` days are inspected.
pub async fn find_latest_entries(
    storage: &impl JournalStorage,
    date: NaiveDate,
    max_days: u32,
) -> Result<LatestEntries> {
    let days = stream::iter(days_before(date, max_days))
        .then(|day| async move { (day, storage.entries_for(day).await) });
    pin_mut!(days);

    while let Some((day, entries)) = days.next().await {
        let entries = entries?;
        if !entries.is_empty() {
            info!("Using journal from {day} with {} tasks", entries.done.len() + entries.todo.len());
            return Ok(LatestEntries {
                date: Some(day),
                entries,
            });
        }
        debug!("Nothing recorded on {day}, looking further back");
    }

    info!("No tasks recorded in the {max_days} days before {date}");
    Ok(LatestEntries::default())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::{
        journal::storage::{JournalDirectory, JournalStorage},
        utils::logging::TEST_LOGGING,
    };

    use super::{find_latest_entries, LatestEntries};

    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();

    #[tokio::test]
    async fn test_finds_yesterday() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let storage = JournalDirectory::new(dir.path().to_owned());
        storage
            .append(TODAY.pred_opt().unwrap(), "- DONE yesterday\n")
            .await?;
        storage
            .append(TODAY, "- TODO today is never looked at\n")
            .await?;

        let latest = find_latest_entries(&storage, TODAY, 7).await?;
        assert_eq!(latest.date, TODAY.pred_opt());
        assert_eq!(latest.entries.done.len(), 1);
        assert!(latest.entries.todo.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_skips_weekend_gap() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let storage = JournalDirectory::new(dir.path().to_owned());
        let friday = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        storage.append(friday, "- TODO friday task\n").await?;
        // A journal with notes only counts as empty.
        storage
            .append(NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(), "just notes\n")
            .await?;

        let latest = find_latest_entries(&storage, TODAY, 7).await?;
        assert_eq!(latest.date, Some(friday));
        assert_eq!(latest.entries.todo.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_window_exhausted() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let storage = JournalDirectory::new(dir.path().to_owned());
        // Just outside of the window.
        storage
            .append(NaiveDate::from_ymd_opt(2025, 4, 27).unwrap(), "- DONE old\n")
            .await?;

        let latest = find_latest_entries(&storage, TODAY, 7).await?;
        assert_eq!(latest, LatestEntries::default());
        assert!(latest.date.is_none());
        assert!(latest.entries.is_empty());

        let latest = find_latest_entries(&storage, TODAY, 8).await?;
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2025, 4, 27));
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_window() -> Result<()> {
        let dir = tempdir()?;
        let storage = JournalDirectory::new(dir.path().to_owned());
        storage
            .append(TODAY.pred_opt().unwrap(), "- DONE yesterday\n")
            .await?;
        let latest = find_latest_entries(&storage, TODAY, 0).await?;
        assert!(latest.date.is_none());
        Ok(())
    }
}
