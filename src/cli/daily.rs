use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::{
    coach::Coach,
    journal::{
        lookback::{find_latest_entries, LatestEntries},
        storage::JournalStorage,
        writer::{plan_section, review_section},
    },
    llm::LlmError,
    progress::{metrics::DailyMetrics, phase::PhaseCalendar},
    utils::clock::Clock,
};

/// State of the project as seen from `today`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub today: NaiveDate,
    pub latest: LatestEntries,
    pub metrics: DailyMetrics,
}

impl Snapshot {
    /// Finds the last day with tasks and computes its metrics against the current phase.
    pub async fn gather(
        storage: &impl JournalStorage,
        calendar: &PhaseCalendar,
        today: NaiveDate,
        lookback_days: u32,
    ) -> Result<Self> {
        let latest = find_latest_entries(storage, today, lookback_days).await?;
        let phase = calendar.current_phase(today);
        let metrics = DailyMetrics::compute(&latest.entries, phase, today);
        info!(
            phase = %metrics.phase_code,
            completion_rate = metrics.completion_rate,
            efficiency = metrics.efficiency,
            "Computed metrics"
        );
        Ok(Self {
            today,
            latest,
            metrics,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DailyOptions {
    pub lookback_days: u32,
    pub review: bool,
    pub plan: bool,
    /// Print the sections without touching the journal.
    pub dry_run: bool,
}

/// One daily run: review of the last recorded day, then today's plan. Each section is appended as
/// soon as it is generated, so a failing plan request leaves the review in place.
pub async fn run_daily(
    storage: &impl JournalStorage,
    coach: &Coach,
    calendar: &PhaseCalendar,
    clock: &dyn Clock,
    options: DailyOptions,
    out: &mut impl Write,
) -> Result<Snapshot> {
    let snapshot = Snapshot::gather(storage, calendar, clock.today(), options.lookback_days).await?;

    if options.review {
        if snapshot.latest.date.is_some() {
            let review = coach
                .review(&snapshot.metrics, &snapshot.latest)
                .await
                .inspect_err(report_generation_error)?;
            let section = review_section(&review, clock.time());
            emit(storage, snapshot.today, &section, options.dry_run, out).await?;
        } else {
            info!("Nothing recorded recently, skipping review");
        }
    }

    if options.plan {
        let plan = coach
            .plan(&snapshot.metrics, &snapshot.latest)
            .await
            .inspect_err(report_generation_error)?;
        let section = plan_section(&snapshot.metrics, &plan, clock.time());
        emit(storage, snapshot.today, &section, options.dry_run, out).await?;
    }

    Ok(snapshot)
}

/// Console output mirrors exactly what goes into the journal.
async fn emit(
    storage: &impl JournalStorage,
    today: NaiveDate,
    section: &str,
    dry_run: bool,
    out: &mut impl Write,
) -> Result<()> {
    if dry_run {
        info!("Dry run, journal for {today} left untouched");
    } else {
        storage.append(today, section).await?;
    }
    out.write_all(section.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn report_generation_error(e: &anyhow::Error) {
    error!("Text generation failed {e:?}");
    if e
        .downcast_ref::<LlmError>()
        .is_some_and(LlmError::is_auth_or_quota)
    {
        warn!("Check the API key and the account quota of the text-generation service");
    }
}
