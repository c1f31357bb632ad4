//! Builds the plan and review requests and hands them to a [TextGenerator].

pub mod prompt;

use anyhow::Result;
use tracing::{info, instrument};

use crate::{
    config::ProjectConfig,
    journal::lookback::LatestEntries,
    llm::{PromptRequest, TextGenerator},
    progress::{metrics::DailyMetrics, phase::PhaseCalendar},
};

use prompt::{plan_prompt, review_prompt, system_prompt};

/// Stops the plan at the first blank line, the model tends to add commentary after the list.
const PLAN_STOP: &str = "\n\n";

pub struct Coach {
    generator: Box<dyn TextGenerator>,
    project: ProjectConfig,
    calendar: PhaseCalendar,
}

impl Coach {
    pub fn new(
        generator: Box<dyn TextGenerator>,
        project: ProjectConfig,
        calendar: PhaseCalendar,
    ) -> Self {
        Self {
            generator,
            project,
            calendar,
        }
    }

    /// Today's tasks as free text, one per line.
    #[instrument(skip_all, fields(phase = %metrics.phase_code))]
    pub async fn plan(&self, metrics: &DailyMetrics, latest: &LatestEntries) -> Result<String> {
        let request = PromptRequest {
            system: system_prompt(&self.project, &self.calendar, metrics),
            user: plan_prompt(metrics, latest),
            stop: vec![PLAN_STOP.to_string()],
        };
        let plan = self.generator.generate(request).await?;
        info!("Received plan with {} lines", plan.lines().count());
        Ok(plan.trim().to_string())
    }

    /// A short review of the last recorded day.
    #[instrument(skip_all, fields(phase = %metrics.phase_code))]
    pub async fn review(&self, metrics: &DailyMetrics, latest: &LatestEntries) -> Result<String> {
        let request = PromptRequest {
            system: system_prompt(&self.project, &self.calendar, metrics),
            user: review_prompt(metrics, latest),
            stop: vec![],
        };
        let review = self.generator.generate(request).await?;
        info!("Received review with {} lines", review.lines().count());
        Ok(review.trim().to_string())
    }
}
