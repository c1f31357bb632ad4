use chrono::NaiveDate;

use crate::journal::entry::DayEntries;

use super::phase::PhaseDefinition;

/// Everything the prompts and the journal header need to know about the previous working day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMetrics {
    pub completion_rate: f64,
    pub time_progress: f64,
    pub total_estimated: f64,
    pub total_spent: f64,
    pub efficiency: f64,
    pub phase_code: String,
    pub phase_description: String,
}

impl DailyMetrics {
    pub fn compute(entries: &DayEntries, phase: &PhaseDefinition, today: NaiveDate) -> Self {
        let total_estimated = entries.done.iter().map(|t| t.estimated_hours).sum::<f64>()
            + entries.todo.iter().map(|t| t.estimated_hours).sum::<f64>();
        let total_spent = entries.done.iter().map(|t| t.actual_hours).sum::<f64>()
            + entries.todo.iter().map(|t| t.spent_hours).sum::<f64>();

        Self {
            completion_rate: completion_rate(entries.done.len(), entries.todo.len()),
            time_progress: phase.time_progress(today),
            total_estimated,
            total_spent,
            efficiency: efficiency(total_spent, total_estimated),
            phase_code: phase.code.clone(),
            phase_description: phase.description.clone(),
        }
    }
}

/// Share of finished tasks, `0` when nothing was planned.
pub fn completion_rate(done: usize, todo: usize) -> f64 {
    match done + todo {
        0 => 0.,
        total => done as f64 / total as f64,
    }
}

/// Actual over estimated hours. Without an estimate the day counts as being on plan.
pub fn efficiency(total_spent: f64, total_estimated: f64) -> f64 {
    if total_estimated == 0. {
        1.
    } else {
        total_spent / total_estimated
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{
        journal::entry::{parse_journal, DayEntries},
        progress::phase::PhaseDefinition,
    };

    use super::{completion_rate, efficiency, DailyMetrics};

    fn test_phase() -> PhaseDefinition {
        PhaseDefinition::new(
            "P0",
            NaiveDate::from_ymd_opt(2025, 4, 22).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            "grid convergence",
        )
    }

    #[test]
    fn test_yesterday_scenario() {
        let entries = parse_journal(
            "- DONE Run mesh convergence case (预计 3h) [耗时 4h]\n\
             - TODO Draft intro section (预计 2h)\n",
        );
        let today = NaiveDate::from_ymd_opt(2025, 4, 27).unwrap();
        let metrics = DailyMetrics::compute(&entries, &test_phase(), today);
        assert_eq!(metrics.total_estimated, 5.);
        assert_eq!(metrics.total_spent, 4.);
        assert_eq!(metrics.completion_rate, 0.5);
        assert_eq!(metrics.efficiency, 0.8);
        assert_eq!(metrics.time_progress, 0.5);
        assert_eq!(metrics.phase_code, "P0");
        assert_eq!(metrics.phase_description, "grid convergence");
    }

    #[test]
    fn test_open_tasks_count_spent_hours() {
        let entries = parse_journal(
            "- TODO Reflection study (预计 4h) [已耗时 3h]\n\
             - DONE Email (预计 0.5h)\n",
        );
        let metrics = DailyMetrics::compute(
            &entries,
            &test_phase(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        assert_eq!(metrics.total_estimated, 4.5);
        assert_eq!(metrics.total_spent, 3.5);
        assert_eq!(metrics.time_progress, 1.);
    }

    #[test]
    fn test_empty_day() {
        let metrics = DailyMetrics::compute(
            &DayEntries::default(),
            &test_phase(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        );
        assert_eq!(metrics.completion_rate, 0.);
        assert_eq!(metrics.efficiency, 1.);
        assert_eq!(metrics.total_estimated, 0.);
        assert_eq!(metrics.total_spent, 0.);
        assert_eq!(metrics.time_progress, 0.);
    }

    #[test]
    fn test_ratio_helpers() {
        assert_eq!(completion_rate(0, 0), 0.);
        assert_eq!(completion_rate(3, 1), 0.75);
        assert_eq!(efficiency(3., 0.), 1.);
        assert_eq!(efficiency(6., 4.), 1.5);
    }
}
