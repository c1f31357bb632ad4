use std::fmt;

use chrono::NaiveDate;
use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use thiserror::Error;

/// A fixed calendar window of the project plan. Both `start` and `end` are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDefinition {
    pub code: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub start: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    pub end: NaiveDate,
    pub description: String,
}

impl PhaseDefinition {
    pub fn new(code: &str, start: NaiveDate, end: NaiveDate, description: &str) -> Self {
        Self {
            code: code.into(),
            start,
            end,
            description: description.into(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Elapsed share of the window in whole days, clamped to `[0, 1]`.
    pub fn time_progress(&self, today: NaiveDate) -> f64 {
        if today <= self.start {
            return 0.;
        }
        if today >= self.end {
            return 1.;
        }
        (today - self.start).num_days() as f64 / (self.end - self.start).num_days() as f64
    }
}

/// Accepts `"2025-04-22"` as well as the bare TOML date `2025-04-22`.
fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    struct DateVisitor;

    impl<'de> Visitor<'de> for DateVisitor {
        type Value = NaiveDate;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a date like 2025-04-22")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<NaiveDate, E> {
            value.parse().map_err(E::custom)
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<NaiveDate, A::Error> {
            let datetime =
                toml::value::Datetime::deserialize(de::value::MapAccessDeserializer::new(map))?;
            match (datetime.date, datetime.time) {
                (Some(date), None) => NaiveDate::from_ymd_opt(
                    date.year.into(),
                    date.month.into(),
                    date.day.into(),
                )
                .ok_or_else(|| de::Error::custom(format!("invalid date {datetime}"))),
                _ => Err(de::Error::custom(format!(
                    "expected a date without time, got {datetime}"
                ))),
            }
        }
    }

    deserializer.deserialize_any(DateVisitor)
}

#[derive(Debug, Error, PartialEq)]
pub enum CalendarError {
    #[error("Phase calendar needs at least one phase")]
    Empty,
    #[error("Phase {code} ends ({end}) before it starts ({start})")]
    Inverted {
        code: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Ordered, non-empty list of phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PhaseDefinition>", into = "Vec<PhaseDefinition>")]
pub struct PhaseCalendar {
    phases: Vec<PhaseDefinition>,
}

impl PhaseCalendar {
    pub fn new(phases: Vec<PhaseDefinition>) -> Result<Self, CalendarError> {
        if phases.is_empty() {
            return Err(CalendarError::Empty);
        }
        if let Some(phase) = phases.iter().find(|p| p.end < p.start) {
            return Err(CalendarError::Inverted {
                code: phase.code.clone(),
                start: phase.start,
                end: phase.end,
            });
        }
        Ok(Self { phases })
    }

    pub fn phases(&self) -> &[PhaseDefinition] {
        &self.phases
    }

    /// The phase whose window contains `today`. Outside of every window the last phase is
    /// reported, so there is always a current phase.
    pub fn current_phase(&self, today: NaiveDate) -> &PhaseDefinition {
        self.phases
            .iter()
            .find(|phase| phase.contains(today))
            .or_else(|| self.phases.last())
            .expect("Calendar is never empty")
    }
}

impl TryFrom<Vec<PhaseDefinition>> for PhaseCalendar {
    type Error = CalendarError;

    fn try_from(value: Vec<PhaseDefinition>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhaseCalendar> for Vec<PhaseDefinition> {
    fn from(value: PhaseCalendar) -> Self {
        value.phases
    }
}

impl Default for PhaseCalendar {
    /// The thesis timeline the tool was first written for.
    fn default() -> Self {
        let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).expect("valid calendar date");
        Self {
            phases: vec![
                PhaseDefinition::new(
                    "P0",
                    date(4, 22),
                    date(5, 15),
                    "2D CFD: Stokes5 & focusing wave, grid convergence (<3%)",
                ),
                PhaseDefinition::new(
                    "P1",
                    date(5, 16),
                    date(6, 10),
                    "2D NewWave focusing wave + draft",
                ),
                PhaseDefinition::new(
                    "P2",
                    date(6, 11),
                    date(7, 1),
                    "2D wind-wave coupling, reflection (<2%)",
                ),
                PhaseDefinition::new(
                    "P3",
                    date(7, 2),
                    date(7, 20),
                    "3D FOWT static blades ×2 moorings",
                ),
                PhaseDefinition::new(
                    "P4",
                    date(7, 21),
                    date(8, 1),
                    "Thesis >=60 p + PPT 20 p",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{CalendarError, PhaseCalendar, PhaseDefinition};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_time_progress_bounds() {
        let phase = PhaseDefinition::new("X", date(3, 1), date(3, 11), "ten days");
        assert_eq!(phase.time_progress(date(2, 1)), 0.);
        assert_eq!(phase.time_progress(date(3, 1)), 0.);
        assert_eq!(phase.time_progress(date(3, 6)), 0.5);
        assert_eq!(phase.time_progress(date(3, 11)), 1.);
        assert_eq!(phase.time_progress(date(4, 1)), 1.);
    }

    #[test]
    fn test_single_day_phase() {
        let phase = PhaseDefinition::new("X", date(3, 1), date(3, 1), "one day");
        assert_eq!(phase.time_progress(date(3, 1)), 0.);
        assert_eq!(phase.time_progress(date(3, 2)), 1.);
    }

    #[test]
    fn test_current_phase_inside_windows() {
        let calendar = PhaseCalendar::default();
        assert_eq!(calendar.current_phase(date(4, 22)).code, "P0");
        assert_eq!(calendar.current_phase(date(5, 16)).code, "P1");
        assert_eq!(calendar.current_phase(date(7, 1)).code, "P2");
    }

    #[test]
    fn test_phase_end_is_inclusive() {
        let calendar = PhaseCalendar::default();
        let phase = calendar.current_phase(date(5, 15));
        assert_eq!(phase.code, "P0");
        assert_eq!(phase.time_progress(date(5, 15)), 1.);
    }

    #[test]
    fn test_outside_calendar_falls_back_to_last() {
        let calendar = PhaseCalendar::default();
        assert_eq!(calendar.current_phase(date(9, 1)).code, "P4");
        assert_eq!(calendar.current_phase(date(1, 1)).code, "P4");
    }

    #[test]
    fn test_gap_between_phases_falls_back_to_last() {
        let calendar = PhaseCalendar::new(vec![
            PhaseDefinition::new("A", date(1, 1), date(1, 10), "a"),
            PhaseDefinition::new("B", date(2, 1), date(2, 10), "b"),
        ])
        .unwrap();
        assert_eq!(calendar.current_phase(date(1, 20)).code, "B");
    }

    #[test]
    fn test_invalid_calendars() {
        assert_eq!(PhaseCalendar::new(vec![]), Err(CalendarError::Empty));
        assert!(matches!(
            PhaseCalendar::new(vec![PhaseDefinition::new("A", date(2, 1), date(1, 1), "a")]),
            Err(CalendarError::Inverted { .. })
        ));
    }
}
