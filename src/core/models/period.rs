//! Class period model

use crate::core::error::ValidationError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One numbered period slot of the school day (e.g. 1st period, 8:30-9:20)
///
/// Periods are shared by all weekdays. Their number is their position in the
/// stored list plus one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassPeriod {
    /// Unique identifier
    pub id: Uuid,
    /// Start time of day
    pub start: NaiveTime,
    /// End time of day
    pub end: NaiveTime,
}

impl ClassPeriod {
    /// Create a period with a fresh identifier, rejecting `start >= end`
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PeriodOrder`] when the period does not start before it ends.
    pub fn try_new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::PeriodOrder { start, end });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            start,
            end,
        })
    }

    /// Change the times of this period, keeping its identifier
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PeriodOrder`] and leaves the period unchanged
    /// when `start >= end`.
    pub fn retime(&mut self, start: NaiveTime, end: NaiveTime) -> Result<(), ValidationError> {
        if start >= end {
            return Err(ValidationError::PeriodOrder { start, end });
        }
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Whether the period has finished at `time`
    #[must_use]
    pub fn has_ended_by(&self, time: NaiveTime) -> bool {
        self.end <= time
    }

    /// Length of the period in minutes
    #[must_use]
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// `H:MM-H:MM` label
    #[must_use]
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start.format("%-H:%M"), self.end.format("%-H:%M"))
    }
}

/// Start and end (hour, minute) of the periods seeded on first run
const DEFAULT_PERIOD_TIMES: [((u32, u32), (u32, u32)); 6] = [
    ((8, 30), (9, 20)),
    ((9, 30), (10, 20)),
    ((10, 30), (11, 20)),
    ((11, 30), (12, 20)),
    ((13, 5), (13, 55)),
    ((14, 5), (14, 55)),
];

/// The six periods seeded on first run
#[must_use]
pub fn default_periods() -> Vec<ClassPeriod> {
    DEFAULT_PERIOD_TIMES
        .iter()
        .filter_map(|&((sh, sm), (eh, em))| {
            let start = NaiveTime::from_hms_opt(sh, sm, 0)?;
            let end = NaiveTime::from_hms_opt(eh, em, 0)?;
            ClassPeriod::try_new(start, end).ok()
        })
        .collect()
}

/// Period for a timetable row, `None` when the row is beyond the period list
#[must_use]
pub fn period_for_row(periods: &[ClassPeriod], row: usize) -> Option<&ClassPeriod> {
    periods.get(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_try_new_rejects_inverted() {
        assert!(ClassPeriod::try_new(t(9, 0), t(9, 50)).is_ok());
        assert_eq!(
            ClassPeriod::try_new(t(10, 0), t(9, 0)),
            Err(ValidationError::PeriodOrder {
                start: t(10, 0),
                end: t(9, 0)
            })
        );
        assert!(ClassPeriod::try_new(t(9, 0), t(9, 0)).is_err());
    }

    #[test]
    fn test_retime_keeps_id() {
        let mut period = ClassPeriod::try_new(t(8, 30), t(9, 20)).unwrap();
        let id = period.id;
        period.retime(t(8, 40), t(9, 30)).unwrap();
        assert_eq!(period.id, id);
        assert_eq!(period.start, t(8, 40));

        assert!(period.retime(t(9, 30), t(8, 40)).is_err());
        assert_eq!(period.start, t(8, 40));
    }

    #[test]
    fn test_default_periods() {
        let periods = default_periods();
        assert_eq!(periods.len(), 6);
        assert_eq!(periods[0].time_range(), "8:30-9:20");
        assert_eq!(periods[4].time_range(), "13:05-13:55");
        assert!(periods.iter().all(|p| p.minutes() == 50));
    }

    #[test]
    fn test_has_ended_by() {
        let period = ClassPeriod::try_new(t(8, 30), t(9, 20)).unwrap();
        assert!(period.has_ended_by(t(10, 0)));
        assert!(period.has_ended_by(t(9, 20)));
        assert!(!period.has_ended_by(t(9, 19)));
    }

    #[test]
    fn test_period_for_row_out_of_range() {
        let periods = default_periods();
        assert!(period_for_row(&periods, 5).is_some());
        assert!(period_for_row(&periods, 6).is_none());
    }
}
