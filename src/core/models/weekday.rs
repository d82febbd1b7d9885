//! Weekday and per-weekday period limits

use crate::core::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of timetable columns (Monday through Saturday)
pub const SCHOOL_DAY_COUNT: usize = 6;

/// Day of the week. Monday..Saturday map to timetable columns 0..5; Sunday has no column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday (column 0)
    Monday,
    /// Tuesday (column 1)
    Tuesday,
    /// Wednesday (column 2)
    Wednesday,
    /// Thursday (column 3)
    Thursday,
    /// Friday (column 4)
    Friday,
    /// Saturday (column 5)
    Saturday,
    /// Sunday (no timetable column)
    Sunday,
}

/// The weekdays that have a timetable column, in column order
pub const SCHOOL_DAYS: [Weekday; SCHOOL_DAY_COUNT] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl Weekday {
    /// Timetable column for this day, `None` for Sunday
    #[must_use]
    pub const fn column(self) -> Option<usize> {
        match self {
            Self::Monday => Some(0),
            Self::Tuesday => Some(1),
            Self::Wednesday => Some(2),
            Self::Thursday => Some(3),
            Self::Friday => Some(4),
            Self::Saturday => Some(5),
            Self::Sunday => None,
        }
    }

    /// Weekday for a timetable column, `None` when out of range
    #[must_use]
    pub fn from_column(column: usize) -> Option<Self> {
        SCHOOL_DAYS.get(column).copied()
    }

    /// Weekday a date falls on
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Full English name, also used as the serialized form
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Three-letter abbreviation
    #[must_use]
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
            Weekday::Sunday => Self::Sun,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    /// Accepts full names and three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
        .into_iter()
        .find(|day| {
            let name = day.name().to_ascii_lowercase();
            wanted == name || wanted == name[..3]
        })
        .ok_or_else(|| ValidationError::UnknownWeekday(s.to_string()))
    }
}

/// Maximum number of periods held on each weekday
///
/// Serialized as a map from weekday name to count. A weekday missing from a
/// stored map has no periods at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayLimits(BTreeMap<Weekday, usize>);

/// Default periods per weekday (Monday to Friday)
pub const DEFAULT_WEEKDAY_PERIODS: usize = 6;

/// Default periods on Saturday
pub const DEFAULT_SATURDAY_PERIODS: usize = 4;

impl Default for WeekdayLimits {
    fn default() -> Self {
        let limits = SCHOOL_DAYS
            .iter()
            .map(|&day| {
                let count = if day == Weekday::Saturday {
                    DEFAULT_SATURDAY_PERIODS
                } else {
                    DEFAULT_WEEKDAY_PERIODS
                };
                (day, count)
            })
            .collect();
        Self(limits)
    }
}

impl WeekdayLimits {
    /// Limits with no periods on any day
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Period limit for a weekday (0 when unset; always 0 for Sunday)
    #[must_use]
    pub fn limit(&self, day: Weekday) -> usize {
        if day == Weekday::Sunday {
            return 0;
        }
        self.0.get(&day).copied().unwrap_or(0)
    }

    /// Period limit for a timetable column (0 when the column is out of range)
    #[must_use]
    pub fn limit_for_column(&self, column: usize) -> usize {
        Weekday::from_column(column).map_or(0, |day| self.limit(day))
    }

    /// Set the limit for a weekday. Sunday is ignored.
    pub fn set(&mut self, day: Weekday, count: usize) {
        if day != Weekday::Sunday {
            self.0.insert(day, count);
        }
    }

    /// Largest limit over all school days
    #[must_use]
    pub fn max_periods(&self) -> usize {
        SCHOOL_DAYS
            .iter()
            .map(|&day| self.limit(day))
            .max()
            .unwrap_or(0)
    }

    /// Limits in column order
    #[must_use]
    pub fn as_columns(&self) -> [usize; SCHOOL_DAY_COUNT] {
        SCHOOL_DAYS.map(|day| self.limit(day))
    }
}
