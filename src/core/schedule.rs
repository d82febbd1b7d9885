//! Schedule derivation: what is on today
//!
//! All functions take the current time explicitly and never read the clock.

use crate::core::models::{
    Assignment, ClassPeriod, Lesson, TestSession, Weekday, WeekdayLimits, WeeklyTest,
};
use crate::core::timetable::Timetable;
use chrono::{Days, NaiveDate, NaiveDateTime};

/// How far ahead an unstarred assignment counts as important
pub const IMPORTANT_HORIZON_DAYS: u64 = 7;

/// A lesson still to come today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodayLesson<'a> {
    /// 1-based period number
    pub period_number: usize,
    /// The period the lesson occupies
    pub period: &'a ClassPeriod,
    /// The lesson itself
    pub lesson: &'a Lesson,
}

/// Result of [`todays_lessons`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodaySchedule<'a> {
    /// Sunday: the timetable has no column for today
    NoSchool,
    /// Remaining lessons in period order (possibly none)
    Lessons(Vec<TodayLesson<'a>>),
}

impl<'a> TodaySchedule<'a> {
    /// Remaining lessons; empty on Sunday
    #[must_use]
    pub fn lessons(&self) -> &[TodayLesson<'a>] {
        match self {
            Self::NoSchool => &[],
            Self::Lessons(lessons) => lessons,
        }
    }

    /// Whether today is a day without a timetable column
    #[must_use]
    pub const fn is_no_school(&self) -> bool {
        matches!(self, Self::NoSchool)
    }
}

/// Lessons remaining today
///
/// A row is included when its period exists, the period ends after `now`, and
/// the cell for today's column holds a lesson. Rows without a matching period
/// are skipped.
#[must_use]
pub fn todays_lessons<'a>(
    timetable: &'a Timetable,
    periods: &'a [ClassPeriod],
    now: NaiveDateTime,
) -> TodaySchedule<'a> {
    let Some(column) = Weekday::of(now.date()).column() else {
        return TodaySchedule::NoSchool;
    };
    let time = now.time();
    let lessons = timetable
        .column(column)
        .filter_map(|(row, lesson)| {
            let lesson = lesson?;
            let period = periods.get(row)?;
            (!period.has_ended_by(time)).then_some(TodayLesson {
                period_number: row + 1,
                period,
                lesson,
            })
        })
        .collect();
    TodaySchedule::Lessons(lessons)
}

/// Assignments worth showing today, ordered by deadline
///
/// Starred assignments are always included. Others are included when their
/// deadline day falls between today and seven days from today, inclusive.
/// Ties keep input order.
#[must_use]
pub fn important_assignments(all: &[Assignment], now: NaiveDateTime) -> Vec<&Assignment> {
    let today = now.date();
    let horizon = today + Days::new(IMPORTANT_HORIZON_DAYS);
    let mut selected: Vec<&Assignment> = all
        .iter()
        .filter(|a| a.is_starred || (today..=horizon).contains(&a.deadline_day()))
        .collect();
    selected.sort_by_key(|a| a.deadline);
    selected
}

/// Next session of every quiz series that still has one, soonest first
#[must_use]
pub fn upcoming_sessions(tests: &[WeeklyTest], now: NaiveDateTime) -> Vec<(&WeeklyTest, &TestSession)> {
    let mut upcoming: Vec<_> = tests
        .iter()
        .filter_map(|test| test.next_session(now).map(|session| (test, session)))
        .collect();
    upcoming.sort_by_key(|(_, session)| session.date);
    upcoming
}

/// An important assignment with its display flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportantAssignment<'a> {
    /// The assignment
    pub assignment: &'a Assignment,
    /// Deadline day already passed
    pub overdue: bool,
}

/// Everything shown on the "today" screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayDigest<'a> {
    /// Day the digest was built for
    pub date: NaiveDate,
    /// Lessons still to come, restricted to today's period limit
    pub schedule: TodaySchedule<'a>,
    /// Important assignments
    pub assignments: Vec<ImportantAssignment<'a>>,
    /// Next quiz session per series
    pub quizzes: Vec<(&'a WeeklyTest, &'a TestSession)>,
}

impl<'a> TodayDigest<'a> {
    /// Build the digest from decoded collections
    #[must_use]
    pub fn build(
        timetable: &'a Timetable,
        periods: &'a [ClassPeriod],
        limits: &WeekdayLimits,
        assignments: &'a [Assignment],
        tests: &'a [WeeklyTest],
        now: NaiveDateTime,
    ) -> Self {
        let limit = limits.limit(Weekday::of(now.date()));
        let schedule = match todays_lessons(timetable, periods, now) {
            TodaySchedule::NoSchool => TodaySchedule::NoSchool,
            TodaySchedule::Lessons(mut lessons) => {
                lessons.retain(|l| l.period_number <= limit);
                TodaySchedule::Lessons(lessons)
            }
        };
        let assignments = important_assignments(assignments, now)
            .into_iter()
            .map(|assignment| ImportantAssignment {
                assignment,
                overdue: assignment.is_overdue(now),
            })
            .collect();
        Self {
            date: now.date(),
            schedule,
            assignments,
            quizzes: upcoming_sessions(tests, now),
        }
    }
}
