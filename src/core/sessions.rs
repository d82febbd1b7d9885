//! Weekly quiz session generation
//!
//! Sessions are laid out on a weekly cadence. Once generated they are edited
//! independently, so resizing a series only touches its tail.

use crate::core::models::{TestSession, Weekday};
use chrono::{Datelike, Days, NaiveDate};

/// Days between consecutive sessions
pub const SESSION_INTERVAL_DAYS: u64 = 7;

/// Next date falling on `weekday`, `from` itself included
#[must_use]
pub fn first_occurrence(weekday: Weekday, from: NaiveDate) -> NaiveDate {
    let target = chrono::Weekday::from(weekday).num_days_from_monday();
    let current = from.weekday().num_days_from_monday();
    let ahead = (7 + target - current) % 7;
    from + Days::new(u64::from(ahead))
}

/// `count` sessions numbered from 1, starting on the first `weekday` on or after `start_date`
#[must_use]
pub fn generate_sessions(weekday: Weekday, start_date: NaiveDate, count: usize) -> Vec<TestSession> {
    let first = first_occurrence(weekday, start_date);
    weekly_dates(first)
        .take(count)
        .enumerate()
        .map(|(idx, date)| TestSession::new(idx + 1, date))
        .collect()
}

/// Truncate or extend `sessions` to `count` entries
///
/// Existing sessions are kept as they are. New sessions continue weekly from
/// the last kept session; an empty list starts at the first `weekday` on or
/// after `today`.
pub fn resize_sessions(
    sessions: &mut Vec<TestSession>,
    weekday: Weekday,
    count: usize,
    today: NaiveDate,
) {
    if count <= sessions.len() {
        sessions.truncate(count);
        return;
    }

    let start = sessions.last().map_or_else(
        || first_occurrence(weekday, today),
        |last| last.date + Days::new(SESSION_INTERVAL_DAYS),
    );
    let missing = count - sessions.len();
    let first_number = sessions.len() + 1;
    sessions.extend(
        weekly_dates(start)
            .take(missing)
            .enumerate()
            .map(|(idx, date)| TestSession::new(first_number + idx, date)),
    );
}

fn weekly_dates(first: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(first), |date| {
        date.checked_add_days(Days::new(SESSION_INTERVAL_DAYS))
    })
}
