//! Core module: entity model, persistence and schedule derivation

pub mod config;
pub mod error;
pub mod models;
pub mod reminders;
pub mod schedule;
pub mod sessions;
pub mod storage;
pub mod tasks;
pub mod timetable;

/// Returns the current version of the `study-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
