//! Error types for planner operations.

use chrono::NaiveTime;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input. Nothing is created or changed when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty (or only whitespace)
    #[error("'{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// A period must start before it ends
    #[error("Period must start before it ends ({start} - {end})")]
    PeriodOrder { start: NaiveTime, end: NaiveTime },

    /// Timetable column outside Monday..Saturday
    #[error("Column {column} is outside the timetable (0-5, Monday-Saturday)")]
    ColumnOutOfRange { column: usize },

    /// Weekly test session count outside the allowed range
    #[error("Session count {count} is outside 1..={max}")]
    SessionCount { count: usize, max: usize },

    /// Unrecognised weekday name
    #[error("Unknown weekday: '{0}'")]
    UnknownWeekday(String),
}

/// Errors raised while writing to a preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A collection could not be serialized
    #[error("Failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backing file could not be written or removed
    #[error("I/O error for '{key}' at {}: {source}", path.display())]
    Io {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// The preference key the failed operation targeted.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Encode { key, .. } | Self::Io { key, .. } => key,
        }
    }
}
