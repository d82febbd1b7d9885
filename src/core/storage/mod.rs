//! Preference store port and its implementations
//!
//! Every collection is persisted as one opaque blob under a fixed string key.
//! The store knows nothing about the blobs; encoding lives in [`codec`] and
//! typed access in [`repository`].

pub mod codec;
pub mod file;
pub mod memory;
pub mod repository;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{PlannerData, Repository, Stored};

use crate::core::error::StoreError;
use std::fmt;

/// Key-value store of byte blobs
pub trait PreferenceStore {
    /// Blob stored under `key`, if any
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key`, replacing any previous blob
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing medium cannot be written.
    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Delete the blob under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing medium cannot be updated.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Whether a blob exists under `key`
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// The fixed keys collections are stored under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Ordered list of class periods
    Periods,
    /// The lesson grid
    Timetable,
    /// Assignment list
    Assignments,
    /// Weekly quiz series
    WeeklyTests,
    /// Per-weekday period limits
    WeekdayLimits,
    /// Pending reminder requests
    Reminders,
}

impl StoreKey {
    /// All keys, in display order
    pub const ALL: [Self; 6] = [
        Self::Periods,
        Self::Timetable,
        Self::Assignments,
        Self::WeeklyTests,
        Self::WeekdayLimits,
        Self::Reminders,
    ];

    /// Stored key string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Periods => "periods",
            Self::Timetable => "timetable",
            Self::Assignments => "assignments",
            Self::WeeklyTests => "weeklyTests",
            Self::WeekdayLimits => "weekdayLimits",
            Self::Reminders => "reminders",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
