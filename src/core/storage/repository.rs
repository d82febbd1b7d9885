//! Typed access to the stored collections
//!
//! Each collection type maps to one [`StoreKey`]. Loads never fail: absent or
//! unreadable data comes back as the type's default. Saves propagate
//! [`StoreError`].

use super::codec;
use super::{PreferenceStore, StoreKey};
use crate::core::error::StoreError;
use crate::core::models::{default_periods, Assignment, ClassPeriod, WeekdayLimits, WeeklyTest};
use crate::core::reminders::NotificationRequest;
use crate::core::timetable::Timetable;
use crate::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A collection persisted under a fixed key
pub trait Stored: Serialize + DeserializeOwned + Default {
    /// Key the collection is stored under
    const KEY: StoreKey;
}

impl Stored for Vec<ClassPeriod> {
    const KEY: StoreKey = StoreKey::Periods;
}

impl Stored for Timetable {
    const KEY: StoreKey = StoreKey::Timetable;
}

impl Stored for Vec<Assignment> {
    const KEY: StoreKey = StoreKey::Assignments;
}

impl Stored for Vec<WeeklyTest> {
    const KEY: StoreKey = StoreKey::WeeklyTests;
}

impl Stored for WeekdayLimits {
    const KEY: StoreKey = StoreKey::WeekdayLimits;
}

impl Stored for Vec<NotificationRequest> {
    const KEY: StoreKey = StoreKey::Reminders;
}

/// Every collection, decoded at once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerData {
    /// Class periods in period order
    pub periods: Vec<ClassPeriod>,
    /// Lesson grid
    pub timetable: Timetable,
    /// Assignments in stored order
    pub assignments: Vec<Assignment>,
    /// Weekly quiz series
    pub weekly_tests: Vec<WeeklyTest>,
    /// Per-weekday period limits
    pub limits: WeekdayLimits,
    /// Pending reminder requests ordered by identifier
    pub reminders: Vec<NotificationRequest>,
}

/// Typed load/save over an injected [`PreferenceStore`]
#[derive(Debug, Clone, Default)]
pub struct Repository<S> {
    store: S,
}

impl<S: PreferenceStore> Repository<S> {
    /// Repository over `store`
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Decode the collection of type `T`, or its default
    #[must_use]
    pub fn load<T: Stored>(&self) -> T {
        codec::decode_or_default(self.store.get(T::KEY.as_str()).as_deref())
    }

    /// Encode and store `value`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] if serialization fails, or the store's own
    /// error if the write fails.
    pub fn save<T: Stored>(&mut self, value: &T) -> Result<(), StoreError> {
        let key = T::KEY.as_str();
        let bytes = codec::encode(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        debug!("Saving '{key}' ({} bytes)", bytes.len());
        self.store.set(key, bytes)
    }

    /// Load, apply `edit`, and save back. Returns whatever `edit` returns.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the save fails. `edit` has already run by then.
    pub fn update<T, R>(&mut self, edit: impl FnOnce(&mut T) -> R) -> Result<R, StoreError>
    where
        T: Stored,
    {
        let mut value = self.load::<T>();
        let result = edit(&mut value);
        self.save(&value)?;
        Ok(result)
    }

    /// Load, apply a fallible `edit`, and save back only if it succeeds
    ///
    /// A rejected edit leaves the stored blob untouched. The outer `Result`
    /// is the store's, the inner one is `edit`'s.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the save fails.
    pub fn try_update<T, R, E>(
        &mut self,
        edit: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Result<Result<R, E>, StoreError>
    where
        T: Stored,
    {
        let mut value = self.load::<T>();
        match edit(&mut value) {
            Ok(result) => {
                self.save(&value)?;
                Ok(Ok(result))
            }
            Err(err) => {
                debug!("Edit of '{}' rejected, nothing saved", T::KEY);
                Ok(Err(err))
            }
        }
    }

    /// Write the default period list if none is stored yet
    ///
    /// Returns `true` when defaults were written. Running it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the defaults cannot be saved.
    pub fn seed_defaults(&mut self) -> Result<bool, StoreError> {
        if self.store.contains(StoreKey::Periods.as_str()) {
            return Ok(false);
        }
        let periods = default_periods();
        self.save(&periods)?;
        info!("Seeded {} default periods", periods.len());
        Ok(true)
    }

    /// Decode every collection
    #[must_use]
    pub fn load_all(&self) -> PlannerData {
        PlannerData {
            periods: self.load(),
            timetable: self.load(),
            assignments: self.load(),
            weekly_tests: self.load(),
            limits: self.load(),
            reminders: self.load(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Lesson, Weekday};
    use crate::core::storage::MemoryStore;

    #[test]
    fn test_absent_collections_load_defaults() {
        let repo = Repository::new(MemoryStore::new());
        let data = repo.load_all();
        assert!(data.periods.is_empty());
        assert!(data.timetable.is_empty());
        assert!(data.assignments.is_empty());
        assert!(data.weekly_tests.is_empty());
        assert_eq!(data.limits, WeekdayLimits::default());
        assert!(data.reminders.is_empty());
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut repo = Repository::new(MemoryStore::new());
        assert!(repo.seed_defaults().unwrap());
        let mut periods: Vec<ClassPeriod> = repo.load();
        assert_eq!(periods.len(), 6);

        periods.truncate(2);
        repo.save(&periods).unwrap();
        assert!(!repo.seed_defaults().unwrap());
        assert_eq!(repo.load::<Vec<ClassPeriod>>().len(), 2);
    }

    #[test]
    fn test_update_persists() {
        let mut repo = Repository::new(MemoryStore::new());
        let previous = repo
            .update(|grid: &mut Timetable| grid.set(1, 2, Lesson::new("Art", "Mori")))
            .unwrap();
        assert_eq!(previous, Ok(None));

        let grid: Timetable = repo.load();
        assert_eq!(grid.get(1, 2).map(|l| l.subject.as_str()), Some("Art"));

        repo.update(|limits: &mut WeekdayLimits| limits.set(Weekday::Saturday, 0))
            .unwrap();
        assert_eq!(repo.load::<WeekdayLimits>().limit(Weekday::Saturday), 0);
    }

    #[test]
    fn test_try_update_skips_save_on_error() {
        let mut store = MemoryStore::new();
        store.set("timetable", b"{oops".to_vec()).unwrap();
        let mut repo = Repository::new(store);

        let rejected = repo
            .try_update(|grid: &mut Timetable| grid.set(0, 9, Lesson::new("Art", "Mori")))
            .unwrap();
        assert!(rejected.is_err());
        assert_eq!(repo.store().get("timetable").as_deref(), Some(b"{oops".as_slice()));

        let accepted = repo
            .try_update(|grid: &mut Timetable| grid.set(0, 0, Lesson::new("Art", "Mori")))
            .unwrap();
        assert_eq!(accepted, Ok(None));
        assert!(repo.load::<Timetable>().get(0, 0).is_some());
    }

    #[test]
    fn test_malformed_blob_loads_default() {
        let mut store = MemoryStore::new();
        store.set("assignments", b"{oops".to_vec()).unwrap();
        let repo = Repository::new(store);
        assert!(repo.load::<Vec<Assignment>>().is_empty());
    }
}
