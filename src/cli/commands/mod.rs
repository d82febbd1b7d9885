//! CLI command handlers for `studyplanner`.
//!
//! Each command is implemented in its own submodule. Handlers other than
//! `config` work on a [`Workspace`] and return `Err` with a ready-to-print
//! `✗` line on failure.

pub mod config;
pub mod limits;
pub mod periods;
pub mod quiz;
pub mod tasks;
pub mod timetable;
pub mod today;

use chrono::NaiveDateTime;
use study_planner::config::Config;
use study_planner::core::error::StoreError;
use study_planner::core::reminders::{InMemoryNotificationCenter, NotificationRequest, ReminderPolicy};
use study_planner::core::storage::{FileStore, Repository};
use study_planner::core::tasks::resolve_prefix;
use study_planner::info;
use uuid::Uuid;

/// Everything a data command needs for one run
pub struct Workspace {
    /// Collections stored under the configured data directory
    pub repo: Repository<FileStore>,
    /// The moment the command treats as "now"
    pub now: NaiveDateTime,
    /// Reminder timing from config
    pub reminders: ReminderPolicy,
}

impl Workspace {
    /// Open the data directory and seed default periods on first run
    pub fn open(config: &Config, now: NaiveDateTime) -> Result<Self, String> {
        let mut repo = Repository::new(FileStore::new(&config.paths.data_dir));
        if repo.seed_defaults().map_err(store_failure)? {
            info!("Initialized data directory {}", config.paths.data_dir);
        }
        Ok(Self {
            repo,
            now,
            reminders: ReminderPolicy::from(&config.reminders),
        })
    }

    /// Run `f` against the stored pending reminders and save what it leaves behind
    ///
    /// Pending requests live under the `reminders` key until a delivery
    /// subsystem picks them up.
    pub fn with_notifications<R>(&mut self, f: impl FnOnce(&mut InMemoryNotificationCenter) -> R) -> Result<R, String> {
        self.repo
            .update(|pending: &mut Vec<NotificationRequest>| {
                let mut center = InMemoryNotificationCenter::with_pending(std::mem::take(pending));
                let result = f(&mut center);
                *pending = center.into_pending();
                result
            })
            .map_err(store_failure)
    }
}

/// Format a store failure as a CLI error line
pub fn store_failure(err: StoreError) -> String {
    format!("✗ Failed to save {}: {err}", err.key())
}

/// Resolve an id prefix typed by the user
pub fn lookup<'a, T>(items: &'a [T], prefix: &str, id_of: impl Fn(&T) -> Uuid, what: &str) -> Result<&'a T, String> {
    resolve_prefix(items, prefix, id_of).ok_or_else(|| format!("✗ No single {what} matches id '{prefix}'"))
}

/// First 8 characters of an id, as shown in listings
pub fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Convert a 1-based period number to a row index
pub fn period_row(period: usize) -> Result<usize, String> {
    period
        .checked_sub(1)
        .ok_or_else(|| "✗ Period numbers start at 1".to_string())
}
