//! Assignment reminders
//!
//! Each assignment gets two one-shot reminders at a fixed hour: one a few
//! days before the deadline day and one on the deadline day itself. Delivery
//! belongs to an external notification subsystem, reached through
//! [`NotificationCenter`]; this module only computes fire times and stable
//! identifiers.

use crate::core::config::RemindersConfig;
use crate::core::models::Assignment;
use crate::{debug, info};
use chrono::{Days, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Default hour of day reminders fire at
pub const DEFAULT_REMINDER_HOUR: u32 = 8;

/// Default number of days before the deadline for the early reminder
pub const DEFAULT_LEAD_DAYS: u64 = 3;

/// Number of reminders per assignment
pub const TRIGGERS_PER_ASSIGNMENT: usize = 2;

/// When reminders fire and whether stale ones are registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Days before the deadline day for the early reminder
    pub lead_days: u64,
    /// Skip triggers whose fire time is not after the scheduling time
    pub skip_past: bool,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            hour: DEFAULT_REMINDER_HOUR,
            lead_days: DEFAULT_LEAD_DAYS,
            skip_past: true,
        }
    }
}

impl From<&RemindersConfig> for ReminderPolicy {
    fn from(config: &RemindersConfig) -> Self {
        Self {
            hour: config.hour.min(23),
            lead_days: config.lead_days,
            skip_past: config.skip_past,
        }
    }
}

/// Identifies one reminder of one assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReminderKey {
    /// Assignment the reminder belongs to
    pub assignment_id: Uuid,
    /// 0 for the early reminder, 1 for the deadline-day reminder
    pub index: usize,
}

impl fmt::Display for ReminderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.assignment_id, self.index)
    }
}

/// A computed reminder time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTrigger {
    /// Stable key; re-scheduling with the same key replaces the earlier request
    pub key: ReminderKey,
    /// Local fire time
    pub fire_at: NaiveDateTime,
}

impl ReminderPolicy {
    /// Both triggers for an assignment, early reminder first
    ///
    /// Fire times are computed from the deadline's calendar day, so the time
    /// of day of the deadline does not matter.
    #[must_use]
    pub fn triggers(&self, assignment: &Assignment) -> [ReminderTrigger; TRIGGERS_PER_ASSIGNMENT] {
        let deadline_day = assignment.deadline_day();
        let at = NaiveTime::from_hms_opt(self.hour, 0, 0).unwrap_or(NaiveTime::MIN);
        let early_day = deadline_day
            .checked_sub_days(Days::new(self.lead_days))
            .unwrap_or(deadline_day);
        let trigger = |index, day: chrono::NaiveDate| ReminderTrigger {
            key: ReminderKey {
                assignment_id: assignment.id,
                index,
            },
            fire_at: day.and_time(at),
        };
        [trigger(0, early_day), trigger(1, deadline_day)]
    }
}

/// Both triggers under the default policy (3 days before and on the day, at 08:00)
#[must_use]
pub fn reminder_triggers(assignment: &Assignment) -> [ReminderTrigger; TRIGGERS_PER_ASSIGNMENT] {
    ReminderPolicy::default().triggers(assignment)
}

/// A request handed to the notification subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Unique identifier (`<assignment id>-<index>`)
    pub identifier: String,
    /// Local fire time
    pub fire_at: NaiveDateTime,
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
}

impl NotificationRequest {
    fn for_trigger(assignment: &Assignment, trigger: &ReminderTrigger) -> Self {
        Self {
            identifier: trigger.key.to_string(),
            fire_at: trigger.fire_at,
            title: "Assignment due".to_string(),
            body: format!("{} ({}) is due soon", assignment.title, assignment.subject),
        }
    }
}

/// Port to the platform notification subsystem
pub trait NotificationCenter {
    /// Ask for permission to post notifications. Returns whether it was granted.
    fn request_authorization(&mut self) -> bool;

    /// Register a one-shot request. A request with an existing identifier replaces it.
    fn add(&mut self, request: NotificationRequest);

    /// Drop pending requests by identifier. Unknown identifiers are ignored.
    fn remove(&mut self, identifiers: &[String]);
}

/// Failure to register reminders
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// The user did not allow notifications
    #[error("Notification permission was not granted")]
    Denied,
}

/// What [`schedule_reminders`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// Triggers handed to the notification center
    pub scheduled: Vec<ReminderTrigger>,
    /// Triggers left out because they were already due
    pub skipped: Vec<ReminderTrigger>,
}

/// Register an assignment's reminders
///
/// Authorization is requested first. With `policy.skip_past` set, triggers
/// whose fire time is not after `now` are left out and reported in
/// [`ScheduleOutcome::skipped`]; otherwise they are registered anyway and the
/// subsystem will never fire them.
///
/// Every key of the assignment ends up either replaced or removed, so a
/// request left over from an earlier deadline never survives a re-schedule.
///
/// # Errors
///
/// Returns [`ReminderError::Denied`] when authorization is refused; nothing is registered.
pub fn schedule_reminders(
    center: &mut impl NotificationCenter,
    assignment: &Assignment,
    policy: &ReminderPolicy,
    now: NaiveDateTime,
) -> Result<ScheduleOutcome, ReminderError> {
    if !center.request_authorization() {
        return Err(ReminderError::Denied);
    }

    let mut outcome = ScheduleOutcome::default();
    for trigger in policy.triggers(assignment) {
        if policy.skip_past && trigger.fire_at <= now {
            debug!("Skipping reminder {} (fire time {} already passed)", trigger.key, trigger.fire_at);
            center.remove(&[trigger.key.to_string()]);
            outcome.skipped.push(trigger);
            continue;
        }
        center.add(NotificationRequest::for_trigger(assignment, &trigger));
        outcome.scheduled.push(trigger);
    }
    info!(
        "Scheduled {} reminder(s) for '{}' ({} skipped)",
        outcome.scheduled.len(),
        assignment.title,
        outcome.skipped.len()
    );
    Ok(outcome)
}

/// Remove every reminder an assignment may have registered
pub fn cancel_reminders(center: &mut impl NotificationCenter, assignment_id: Uuid) {
    let identifiers: Vec<String> = (0..TRIGGERS_PER_ASSIGNMENT)
        .map(|index| ReminderKey { assignment_id, index }.to_string())
        .collect();
    center.remove(&identifiers);
}

/// Drop an assignment's reminders and register them again from its current fields
///
/// Used after an edit that changes the deadline, title or subject.
///
/// # Errors
///
/// Returns [`ReminderError::Denied`] when authorization is refused. The old
/// requests are gone by then.
pub fn reschedule_reminders(
    center: &mut impl NotificationCenter,
    assignment: &Assignment,
    policy: &ReminderPolicy,
    now: NaiveDateTime,
) -> Result<ScheduleOutcome, ReminderError> {
    cancel_reminders(center, assignment.id);
    schedule_reminders(center, assignment, policy, now)
}

/// Notification center that keeps pending requests in memory
#[derive(Debug, Clone)]
pub struct InMemoryNotificationCenter {
    authorized: bool,
    pending: BTreeMap<String, NotificationRequest>,
}

impl Default for InMemoryNotificationCenter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InMemoryNotificationCenter {
    /// Center that answers authorization requests with `authorized`
    #[must_use]
    pub const fn new(authorized: bool) -> Self {
        Self {
            authorized,
            pending: BTreeMap::new(),
        }
    }

    /// Authorized center holding `requests`, e.g. ones loaded from the store
    #[must_use]
    pub fn with_pending(requests: impl IntoIterator<Item = NotificationRequest>) -> Self {
        let mut center = Self::new(true);
        for request in requests {
            center.add(request);
        }
        center
    }

    /// Pending requests ordered by identifier, for saving
    #[must_use]
    pub fn into_pending(self) -> Vec<NotificationRequest> {
        self.pending.into_values().collect()
    }

    /// Pending requests ordered by identifier
    pub fn pending(&self) -> impl Iterator<Item = &NotificationRequest> {
        self.pending.values()
    }

    /// Pending request by identifier
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&NotificationRequest> {
        self.pending.get(identifier)
    }

    /// Number of pending requests
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    fn request_authorization(&mut self) -> bool {
        self.authorized
    }

    fn add(&mut self, request: NotificationRequest) {
        self.pending.insert(request.identifier.clone(), request);
    }

    fn remove(&mut self, identifiers: &[String]) {
        for identifier in identifiers {
            self.pending.remove(identifier);
        }
    }
}
