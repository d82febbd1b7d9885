//! Integration tests for reminder scheduling

use chrono::{NaiveDate, NaiveDateTime};
use study_planner::core::models::{Assignment, AssignmentDraft};
use study_planner::core::reminders::{
    cancel_reminders, reminder_triggers, reschedule_reminders, schedule_reminders,
    InMemoryNotificationCenter, NotificationCenter, ReminderError, ReminderPolicy,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn essay(deadline: NaiveDateTime) -> Assignment {
    AssignmentDraft {
        subject: "English".to_string(),
        title: "Essay".to_string(),
        deadline,
        submission_method: "Teams".to_string(),
    }
    .build()
    .unwrap()
}

#[test]
fn triggers_fire_three_days_before_and_on_the_day_at_eight() {
    let a = essay(at(2025, 6, 10, 17, 0));
    let [early, due] = reminder_triggers(&a);
    assert_eq!(early.fire_at, at(2025, 6, 7, 8, 0));
    assert_eq!(due.fire_at, at(2025, 6, 10, 8, 0));
    assert_eq!(early.key.to_string(), format!("{}-0", a.id));
    assert_eq!(due.key.to_string(), format!("{}-1", a.id));
}

#[test]
fn rescheduling_replaces_instead_of_duplicating() {
    let mut center = InMemoryNotificationCenter::new(true);
    let mut a = essay(at(2025, 6, 10, 17, 0));
    let policy = ReminderPolicy::default();
    let now = at(2025, 6, 1, 12, 0);

    schedule_reminders(&mut center, &a, &policy, now).unwrap();
    a.deadline = at(2025, 6, 12, 17, 0);
    schedule_reminders(&mut center, &a, &policy, now).unwrap();

    assert_eq!(center.len(), 2);
    let due = center.get(&format!("{}-1", a.id)).unwrap();
    assert_eq!(due.fire_at, at(2025, 6, 12, 8, 0));
    assert!(due.body.contains("Essay"));
}

#[test]
fn moving_the_deadline_closer_drops_the_stale_early_reminder() {
    let mut center = InMemoryNotificationCenter::new(true);
    let mut a = essay(at(2025, 6, 20, 17, 0));
    let policy = ReminderPolicy::default();
    let now = at(2025, 6, 1, 12, 0);
    schedule_reminders(&mut center, &a, &policy, now).unwrap();
    assert_eq!(center.get(&format!("{}-0", a.id)).unwrap().fire_at, at(2025, 6, 17, 8, 0));

    // Early reminder would now fire on May 31, before "now"
    a.deadline = at(2025, 6, 3, 17, 0);
    let outcome = schedule_reminders(&mut center, &a, &policy, now).unwrap();

    assert_eq!(outcome.skipped.len(), 1);
    assert!(center.get(&format!("{}-0", a.id)).is_none());
    assert_eq!(center.get(&format!("{}-1", a.id)).unwrap().fire_at, at(2025, 6, 3, 8, 0));
    assert_eq!(center.len(), 1);
}

#[test]
fn reschedule_after_edit_replaces_both_requests() {
    let mut center = InMemoryNotificationCenter::new(true);
    let mut a = essay(at(2025, 6, 20, 17, 0));
    let policy = ReminderPolicy::default();
    let now = at(2025, 6, 1, 12, 0);
    schedule_reminders(&mut center, &a, &policy, now).unwrap();

    a.title = "Book review".to_string();
    a.deadline = at(2025, 6, 27, 9, 0);
    let outcome = reschedule_reminders(&mut center, &a, &policy, now).unwrap();

    assert_eq!(outcome.scheduled.len(), 2);
    assert_eq!(center.len(), 2);
    assert_eq!(center.get(&format!("{}-0", a.id)).unwrap().fire_at, at(2025, 6, 24, 8, 0));
    assert!(center.pending().all(|r| r.body.contains("Book review")));
}

#[test]
fn denied_reschedule_still_clears_old_requests() {
    let mut center = InMemoryNotificationCenter::new(true);
    let a = essay(at(2025, 6, 20, 17, 0));
    let now = at(2025, 6, 1, 12, 0);
    schedule_reminders(&mut center, &a, &ReminderPolicy::default(), now).unwrap();

    let mut denied = InMemoryNotificationCenter::new(false);
    for request in center.pending() {
        denied.add(request.clone());
    }
    let result = reschedule_reminders(&mut denied, &a, &ReminderPolicy::default(), now);
    assert_eq!(result, Err(ReminderError::Denied));
    assert!(denied.is_empty());
}

#[test]
fn past_triggers_are_skipped_by_default() {
    let mut center = InMemoryNotificationCenter::new(true);
    let a = essay(at(2025, 6, 10, 17, 0));
    // After the early reminder, before the deadline-day one
    let outcome =
        schedule_reminders(&mut center, &a, &ReminderPolicy::default(), at(2025, 6, 8, 9, 0))
            .unwrap();

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].key.index, 0);
    assert_eq!(outcome.scheduled.len(), 1);
    assert!(center.get(&format!("{}-0", a.id)).is_none());
    assert!(center.get(&format!("{}-1", a.id)).is_some());
}

#[test]
fn past_triggers_can_be_registered_anyway() {
    let mut center = InMemoryNotificationCenter::new(true);
    let a = essay(at(2025, 6, 10, 17, 0));
    let policy = ReminderPolicy {
        skip_past: false,
        ..ReminderPolicy::default()
    };
    let outcome = schedule_reminders(&mut center, &a, &policy, at(2025, 6, 11, 9, 0)).unwrap();
    assert!(outcome.skipped.is_empty());
    assert_eq!(center.len(), 2);
}

#[test]
fn denied_permission_registers_nothing() {
    let mut center = InMemoryNotificationCenter::new(false);
    let a = essay(at(2025, 6, 10, 17, 0));
    let result = schedule_reminders(&mut center, &a, &ReminderPolicy::default(), at(2025, 6, 1, 0, 0));
    assert_eq!(result, Err(ReminderError::Denied));
    assert!(center.is_empty());
}

#[test]
fn cancel_removes_only_that_assignment() {
    let mut center = InMemoryNotificationCenter::new(true);
    let now = at(2025, 6, 1, 0, 0);
    let policy = ReminderPolicy::default();
    let keep = essay(at(2025, 6, 10, 17, 0));
    let drop = essay(at(2025, 6, 11, 17, 0));
    schedule_reminders(&mut center, &keep, &policy, now).unwrap();
    schedule_reminders(&mut center, &drop, &policy, now).unwrap();

    cancel_reminders(&mut center, drop.id);
    cancel_reminders(&mut center, drop.id);
    assert_eq!(center.len(), 2);
    assert!(center.pending().all(|r| r.identifier.starts_with(&keep.id.to_string())));
}
