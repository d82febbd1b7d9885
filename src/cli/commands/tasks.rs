//! Tasks (assignments) command handler

use super::{lookup, short_id, store_failure, Workspace};
use crate::args::TasksSubcommand;
use study_planner::core::models::{Assignment, AssignmentDraft};
use study_planner::core::reminders::{
    cancel_reminders, reschedule_reminders, schedule_reminders, NotificationRequest, ReminderError,
    ScheduleOutcome,
};
use study_planner::core::schedule::important_assignments;
use study_planner::core::tasks;
use study_planner::{error, verbose};
use uuid::Uuid;

/// Dispatch tasks subcommands
pub fn run(subcommand: Option<TasksSubcommand>, workspace: &mut Workspace) -> Result<(), String> {
    match subcommand.unwrap_or(TasksSubcommand::List { all: false }) {
        TasksSubcommand::List { all } => {
            list(workspace, all);
            Ok(())
        }
        TasksSubcommand::Add {
            subject,
            title,
            deadline,
            method,
        } => add(
            workspace,
            AssignmentDraft {
                subject,
                title,
                deadline,
                submission_method: method,
            },
        ),
        TasksSubcommand::Edit {
            id,
            subject,
            title,
            deadline,
            method,
        } => {
            let list: Vec<Assignment> = workspace.repo.load();
            let original = lookup(&list, &id, |a| a.id, "assignment")?;
            let mut edited = original.clone();
            if let Some(subject) = subject {
                edited.subject = subject;
            }
            if let Some(title) = title {
                edited.title = title;
            }
            if let Some(deadline) = deadline {
                edited.deadline = deadline;
            }
            if let Some(method) = method {
                edited.submission_method = method;
            }
            let reminders_changed = edited.deadline != original.deadline
                || edited.title != original.title
                || edited.subject != original.subject;
            edit(workspace, edited, reminders_changed)
        }
        TasksSubcommand::Star { id } => star(workspace, &id),
        TasksSubcommand::Remove { id } => remove(workspace, &id),
        TasksSubcommand::Reminders { id } => reminders(workspace, &id),
    }
}

fn print_row(assignment: &Assignment, workspace: &Workspace) {
    let star = if assignment.is_starred { "★" } else { " " };
    let overdue = if assignment.is_overdue(workspace.now) {
        "  OVERDUE"
    } else {
        ""
    };
    println!(
        "{star} {}  {:<16} {:<10} {}{overdue}",
        short_id(assignment.id),
        assignment.deadline.format("%Y-%m-%d %H:%M"),
        assignment.subject,
        assignment.title
    );
    if !assignment.submission_method.is_empty() {
        verbose!("             submit via {}", assignment.submission_method);
    }
}

fn list(workspace: &Workspace, all: bool) {
    let assignments: Vec<Assignment> = workspace.repo.load();
    let shown: Vec<&Assignment> = if all {
        let mut every: Vec<&Assignment> = assignments.iter().collect();
        every.sort_by_key(|a| a.deadline);
        every
    } else {
        important_assignments(&assignments, workspace.now)
    };

    if shown.is_empty() {
        println!("No assignments");
        return;
    }
    for assignment in shown {
        print_row(assignment, workspace);
    }
    if !all && !assignments.is_empty() {
        verbose!("({} assignment(s) in total; use --all to list them)", assignments.len());
    }
}

/// Print a scheduling result. Denied permission is reported but does not fail the command.
fn report_reminders(id: Uuid, result: Result<ScheduleOutcome, ReminderError>) {
    match result {
        Ok(outcome) => {
            for trigger in &outcome.scheduled {
                println!("  reminder at {}", trigger.fire_at.format("%Y-%m-%d %H:%M"));
            }
            if !outcome.skipped.is_empty() {
                println!("  {} reminder(s) already past, not scheduled", outcome.skipped.len());
            }
        }
        Err(e) => {
            error!("Reminders for {id} not scheduled: {e}");
            eprintln!("✗ {e}");
        }
    }
}

fn add(workspace: &mut Workspace, draft: AssignmentDraft) -> Result<(), String> {
    let created = workspace
        .repo
        .try_update(|list: &mut Vec<Assignment>| tasks::add(list, draft))
        .map_err(store_failure)?
        .map_err(|e| format!("✗ {e}"))?;
    println!("✓ Added {} ({})", created.title, short_id(created.id));

    let (policy, now) = (workspace.reminders, workspace.now);
    let result = workspace.with_notifications(|center| schedule_reminders(center, &created, &policy, now))?;
    report_reminders(created.id, result);
    Ok(())
}

fn edit(workspace: &mut Workspace, edited: Assignment, reminders_changed: bool) -> Result<(), String> {
    let found = workspace
        .repo
        .try_update(|list: &mut Vec<Assignment>| tasks::update(list, edited.clone()))
        .map_err(store_failure)?
        .map_err(|e| format!("✗ {e}"))?;
    if !found {
        return Err(format!("✗ Assignment {} no longer exists", short_id(edited.id)));
    }
    println!("✓ Updated {}", edited.title);

    if reminders_changed {
        let (policy, now) = (workspace.reminders, workspace.now);
        let result = workspace.with_notifications(|center| reschedule_reminders(center, &edited, &policy, now))?;
        report_reminders(edited.id, result);
    }
    Ok(())
}

fn star(workspace: &mut Workspace, prefix: &str) -> Result<(), String> {
    let list: Vec<Assignment> = workspace.repo.load();
    let id = lookup(&list, prefix, |a| a.id, "assignment")?.id;
    let starred = workspace
        .repo
        .update(|list: &mut Vec<Assignment>| tasks::toggle_star(list, id))
        .map_err(store_failure)?;
    match starred {
        Some(true) => println!("✓ Starred {}", short_id(id)),
        Some(false) => println!("✓ Unstarred {}", short_id(id)),
        None => return Err(format!("✗ Assignment {} no longer exists", short_id(id))),
    }
    Ok(())
}

fn remove(workspace: &mut Workspace, prefix: &str) -> Result<(), String> {
    let list: Vec<Assignment> = workspace.repo.load();
    let id = lookup(&list, prefix, |a| a.id, "assignment")?.id;
    let removed = workspace
        .repo
        .update(|list: &mut Vec<Assignment>| tasks::remove(list, id))
        .map_err(store_failure)?;

    match removed {
        Some(assignment) => {
            workspace.with_notifications(|center| cancel_reminders(center, id))?;
            println!("✓ Removed {}", assignment.title);
            Ok(())
        }
        None => Err(format!("✗ Assignment {} no longer exists", short_id(id))),
    }
}

fn reminders(workspace: &Workspace, prefix: &str) -> Result<(), String> {
    let list: Vec<Assignment> = workspace.repo.load();
    let assignment = lookup(&list, prefix, |a| a.id, "assignment")?;
    let pending: Vec<NotificationRequest> = workspace.repo.load();
    println!("{} ({})", assignment.title, assignment.subject);
    for trigger in workspace.reminders.triggers(assignment) {
        let identifier = trigger.key.to_string();
        let state = if trigger.fire_at <= workspace.now {
            "past"
        } else if pending.iter().any(|r| r.identifier == identifier && r.fire_at == trigger.fire_at) {
            "pending"
        } else {
            "not scheduled"
        };
        println!(
            "  {}  {}  ({state})",
            trigger.key,
            trigger.fire_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use study_planner::core::reminders::ReminderPolicy;
    use study_planner::core::storage::{FileStore, Repository};
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn workspace(temp: &TempDir, now: NaiveDateTime) -> Workspace {
        Workspace {
            repo: Repository::new(FileStore::new(temp.path())),
            now,
            reminders: ReminderPolicy::default(),
        }
    }

    fn add_report(ws: &mut Workspace, deadline: NaiveDateTime) -> Uuid {
        run(
            Some(TasksSubcommand::Add {
                subject: "Science".to_string(),
                title: "Lab report".to_string(),
                deadline,
                method: String::new(),
            }),
            ws,
        )
        .unwrap();
        ws.repo.load::<Vec<Assignment>>()[0].id
    }

    fn pending(ws: &Workspace) -> Vec<NotificationRequest> {
        ws.repo.load()
    }

    #[test]
    fn test_add_persists_reminders() {
        let temp = TempDir::new().unwrap();
        let mut ws = workspace(&temp, at(2025, 6, 1, 12));
        let id = add_report(&mut ws, at(2025, 6, 20, 17));

        let reopened = workspace(&temp, at(2025, 6, 1, 12));
        let saved = pending(&reopened);
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].identifier, format!("{id}-0"));
        assert_eq!(saved[0].fire_at, at(2025, 6, 17, 8));
    }

    #[test]
    fn test_edit_moving_deadline_closer_drops_stale_reminder() {
        let temp = TempDir::new().unwrap();
        let mut ws = workspace(&temp, at(2025, 6, 1, 12));
        let id = add_report(&mut ws, at(2025, 6, 20, 17));

        run(
            Some(TasksSubcommand::Edit {
                id: id.to_string(),
                subject: None,
                title: None,
                deadline: Some(at(2025, 6, 3, 17)),
                method: None,
            }),
            &mut ws,
        )
        .unwrap();

        let saved = pending(&ws);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].identifier, format!("{id}-1"));
        assert_eq!(saved[0].fire_at, at(2025, 6, 3, 8));
    }

    #[test]
    fn test_edit_title_updates_reminder_body() {
        let temp = TempDir::new().unwrap();
        let mut ws = workspace(&temp, at(2025, 6, 1, 12));
        let id = add_report(&mut ws, at(2025, 6, 20, 17));

        run(
            Some(TasksSubcommand::Edit {
                id: id.to_string()[..8].to_string(),
                subject: None,
                title: Some("Final report".to_string()),
                deadline: None,
                method: None,
            }),
            &mut ws,
        )
        .unwrap();

        let saved = pending(&ws);
        assert_eq!(saved.len(), 2);
        assert!(saved.iter().all(|r| r.body.contains("Final report")));
    }

    #[test]
    fn test_remove_cancels_reminders() {
        let temp = TempDir::new().unwrap();
        let mut ws = workspace(&temp, at(2025, 6, 1, 12));
        let keep = add_report(&mut ws, at(2025, 6, 20, 17));
        run(
            Some(TasksSubcommand::Add {
                subject: "Math".to_string(),
                title: "Worksheet".to_string(),
                deadline: at(2025, 6, 25, 17),
                method: String::new(),
            }),
            &mut ws,
        )
        .unwrap();
        assert_eq!(pending(&ws).len(), 4);

        let drop = ws
            .repo
            .load::<Vec<Assignment>>()
            .iter()
            .find(|a| a.id != keep)
            .map(|a| a.id)
            .unwrap();
        run(Some(TasksSubcommand::Remove { id: drop.to_string() }), &mut ws).unwrap();

        let saved = pending(&ws);
        assert_eq!(saved.len(), 2);
        assert!(saved.iter().all(|r| r.identifier.starts_with(&keep.to_string())));
    }

    #[test]
    fn test_rejected_add_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut ws = workspace(&temp, at(2025, 6, 1, 12));
        let result = run(
            Some(TasksSubcommand::Add {
                subject: "Science".to_string(),
                title: "   ".to_string(),
                deadline: at(2025, 6, 20, 17),
                method: String::new(),
            }),
            &mut ws,
        );
        assert!(result.is_err());
        assert!(!temp.path().join("assignments.json").exists());
        assert!(pending(&ws).is_empty());
    }
}
