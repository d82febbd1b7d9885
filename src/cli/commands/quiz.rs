//! Quiz (weekly test) command handler

use super::{lookup, short_id, store_failure, Workspace};
use crate::args::QuizSubcommand;
use chrono::NaiveDate;
use study_planner::core::models::{Weekday, WeeklyTest};
use uuid::Uuid;

/// Dispatch quiz subcommands
pub fn run(subcommand: Option<QuizSubcommand>, workspace: &mut Workspace) -> Result<(), String> {
    match subcommand.unwrap_or(QuizSubcommand::List) {
        QuizSubcommand::List => {
            list(workspace);
            Ok(())
        }
        QuizSubcommand::Add {
            name,
            weekday,
            count,
            start,
        } => add(workspace, &name, weekday, count, start),
        QuizSubcommand::Resize { id, count } => resize(workspace, &id, count),
        QuizSubcommand::Session {
            id,
            number,
            date,
            range,
        } => session(workspace, &id, number, date, range),
        QuizSubcommand::Remove { id } => remove(workspace, &id),
    }
}

fn resolve(workspace: &Workspace, prefix: &str) -> Result<Uuid, String> {
    let tests: Vec<WeeklyTest> = workspace.repo.load();
    lookup(&tests, prefix, |t| t.id, "quiz").map(|t| t.id)
}

fn list(workspace: &Workspace) {
    let tests: Vec<WeeklyTest> = workspace.repo.load();
    if tests.is_empty() {
        println!("No quizzes");
        return;
    }
    let today = workspace.now.date();
    for test in &tests {
        println!(
            "\n{} {} ({}s, {} sessions)",
            short_id(test.id),
            test.name,
            test.weekday,
            test.total_sessions
        );
        for s in &test.sessions {
            let marker = if s.date < today { "✓" } else { " " };
            println!(
                "  {marker} #{:<2} {}  {}",
                s.session_number,
                s.date.format("%Y-%m-%d %a"),
                s.page_range
            );
        }
    }
}

fn add(
    workspace: &mut Workspace,
    name: &str,
    weekday: Weekday,
    count: usize,
    start: Option<NaiveDate>,
) -> Result<(), String> {
    let start = start.unwrap_or_else(|| workspace.now.date());
    let test = WeeklyTest::create(name.trim(), weekday, start, count).map_err(|e| format!("✗ {e}"))?;
    let first = test.sessions.first().map(|s| s.date);
    let summary = format!("✓ Added {} ({}), {} session(s)", test.name, short_id(test.id), count);

    workspace
        .repo
        .update(|tests: &mut Vec<WeeklyTest>| tests.push(test))
        .map_err(store_failure)?;

    println!("{summary}");
    if let Some(first) = first {
        println!("  first session {}", first.format("%Y-%m-%d %a"));
    }
    Ok(())
}

fn resize(workspace: &mut Workspace, prefix: &str, count: usize) -> Result<(), String> {
    let id = resolve(workspace, prefix)?;
    let today = workspace.now.date();
    let name = workspace
        .repo
        .try_update(|tests: &mut Vec<WeeklyTest>| -> Result<String, String> {
            let test = tests
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| format!("✗ Quiz {} no longer exists", short_id(id)))?;
            test.resize(count, today).map_err(|e| format!("✗ {e}"))?;
            Ok(test.name.clone())
        })
        .map_err(store_failure)??;
    println!("✓ {name} now has {count} session(s)");
    Ok(())
}

fn session(
    workspace: &mut Workspace,
    prefix: &str,
    number: usize,
    date: Option<NaiveDate>,
    range: Option<String>,
) -> Result<(), String> {
    if date.is_none() && range.is_none() {
        return Err("✗ Nothing to change; pass --date and/or --range".to_string());
    }
    let id = resolve(workspace, prefix)?;
    let found = workspace
        .repo
        .update(|tests: &mut Vec<WeeklyTest>| {
            let session = tests
                .iter_mut()
                .find(|t| t.id == id)
                .and_then(|t| t.session_mut(number));
            session.is_some_and(|s| {
                if let Some(date) = date {
                    s.date = date;
                }
                if let Some(range) = range {
                    s.page_range = range;
                }
                true
            })
        })
        .map_err(store_failure)?;

    if found {
        println!("✓ Updated session {number}");
        Ok(())
    } else {
        Err(format!("✗ Session {number} not found"))
    }
}

fn remove(workspace: &mut Workspace, prefix: &str) -> Result<(), String> {
    let id = resolve(workspace, prefix)?;
    let removed = workspace
        .repo
        .update(|tests: &mut Vec<WeeklyTest>| {
            let index = tests.iter().position(|t| t.id == id)?;
            Some(tests.remove(index))
        })
        .map_err(store_failure)?;
    match removed {
        Some(test) => {
            println!("✓ Removed {}", test.name);
            Ok(())
        }
        None => Err(format!("✗ Quiz {} no longer exists", short_id(id))),
    }
}
