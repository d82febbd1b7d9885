//! Timetable command handler

use super::{period_row, store_failure, Workspace};
use crate::args::TimetableSubcommand;
use study_planner::core::models::{
    period_for_row, ClassPeriod, Lesson, Weekday, WeekdayLimits, SCHOOL_DAYS,
};
use study_planner::core::timetable::{
    apply_weekday_limits, cross_reference, lesson_period, Slot, Timetable,
};

const CELL_WIDTH: usize = 12;

/// Dispatch timetable subcommands
pub fn run(subcommand: Option<TimetableSubcommand>, workspace: &mut Workspace) -> Result<(), String> {
    match subcommand.unwrap_or(TimetableSubcommand::Show) {
        TimetableSubcommand::Show => {
            show(workspace);
            Ok(())
        }
        TimetableSubcommand::Set {
            day,
            period,
            subject,
            teacher,
        } => set(workspace, day, period, &subject, &teacher),
        TimetableSubcommand::Clear { day, period } => clear(workspace, day, period),
        TimetableSubcommand::Info { day, period } => info(workspace, day, period),
    }
}

/// Slot a command may write to: a school day, within that day's limit
fn editable_cell(limits: &WeekdayLimits, day: Weekday, period: usize) -> Result<(usize, usize), String> {
    let column = day
        .column()
        .ok_or_else(|| format!("✗ {day} has no timetable column"))?;
    let row = period_row(period)?;
    let limit = limits.limit(day);
    if row >= limit {
        return Err(format!("✗ {day} has {limit} period(s); period {period} is not available"));
    }
    Ok((row, column))
}

fn show(workspace: &Workspace) {
    let timetable: Timetable = workspace.repo.load();
    let periods: Vec<ClassPeriod> = workspace.repo.load();
    let limits: WeekdayLimits = workspace.repo.load();
    let view = apply_weekday_limits(&timetable, &limits);

    print!("{:<14}", "");
    for day in SCHOOL_DAYS {
        print!("{:<CELL_WIDTH$}", day.short_name());
    }
    println!();

    for (row, cells) in view.rows().iter().enumerate() {
        let time = period_for_row(&periods, row).map_or_else(String::new, ClassPeriod::time_range);
        print!("{:<2} {:<11}", row + 1, time);
        for slot in cells {
            let text = match slot {
                Slot::Disabled => "·".to_string(),
                Slot::Empty => "-".to_string(),
                Slot::Filled(lesson) => truncate(&lesson.subject, CELL_WIDTH - 1),
            };
            print!("{text:<CELL_WIDTH$}");
        }
        println!();
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn set(workspace: &mut Workspace, day: Weekday, period: usize, subject: &str, teacher: &str) -> Result<(), String> {
    if subject.trim().is_empty() {
        return Err("✗ Subject must not be empty".to_string());
    }
    let limits: WeekdayLimits = workspace.repo.load();
    let (row, column) = editable_cell(&limits, day, period)?;

    let previous = workspace
        .repo
        .try_update(|grid: &mut Timetable| grid.set(row, column, Lesson::new(subject.trim(), teacher.trim())))
        .map_err(store_failure)?
        .map_err(|e| format!("✗ {e}"))?;

    match previous {
        Some(old) => println!("✓ {day} period {period}: {} → {subject}", old.subject),
        None => println!("✓ {day} period {period}: {subject}"),
    }
    Ok(())
}

fn clear(workspace: &mut Workspace, day: Weekday, period: usize) -> Result<(), String> {
    let limits: WeekdayLimits = workspace.repo.load();
    let (row, column) = editable_cell(&limits, day, period)?;

    let removed = workspace
        .repo
        .update(|grid: &mut Timetable| grid.clear(row, column))
        .map_err(store_failure)?;
    match removed {
        Some(lesson) => println!("✓ Cleared {} from {day} period {period}", lesson.subject),
        None => println!("✓ {day} period {period} was already empty"),
    }
    Ok(())
}

fn info(workspace: &Workspace, day: Weekday, period: usize) -> Result<(), String> {
    let timetable: Timetable = workspace.repo.load();
    let periods: Vec<ClassPeriod> = workspace.repo.load();
    let limits: WeekdayLimits = workspace.repo.load();
    let (row, column) = editable_cell(&limits, day, period)?;

    let lesson = timetable
        .get(row, column)
        .ok_or_else(|| format!("✗ {day} period {period} is empty"))?;

    println!("\n{} ({day}, period {period})", lesson.subject);
    if !lesson.teacher.is_empty() {
        println!("  Teacher: {}", lesson.teacher);
    }
    match lesson_period(&timetable, &periods, column, lesson.id) {
        Some(p) => println!("  Time:    {} ({} min)", p.time_range(), p.minutes()),
        None => println!("  Time:    not set"),
    }

    let elsewhere = cross_reference(&timetable, &lesson.subject, column);
    if elsewhere.is_empty() {
        println!("  Only on {day}");
    } else {
        println!("  Also on:");
        for (other_day, numbers) in &elsewhere {
            let list: Vec<String> = numbers.iter().map(ToString::to_string).collect();
            println!("    {other_day}: period {}", list.join(", "));
        }
    }
    Ok(())
}
