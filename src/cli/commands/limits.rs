//! Limits command handler

use super::{store_failure, Workspace};
use crate::args::LimitsSubcommand;
use study_planner::core::models::{ClassPeriod, Weekday, WeekdayLimits, SCHOOL_DAYS};
use study_planner::warn;

/// Dispatch limits subcommands
pub fn run(subcommand: Option<LimitsSubcommand>, workspace: &mut Workspace) -> Result<(), String> {
    match subcommand.unwrap_or(LimitsSubcommand::Show) {
        LimitsSubcommand::Show => {
            let limits: WeekdayLimits = workspace.repo.load();
            for day in SCHOOL_DAYS {
                println!("{:<10} {}", day.name(), limits.limit(day));
            }
            Ok(())
        }
        LimitsSubcommand::Set { day, count } => set(workspace, day, count),
    }
}

fn set(workspace: &mut Workspace, day: Weekday, count: usize) -> Result<(), String> {
    if day.column().is_none() {
        return Err(format!("✗ {day} has no timetable column"));
    }
    let periods = workspace.repo.load::<Vec<ClassPeriod>>().len();
    if count > periods {
        warn!("{day} limit {count} exceeds the {periods} configured period(s)");
    }
    workspace
        .repo
        .update(|limits: &mut WeekdayLimits| limits.set(day, count))
        .map_err(store_failure)?;
    println!("✓ {day}: {count} period(s)");
    Ok(())
}
