//! Periods command handler

use super::{period_row, store_failure, Workspace};
use crate::args::PeriodsSubcommand;
use chrono::NaiveTime;
use study_planner::core::models::ClassPeriod;

/// Dispatch periods subcommands
pub fn run(subcommand: Option<PeriodsSubcommand>, workspace: &mut Workspace) -> Result<(), String> {
    match subcommand.unwrap_or(PeriodsSubcommand::List) {
        PeriodsSubcommand::List => {
            list(workspace);
            Ok(())
        }
        PeriodsSubcommand::Set { number, start, end } => set(workspace, number, start, end),
        PeriodsSubcommand::Add { start, end } => add(workspace, start, end),
    }
}

fn list(workspace: &Workspace) {
    let periods: Vec<ClassPeriod> = workspace.repo.load();
    if periods.is_empty() {
        println!("No periods configured");
        return;
    }
    for (index, period) in periods.iter().enumerate() {
        println!("{:>2}. {}", index + 1, period.time_range());
    }
}

fn set(workspace: &mut Workspace, number: usize, start: NaiveTime, end: NaiveTime) -> Result<(), String> {
    let row = period_row(number)?;
    let range = workspace
        .repo
        .try_update(|periods: &mut Vec<ClassPeriod>| -> Result<String, String> {
            let period = periods
                .get_mut(row)
                .ok_or_else(|| format!("✗ There is no period {number}"))?;
            period.retime(start, end).map_err(|e| format!("✗ {e}"))?;
            Ok(period.time_range())
        })
        .map_err(store_failure)??;
    println!("✓ Period {number}: {range}");
    Ok(())
}

fn add(workspace: &mut Workspace, start: NaiveTime, end: NaiveTime) -> Result<(), String> {
    let period = ClassPeriod::try_new(start, end).map_err(|e| format!("✗ {e}"))?;
    let range = period.time_range();
    let count = workspace
        .repo
        .update(|periods: &mut Vec<ClassPeriod>| {
            periods.push(period);
            periods.len()
        })
        .map_err(store_failure)?;
    println!("✓ Period {count}: {range}");
    Ok(())
}
