//! Today command handler

use super::{short_id, Workspace};
use study_planner::core::schedule::{TodayDigest, TodaySchedule};
use study_planner::verbose;

/// Print the today digest
pub fn run(workspace: &Workspace) -> Result<(), String> {
    let data = workspace.repo.load_all();
    let digest = TodayDigest::build(
        &data.timetable,
        &data.periods,
        &data.limits,
        &data.assignments,
        &data.weekly_tests,
        workspace.now,
    );

    println!("\n=== {} ===", digest.date.format("%A, %Y-%m-%d"));

    println!("\nLessons");
    match &digest.schedule {
        TodaySchedule::NoSchool => println!("  No school today"),
        TodaySchedule::Lessons(lessons) if lessons.is_empty() => println!("  No more lessons today"),
        TodaySchedule::Lessons(lessons) => {
            for lesson in lessons {
                let teacher = if lesson.lesson.teacher.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", lesson.lesson.teacher)
                };
                println!(
                    "  {}. {:<11} {}{teacher}",
                    lesson.period_number,
                    lesson.period.time_range(),
                    lesson.lesson.subject
                );
            }
        }
    }

    println!("\nAssignments");
    if digest.assignments.is_empty() {
        println!("  Nothing due this week");
    }
    for item in &digest.assignments {
        let a = item.assignment;
        let star = if a.is_starred { "★" } else { " " };
        let overdue = if item.overdue { "  OVERDUE" } else { "" };
        println!(
            "  {star} {} {} [{}] due {}{overdue}",
            short_id(a.id),
            a.title,
            a.subject,
            a.deadline.format("%a %m-%d %H:%M")
        );
    }

    println!("\nQuizzes");
    if digest.quizzes.is_empty() {
        println!("  No upcoming quizzes");
    }
    for (test, session) in &digest.quizzes {
        let range = if session.page_range.is_empty() {
            String::new()
        } else {
            format!(" pp. {}", session.page_range)
        };
        println!(
            "  {} #{}/{} on {}{range}",
            test.name,
            session.session_number,
            test.total_sessions,
            session.date.format("%a %m-%d")
        );
    }

    verbose!(
        "\n{} period(s), {} assignment(s), {} quiz series loaded",
        data.periods.len(),
        data.assignments.len(),
        data.weekly_tests.len()
    );
    Ok(())
}
