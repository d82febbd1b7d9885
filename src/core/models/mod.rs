//! Data models for `study-planner`

pub mod assignment;
pub mod lesson;
pub mod period;
pub mod weekday;

pub use assignment::{Assignment, AssignmentDraft};
pub use lesson::Lesson;
pub use period::{default_periods, period_for_row, ClassPeriod};
pub use weekday::{Weekday, WeekdayLimits, SCHOOL_DAYS, SCHOOL_DAY_COUNT};
pub use weekly_test::{TestSession, WeeklyTest, MAX_SESSIONS};
