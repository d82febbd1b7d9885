//! CLI argument definitions for `studyplanner`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use study_planner::config::ConfigOverrides;
use study_planner::core::models::Weekday;
use study_planner::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Parse `HH:MM`
pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| format!("Invalid time '{value}' (expected HH:MM)"))
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{value}' (expected YYYY-MM-DD)"))
}

/// Parse `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD HH:MM`
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| format!("Invalid date/time '{value}' (expected YYYY-MM-DDTHH:MM)"))
}

/// Parse a deadline. A bare date means the end of that day (23:59).
pub fn parse_deadline(value: &str) -> Result<NaiveDateTime, String> {
    parse_datetime(value).or_else(|_| {
        parse_date(value)?
            .and_hms_opt(23, 59, 0)
            .ok_or_else(|| format!("Invalid deadline '{value}'"))
    })
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`, `lead_days`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum TimetableSubcommand {
    /// Print the grid, with slots past each day's limit greyed out.
    Show,
    /// Put a lesson into a slot.
    Set {
        /// Weekday (Monday..Saturday, or mon..sat)
        #[arg(value_name = "DAY")]
        day: Weekday,
        /// 1-based period number
        #[arg(value_name = "PERIOD")]
        period: usize,
        /// Subject name
        #[arg(value_name = "SUBJECT")]
        subject: String,
        /// Teacher name
        #[arg(value_name = "TEACHER", default_value = "")]
        teacher: String,
    },
    /// Empty a slot.
    Clear {
        #[arg(value_name = "DAY")]
        day: Weekday,
        #[arg(value_name = "PERIOD")]
        period: usize,
    },
    /// Show a lesson's time and the other days its subject meets.
    Info {
        #[arg(value_name = "DAY")]
        day: Weekday,
        #[arg(value_name = "PERIOD")]
        period: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum PeriodsSubcommand {
    /// List period times.
    List,
    /// Change the times of an existing period.
    Set {
        /// 1-based period number
        #[arg(value_name = "NUMBER")]
        number: usize,
        #[arg(value_name = "START", value_parser = parse_time)]
        start: NaiveTime,
        #[arg(value_name = "END", value_parser = parse_time)]
        end: NaiveTime,
    },
    /// Append a period.
    Add {
        #[arg(value_name = "START", value_parser = parse_time)]
        start: NaiveTime,
        #[arg(value_name = "END", value_parser = parse_time)]
        end: NaiveTime,
    },
}

#[derive(Debug, Subcommand)]
pub enum LimitsSubcommand {
    /// Show the period limit of every school day.
    Show,
    /// Set how many periods a day has.
    Set {
        #[arg(value_name = "DAY")]
        day: Weekday,
        #[arg(value_name = "COUNT")]
        count: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum TasksSubcommand {
    /// List assignments (important ones only unless --all).
    List {
        /// Include assignments outside the coming week
        #[arg(short, long)]
        all: bool,
    },
    /// Add an assignment and schedule its reminders.
    Add {
        #[arg(value_name = "SUBJECT")]
        subject: String,
        #[arg(value_name = "TITLE")]
        title: String,
        /// Deadline as YYYY-MM-DDTHH:MM, or YYYY-MM-DD for end of day
        #[arg(value_name = "DEADLINE", value_parser = parse_deadline)]
        deadline: NaiveDateTime,
        /// How the work is handed in
        #[arg(short, long, value_name = "METHOD", default_value = "")]
        method: String,
    },
    /// Edit fields of an assignment, re-scheduling its reminders when needed.
    Edit {
        /// Assignment id or unique prefix
        #[arg(value_name = "ID")]
        id: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_parser = parse_deadline)]
        deadline: Option<NaiveDateTime>,
        #[arg(long)]
        method: Option<String>,
    },
    /// Toggle the star on an assignment.
    Star {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Delete an assignment and cancel its reminders.
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Show when an assignment's reminders fire and whether they are pending.
    Reminders {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum QuizSubcommand {
    /// List weekly quiz series and their sessions.
    List,
    /// Create a weekly quiz series.
    Add {
        #[arg(value_name = "NAME")]
        name: String,
        /// Day of the week the quiz is held
        #[arg(value_name = "WEEKDAY")]
        weekday: Weekday,
        /// Number of sessions (1-30)
        #[arg(value_name = "COUNT")]
        count: usize,
        /// First possible date (defaults to today)
        #[arg(long, value_name = "DATE", value_parser = parse_date)]
        start: Option<NaiveDate>,
    },
    /// Change the number of sessions, keeping existing ones.
    Resize {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "COUNT")]
        count: usize,
    },
    /// Edit one session's date or page range.
    Session {
        #[arg(value_name = "ID")]
        id: String,
        /// 1-based session number
        #[arg(value_name = "NUMBER")]
        number: usize,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long, value_name = "RANGE")]
        range: Option<String>,
    },
    /// Delete a quiz series.
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show what is left today: lessons, important assignments, next quizzes.
    Today,
    /// View and edit the weekly timetable.
    Timetable {
        #[command(subcommand)]
        subcommand: Option<TimetableSubcommand>,
    },
    /// View and edit class period times.
    Periods {
        #[command(subcommand)]
        subcommand: Option<PeriodsSubcommand>,
    },
    /// View and edit how many periods each day has.
    Limits {
        #[command(subcommand)]
        subcommand: Option<LimitsSubcommand>,
    },
    /// Manage assignments.
    Tasks {
        #[command(subcommand)]
        subcommand: Option<TasksSubcommand>,
    },
    /// Manage weekly quizzes.
    Quiz {
        #[command(subcommand)]
        subcommand: Option<QuizSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studyplanner",
    about = "Student planner: timetable, homework and weekly quizzes",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Override the data directory for this run
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Pretend the current time is this (YYYY-MM-DDTHH:MM)
    #[arg(long, value_name = "DATETIME", value_parser = parse_datetime)]
    pub now: Option<NaiveDateTime>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means the config value stands.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.verbose.then_some(true),
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
