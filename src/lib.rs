//! Shared library for `study-planner`
//! Contains the timetable, assignment, reminder and quiz logic used by the CLI.

pub mod core;
pub mod logger;

pub use self::core::{config, get_version};
