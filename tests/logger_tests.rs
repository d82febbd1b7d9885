//! Integration tests for logger behavior.

use study_planner::logger::{close_file_logging, init_file_logging, set_level, set_level_from_str, Level};
use study_planner::{debug, error, info, warn};
use tempfile::TempDir;

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("logs/nested/planner.log");
    assert!(init_file_logging(&path));
    error!("written to file");
    close_file_logging();
    assert!(path.exists());
}
