//! Command-line interface entry point for `studyplanner`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::Workspace;
use study_planner::config::Config;
use study_planner::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use study_planner::{debug, error, info};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    // Verbose: enable if CLI flag OR config has verbose=true
    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // The --log-file flag already landed in config.logging.file through the overrides
    if !config.logging.file.is_empty() {
        let log_path = std::path::PathBuf::from(&config.logging.file);
        let display_path = log_path.to_string_lossy();
        if init_file_logging(&log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let now = args
        .now
        .unwrap_or_else(|| chrono::Local::now().naive_local());
    debug!("Running at {now} with data in {}", config.paths.data_dir);

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
            Ok(())
        }
        command => Workspace::open(&config, now).and_then(|mut workspace| dispatch(command, &mut workspace)),
    };

    if let Err(message) = result {
        error!("Command failed: {}", message.trim_start_matches("✗ "));
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn dispatch(command: Command, workspace: &mut Workspace) -> Result<(), String> {
    match command {
        Command::Today => commands::today::run(workspace),
        Command::Timetable { subcommand } => commands::timetable::run(subcommand, workspace),
        Command::Periods { subcommand } => commands::periods::run(subcommand, workspace),
        Command::Limits { subcommand } => commands::limits::run(subcommand, workspace),
        Command::Tasks { subcommand } => commands::tasks::run(subcommand, workspace),
        Command::Quiz { subcommand } => commands::quiz::run(subcommand, workspace),
        Command::Config { .. } => Ok(()),
    }
}
