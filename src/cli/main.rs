//! Command-line interface entry point for `timetabler`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use timetabler::config::{Config, ConfigOverrides};
use timetabler::info;
use timetabler::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() -> ExitCode {
    let args = Cli::parse();

    // `config` edits the stored file; everything else runs on the effective copy
    let mut stored = Config::load();
    let defaults = Config::from_defaults();
    let config = effective_config(&stored, &args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let outcome = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut stored, &defaults),
        Command::Recommend {
            pool,
            format,
            output,
            ..
        } => commands::recommend::run(&pool, format, output.as_deref(), &config),
        Command::Pool { pool } => commands::pool::run(&pool, &config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Stored config with this run's flags layered on top; never saved
fn effective_config(stored: &Config, overrides: &ConfigOverrides) -> Config {
    let mut config = stored.clone();
    config.apply_overrides(overrides);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_set_does_not_persist_run_flags() {
        let args = Cli::parse_from([
            "timetabler",
            "--out-dir",
            "/tmp/one-run",
            "--config-level",
            "error",
            "config",
            "set",
            "count",
            "3",
        ]);
        let mut stored = Config::from_defaults();
        let effective = effective_config(&stored, &args.to_config_overrides());

        assert_eq!(effective.paths.out_dir, "/tmp/one-run");
        assert_eq!(effective.logging.level, "error");

        let Command::Config {
            subcommand: Some(args::ConfigSubcommand::Set { key, value }),
        } = args.command
        else {
            panic!("expected config set");
        };
        stored.set(&key, &value).expect("count is valid");

        let written = toml::to_string_pretty(&stored).expect("Failed to serialize");
        assert!(written.contains("count = 3"));
        assert!(!written.contains("/tmp/one-run"));
        assert_eq!(stored.logging.level, Config::from_defaults().logging.level);
    }
}
