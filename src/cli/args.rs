//! CLI argument definitions for `timetabler`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use timetabler::config::ConfigOverrides;
use timetabler::core::ingest::PoolFilter;
use timetabler::core::models::Day;
use timetabler::core::report::ReportFormat;
use timetabler::core::strategy::StrategyKind;
use timetabler::logger::Level;

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
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `count`, `strategy`, `out_dir`)
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

/// Pool selection shared by `recommend` and `pool`
#[derive(Debug, Clone, Default, Args)]
pub struct PoolArgs {
    /// Offerings CSV file (defaults to config `offerings_file`)
    #[arg(value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Only consider offerings from this department
    #[arg(long, value_name = "NAME")]
    pub department: Option<String>,

    /// Only consider offerings for this year of study
    #[arg(long, value_name = "YEAR")]
    pub year: Option<u32>,

    /// Exclude offerings meeting on these days (e.g., `--free-day fri --free-day 월`)
    #[arg(long = "free-day", value_name = "DAY")]
    pub free_days: Vec<Day>,
}

impl PoolArgs {
    /// Build the pool filter from the selection flags
    pub fn to_filter(&self) -> PoolFilter {
        PoolFilter {
            department: self.department.clone(),
            year: self.year,
            free_days: self.free_days.clone(),
        }
    }

    fn offerings_file_override(&self) -> Option<String> {
        self.input_file
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }
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
    /// Recommend conflict-free timetables.
    ///
    /// Loads offerings from a CSV file, narrows them to the selected pool and
    /// prints every timetable of COUNT courses with no time overlap.
    Recommend {
        #[command(flatten)]
        pool: PoolArgs,

        /// Courses per timetable (defaults to config `count`)
        #[arg(short = 'k', long, value_name = "COUNT")]
        count: Option<usize>,

        /// Strategy: base or credit (defaults to config `strategy`)
        #[arg(short, long, value_name = "STRATEGY")]
        strategy: Option<StrategyKind>,

        /// Show at most this many timetables (0 = all)
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Split the search across all CPU cores
        #[arg(long)]
        parallel: bool,

        /// Output format: text, markdown (md) or json
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List the offerings that would be searched.
    Pool {
        #[command(flatten)]
        pool: PoolArgs,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "timetabler",
    about = "Recommend conflict-free course timetables",
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

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config output directory
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Global flags and the search flags of `recommend` both land here, so the
    /// rest of the run reads a single effective configuration.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            out_dir: self
                .out_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            ..ConfigOverrides::default()
        };

        match &self.command {
            Command::Recommend {
                pool,
                count,
                strategy,
                limit,
                parallel,
                ..
            } => {
                overrides.count = *count;
                overrides.strategy = strategy.map(|kind| kind.to_string());
                overrides.limit = *limit;
                overrides.parallel = parallel.then_some(true);
                overrides.offerings_file = pool.offerings_file_override();
            }
            Command::Pool { pool } => {
                overrides.offerings_file = pool.offerings_file_override();
            }
            Command::Config { .. } => {}
        }

        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            out_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.count.is_none());
        assert!(overrides.strategy.is_none());
        assert!(overrides.parallel.is_none());
        assert!(overrides.offerings_file.is_none());
        assert!(overrides.out_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_level = Some(LogLevelArg::Debug);
        args.config_log_file = Some(PathBuf::from("/tmp/test.log"));
        args.config_verbose = Some(true);
        args.out_dir = Some(PathBuf::from("/output"));

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.out_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_recommend_flags_become_overrides() {
        let args = Cli::parse_from([
            "timetabler",
            "recommend",
            "offerings.csv",
            "-k",
            "3",
            "--strategy",
            "credit",
            "--limit",
            "10",
            "--parallel",
        ]);

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.count, Some(3));
        assert_eq!(overrides.strategy, Some("credit".to_string()));
        assert_eq!(overrides.limit, Some(10));
        assert_eq!(overrides.parallel, Some(true));
        assert_eq!(overrides.offerings_file, Some("offerings.csv".to_string()));
    }

    #[test]
    fn test_recommend_without_flags_keeps_config() {
        let args = Cli::parse_from(["timetabler", "recommend"]);
        let overrides = args.to_config_overrides();
        assert!(overrides.count.is_none());
        assert!(overrides.strategy.is_none());
        assert!(overrides.parallel.is_none());
        assert!(overrides.offerings_file.is_none());
    }

    #[test]
    fn test_pool_filter_flags() {
        let args = Cli::parse_from([
            "timetabler",
            "pool",
            "--department",
            "CS",
            "--year",
            "2",
            "--free-day",
            "fri",
            "--free-day",
            "월",
        ]);

        let Command::Pool { pool } = args.command else {
            panic!("expected pool command");
        };
        let filter = pool.to_filter();
        assert_eq!(filter.department.as_deref(), Some("CS"));
        assert_eq!(filter.year, Some(2));
        assert_eq!(filter.free_days, vec![Day::Fri, Day::Mon]);
    }

    #[test]
    fn test_format_parsing() {
        let args = Cli::parse_from(["timetabler", "recommend", "-f", "md"]);
        let Command::Recommend { format, .. } = args.command else {
            panic!("expected recommend command");
        };
        assert_eq!(format, ReportFormat::Markdown);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result = Cli::try_parse_from(["timetabler", "recommend", "-s", "fastest"]);
        assert!(result.is_err());
    }
}
