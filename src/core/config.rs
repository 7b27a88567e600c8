//! Configuration module for `timetabler`

use crate::core::strategy::StrategyKind;
use crate::logger::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Compiled-in defaults; debug builds read and write `dconfig.toml` so a dev
/// binary never touches the installed config
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Expanded to the config directory in path values
const DIR_VARIABLE: &str = "$TIMETABLER";

/// `[logging]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// `[search]`: defaults for `recommend`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Courses per timetable (0 = unset, filled from defaults)
    #[serde(default)]
    pub count: usize,
    /// Strategy name (base, credit)
    #[serde(default)]
    pub strategy: String,
    /// Maximum results to show (0 = no cap)
    #[serde(default)]
    pub limit: usize,
    /// Run the search across a thread pool
    #[serde(default)]
    pub parallel: bool,
}

/// `[paths]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Offerings CSV used when no file is given on the command line
    #[serde(default)]
    pub offerings_file: String,
    /// Directory for saved reports
    #[serde(default)]
    pub out_dir: String,
}

/// Persisted CLI settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// One run's flag values layered over the stored config. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override courses per timetable
    pub count: Option<usize>,
    /// Override strategy name
    pub strategy: Option<String>,
    /// Override result cap
    pub limit: Option<usize>,
    /// Override parallel search flag
    pub parallel: Option<bool>,
    /// Override default offerings file
    pub offerings_file: Option<String>,
    /// Override report output directory
    pub out_dir: Option<String>,
}

impl Config {
    /// Directory that `$TIMETABLER` expands to: `timetabler` under the
    /// platform config dir, or `./timetabler` when there is none
    #[must_use]
    pub fn get_timetabler_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("timetabler")
    }

    /// Fill empty strings and a zero `count` from `defaults`. Returns whether
    /// anything changed, so [`load`](Self::load) knows to rewrite the file.
    ///
    /// `verbose`, `limit` and `parallel` are left alone since their zero values are
    /// legitimate settings.
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.search.count == 0 && defaults.search.count != 0 {
            self.search.count = defaults.search.count;
            changed = true;
        }
        if self.search.strategy.is_empty() && !defaults.search.strategy.is_empty() {
            self.search.strategy.clone_from(&defaults.search.strategy);
            changed = true;
        }

        if self.paths.offerings_file.is_empty() && !defaults.paths.offerings_file.is_empty() {
            self.paths
                .offerings_file
                .clone_from(&defaults.paths.offerings_file);
            changed = true;
        }
        if self.paths.out_dir.is_empty() && !defaults.paths.out_dir.is_empty() {
            self.paths.out_dir.clone_from(&defaults.paths.out_dir);
            changed = true;
        }

        changed
    }

    /// Layer `overrides` on top. Apply to a copy of the stored config; a config
    /// with overrides applied must not be saved.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(count) = overrides.count {
            self.search.count = count;
        }
        if let Some(strategy) = &overrides.strategy {
            self.search.strategy.clone_from(strategy);
        }
        if let Some(limit) = overrides.limit {
            self.search.limit = limit;
        }
        if let Some(parallel) = overrides.parallel {
            self.search.parallel = parallel;
        }

        if let Some(offerings_file) = &overrides.offerings_file {
            self.paths.offerings_file.clone_from(offerings_file);
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
    }

    /// `$TIMETABLER/config.toml`, or `dconfig.toml` in debug builds
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_timetabler_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$TIMETABLER` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_timetabler_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Parse TOML and expand `$TIMETABLER` in the log file and both paths
    ///
    /// # Errors
    /// Returns the TOML error for malformed input
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.offerings_file = Self::expand_variables(&config.paths.offerings_file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Compiled-in defaults for this build profile
    ///
    /// # Panics
    /// Only if the bundled defaults file is malformed
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Read the stored config, writing the defaults out on first run
    ///
    /// An unreadable or malformed file is left untouched and the defaults are
    /// used for this run.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Write to [`get_config_file_path`](Self::get_config_file_path)
    ///
    /// # Errors
    /// Fails when the directory or file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Strategy selected by `search.strategy`
    ///
    /// # Errors
    /// Returns an error if the stored name is not a known strategy
    pub fn strategy_kind(&self) -> Result<StrategyKind, String> {
        self.search.strategy.parse()
    }

    /// Result cap from `search.limit` (`None` when zero)
    #[must_use]
    pub const fn result_limit(&self) -> Option<usize> {
        match self.search.limit {
            0 => None,
            limit => Some(limit),
        }
    }

    /// Value of a flat key such as `count` or `out_dir`; `None` for unknown keys.
    /// The path keys also accept dashes.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "count" => Some(self.search.count.to_string()),
            "strategy" => Some(self.search.strategy.clone()),
            "limit" => Some(self.search.limit.to_string()),
            "parallel" => Some(self.search.parallel.to_string()),
            "offerings_file" | "offerings-file" => Some(self.paths.offerings_file.clone()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            _ => None,
        }
    }

    /// Validate and store a value for a flat key
    ///
    /// `level` and `strategy` are stored in canonical form. `count` must be
    /// positive; `verbose` and `parallel` take `true` or `false`.
    /// Only memory changes until [`save`](Config::save).
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                let level: Level = value.parse()?;
                self.logging.level = level.as_str().to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "count" => {
                self.search.count = match value.parse::<usize>() {
                    Ok(count) if count > 0 => count,
                    _ => return Err(format!("Invalid value for 'count': '{value}' (expected a positive integer)")),
                };
            }
            "strategy" => {
                let kind: StrategyKind = value.parse()?;
                self.search.strategy = kind.to_string();
            }
            "limit" => {
                self.search.limit = value.parse::<usize>().map_err(|_| {
                    format!("Invalid value for 'limit': '{value}' (expected 0 or a positive integer)")
                })?;
            }
            "parallel" => self.search.parallel = parse_bool(key, value)?,
            "offerings_file" | "offerings-file" => self.paths.offerings_file = value.to_string(),
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Restore one key from `defaults`
    ///
    /// # Errors
    /// Unknown keys
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "count" => self.search.count = defaults.search.count,
            "strategy" => self.search.strategy.clone_from(&defaults.search.strategy),
            "limit" => self.search.limit = defaults.search.limit,
            "parallel" => self.search.parallel = defaults.search.parallel,
            "offerings_file" | "offerings-file" => self
                .paths
                .offerings_file
                .clone_from(&defaults.paths.offerings_file),
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the stored file; the next [`load`](Self::load) writes fresh defaults
    ///
    /// # Errors
    /// The file exists but cannot be removed
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[search]")?;
        writeln!(f, "  count = {}", self.search.count)?;
        writeln!(f, "  strategy = \"{}\"", self.search.strategy)?;
        writeln!(f, "  limit = {}", self.search.limit)?;
        writeln!(f, "  parallel = {}", self.search.parallel)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  offerings_file = \"{}\"", self.paths.offerings_file)?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        Ok(())
    }
}
