//! Leveled logger shared by the library and the CLI.
//!
//! Feature flags: `log-info`, `log-debug`, `verbose`, `file-logging`.
//! Errors and warnings go to stderr, info and debug to stdout. Once a log file
//! is opened, leveled messages go there instead of the terminal. `verbose!`
//! output is plain user-facing text and never reaches the file.

use std::fmt::{self, Arguments};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::Mutex,
};

/// Logging levels, most severe first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Failures (always enabled).
    Error = 1,
    /// Recoverable problems (always enabled).
    Warn = 2,
    /// Progress messages (requires `log-info`).
    Info = 3,
    /// Search internals (requires `log-debug` and the runtime debug flag).
    Debug = 4,
}

impl Level {
    /// Lowercase name, as stored in config files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }

    const fn compiled_in(self) -> bool {
        match self {
            Self::Error | Self::Warn => true,
            Self::Info => cfg!(feature = "log-info"),
            Self::Debug => cfg!(feature = "log-debug"),
        }
    }

    const fn is_terminal_error(self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: '{s}'")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime logger state
struct LoggerState {
    level: AtomicU8,
    debug: AtomicBool,
    verbose: AtomicBool,
    #[cfg(feature = "file-logging")]
    file: Mutex<Option<File>>,
}

const fn initial_level() -> Level {
    if cfg!(feature = "log-debug") {
        Level::Debug
    } else if cfg!(feature = "log-info") {
        Level::Info
    } else {
        Level::Warn
    }
}

static STATE: LoggerState = LoggerState {
    level: AtomicU8::new(initial_level() as u8),
    debug: AtomicBool::new(cfg!(feature = "log-debug")),
    verbose: AtomicBool::new(false),
    #[cfg(feature = "file-logging")]
    file: Mutex::new(None),
};

/// Set the global log level.
pub fn set_level(level: Level) {
    STATE.level.store(level as u8, Ordering::SeqCst);
}

/// Parse a level name (case-insensitive) and set it. Returns `true` on success.
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    level.parse::<Level>().map(set_level).is_ok()
}

/// Current global log level.
#[must_use]
pub fn current_level() -> Level {
    Level::from_u8(STATE.level.load(Ordering::SeqCst))
}

/// Turn debug output on. No effect without the `log-debug` feature.
pub fn enable_debug() {
    STATE
        .debug
        .store(cfg!(feature = "log-debug"), Ordering::SeqCst);
}

/// Turn debug output off.
pub fn disable_debug() {
    STATE.debug.store(false, Ordering::SeqCst);
}

/// Whether debug output is on.
#[must_use]
pub fn is_debug_enabled() -> bool {
    STATE.debug.load(Ordering::SeqCst)
}

/// Turn `verbose!` output on. No effect without the `verbose` feature.
pub fn enable_verbose() {
    STATE
        .verbose
        .store(cfg!(feature = "verbose"), Ordering::SeqCst);
}

/// Turn `verbose!` output off.
pub fn disable_verbose() {
    STATE.verbose.store(false, Ordering::SeqCst);
}

/// Whether `verbose!` output is on.
#[must_use]
pub fn is_verbose_enabled() -> bool {
    STATE.verbose.load(Ordering::SeqCst)
}

/// Append leveled messages to `path` from now on. Returns `true` on success.
#[cfg(feature = "file-logging")]
#[must_use]
pub fn init_file_logging(path: &Path) -> bool {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };
    STATE.file.lock().is_ok_and(|mut slot| {
        *slot = Some(file);
        true
    })
}

/// File logging is compiled out; always returns `false`.
#[cfg(not(feature = "file-logging"))]
#[must_use]
pub fn init_file_logging(_path: &std::path::Path) -> bool {
    false
}

/// Write to the log file if one is open. Returns `false` when there is none.
#[cfg(feature = "file-logging")]
fn write_file(line: &str) -> bool {
    let Ok(mut slot) = STATE.file.lock() else {
        return false;
    };
    slot.as_mut().is_some_and(|file| {
        let _ = writeln!(file, "{line}");
        let _ = file.flush();
        true
    })
}

#[cfg(not(feature = "file-logging"))]
const fn write_file(_line: &str) -> bool {
    false
}

/// Whether a message at `level` would currently be emitted.
#[must_use]
pub fn should_log(level: Level) -> bool {
    level.compiled_in()
        && level <= current_level()
        && (level != Level::Debug || is_debug_enabled())
}

/// Dispatcher behind the logging macros.
pub fn log_impl(level: Level, args: Arguments) {
    if !should_log(level) {
        return;
    }
    let line = format!("{} {args}", level.tag());
    if write_file(&line) {
        return;
    }
    if level.is_terminal_error() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

#[macro_export]
/// Logs an error-level message (always enabled).
macro_rules! error { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning-level message (always enabled).
macro_rules! warn  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info-level message (requires `log-info` feature).
macro_rules! info  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug-level message (requires `log-debug` feature and runtime enablement).
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints a plain message when verbose output is on. Never written to log files.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() {
            println!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("ERR".parse::<Level>(), Ok(Level::Error));
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warn));
        assert_eq!(" info ".parse::<Level>(), Ok(Level::Info));
        assert!("trace".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_display_round_trip() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug] {
            assert_eq!(level.to_string().parse::<Level>(), Ok(level));
            assert_eq!(Level::from_u8(level as u8), level);
        }
    }

    #[test]
    fn test_levels_are_ordered_by_severity() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Info < Level::Debug);
    }

    #[test]
    fn test_errors_always_compiled_in() {
        assert!(Level::Error.compiled_in());
        assert!(Level::Warn.compiled_in());
    }
}
