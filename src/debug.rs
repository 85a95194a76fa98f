use parking_lot::Mutex;
/// Debug logging for cosmos-term
///
/// Controlled by the DEBUG_LEVEL environment variable:
/// - 0 or unset: No debugging
/// - 1: Errors only
/// - 2: Info level (session and pane lifecycle)
/// - 3: Debug level (writes, geometry, viewport)
/// - 4: Trace level (every batch, every resize)
///
/// All output goes to `cosmos_term_debug.log` in the system temp directory so
/// it never mixes with the terminal output the binary writes to stdout.
/// `log::*` records are routed into the same file by [`init_log_bridge`].
use cosmos_term_config::LogLevel;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::from_number(&val),
            Err(_) => DebugLevel::Off,
        }
    }

    fn from_number(val: &str) -> Self {
        match val.trim().parse::<u8>() {
            Ok(1) => DebugLevel::Error,
            Ok(2) => DebugLevel::Info,
            Ok(3) => DebugLevel::Debug,
            Ok(4) => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Error => DebugLevel::Error,
            log::Level::Warn | log::Level::Info => DebugLevel::Info,
            log::Level::Debug => DebugLevel::Debug,
            log::Level::Trace => DebugLevel::Trace,
        }
    }
}

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("cosmos_term_debug.log")
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new(level: DebugLevel) -> Self {
        if level == DebugLevel::Off {
            return DebugLogger { level, file: None };
        }

        // Silently run without a file if it can't be opened; debug output
        // must never land on the terminal.
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        let mut logger = DebugLogger { level, file };
        logger.write_raw(&format!(
            "\n{}\ncosmos-term debug session started at {} (level={:?})\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            level,
            "=".repeat(80)
        ));
        logger
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level <= self.level {
            let level_str = match level {
                DebugLevel::Error => "ERROR",
                DebugLevel::Info => "INFO ",
                DebugLevel::Debug => "DEBUG",
                DebugLevel::Trace => "TRACE",
                DebugLevel::Off => return,
            };
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                get_timestamp(),
                level_str,
                category,
                msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new(DebugLevel::from_env())))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// `log` facade backend writing into the debug file.
struct LogBridge {
    mirror_stderr: AtomicBool,
}

static LOG_BRIDGE: LogBridge = LogBridge {
    mirror_stderr: AtomicBool::new(false),
};

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = record.args().to_string();
        {
            let mut logger = get_logger().lock();
            logger.log(
                DebugLevel::from_log_level(record.level()),
                record.target(),
                &msg,
            );
        }
        if self.mirror_stderr.load(Ordering::Relaxed) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), msg);
        }
    }

    fn flush(&self) {}
}

/// Install the `log` facade backend.
///
/// Precedence: an explicit `level` (CLI flag or config), then `RUST_LOG`,
/// then `DEBUG_LEVEL`. When `RUST_LOG` is set, records are also mirrored to
/// stderr.
pub fn init_log_bridge(level: Option<LogLevel>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = level
        .map(LogLevel::to_level_filter)
        .or_else(|| {
            rust_log
                .as_deref()
                .and_then(LogLevel::from_name)
                .map(LogLevel::to_level_filter)
        })
        .unwrap_or(match DebugLevel::from_env() {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Error,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        });

    // The file must accept everything the facade lets through.
    let file_level = match filter {
        log::LevelFilter::Off => DebugLevel::Off,
        log::LevelFilter::Error => DebugLevel::Error,
        log::LevelFilter::Warn | log::LevelFilter::Info => DebugLevel::Info,
        log::LevelFilter::Debug => DebugLevel::Debug,
        log::LevelFilter::Trace => DebugLevel::Trace,
    };
    {
        let mut logger = get_logger().lock();
        if file_level > logger.level {
            *logger = DebugLogger::new(file_level);
        }
    }

    LOG_BRIDGE
        .mirror_stderr
        .store(rust_log.is_some(), Ordering::Relaxed);
    if log::set_logger(&LOG_BRIDGE).is_ok() {
        log::set_max_level(filter);
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!(DebugLevel::from_number("0"), DebugLevel::Off);
        assert_eq!(DebugLevel::from_number(" 3 "), DebugLevel::Debug);
        assert_eq!(DebugLevel::from_number("9"), DebugLevel::Off);
        assert_eq!(DebugLevel::from_number("x"), DebugLevel::Off);
    }

    #[test]
    fn test_log_levels_map_onto_debug_levels() {
        assert_eq!(DebugLevel::from_log_level(log::Level::Warn), DebugLevel::Info);
        assert_eq!(DebugLevel::from_log_level(log::Level::Trace), DebugLevel::Trace);
        assert!(DebugLevel::Error < DebugLevel::Trace);
    }

    #[test]
    fn test_log_bridge_installs_static_logger() {
        init_log_bridge(Some(LogLevel::Warn));
        assert_eq!(log::max_level(), log::LevelFilter::Warn);

        let error = log::Metadata::builder().level(log::Level::Error).build();
        let debug = log::Metadata::builder().level(log::Level::Debug).build();
        assert!(log::logger().enabled(&error));
        assert!(!log::logger().enabled(&debug));
        log::warn!("bridge test record");
    }

    #[test]
    fn test_log_path_in_temp_dir() {
        assert!(log_path().starts_with(std::env::temp_dir()));
        assert!(log_path().ends_with("cosmos_term_debug.log"));
    }
}
