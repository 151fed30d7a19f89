//! Status logger trait definition

use std::sync::Arc;

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl StatusLevel {
    /// Parse a level name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "trace" => Some(StatusLevel::Trace),
            "debug" => Some(StatusLevel::Debug),
            "info" => Some(StatusLevel::Info),
            "warn" | "warning" => Some(StatusLevel::Warn),
            "error" => Some(StatusLevel::Error),
            "fatal" => Some(StatusLevel::Fatal),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusLevel::Trace => write!(f, "TRACE"),
            StatusLevel::Debug => write!(f, "DEBUG"),
            StatusLevel::Info => write!(f, "INFO "),
            StatusLevel::Warn => write!(f, "WARN "),
            StatusLevel::Error => write!(f, "ERROR"),
            StatusLevel::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Diagnostic channel for the bootstrap itself
///
/// Configuration discovery runs before any logging is configured, so it
/// cannot report through the logging system it is setting up. Every
/// component takes one of these instead.
///
/// Implementations:
/// - `NoOpStatusLogger`: silent
/// - `ConsoleStatusLogger`: stderr, filtered by level
/// - `MemoryStatusLogger`: keeps entries for inspection in tests
/// - `TracingStatusLogger`: forwards to a host's `tracing` subscriber
pub trait StatusLogger: Send + Sync {
    /// Record a message at the given level
    fn log(&self, level: StatusLevel, message: &str);

    /// Whether messages at this level are recorded at all
    fn is_enabled(&self, level: StatusLevel) -> bool {
        let _ = level;
        true
    }

    fn trace(&self, message: &str) {
        self.log(StatusLevel::Trace, message);
    }

    fn debug(&self, message: &str) {
        self.log(StatusLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(StatusLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(StatusLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(StatusLevel::Error, message);
    }

    fn fatal(&self, message: &str) {
        self.log(StatusLevel::Fatal, message);
    }
}

/// Type alias for an Arc-wrapped status logger
pub type SharedStatusLogger = Arc<dyn StatusLogger>;

/// Extension trait for logging with format arguments
///
/// Arguments are only rendered when the level is enabled.
pub trait StatusLoggerExt: StatusLogger {
    fn log_fmt(&self, level: StatusLevel, args: std::fmt::Arguments<'_>) {
        if self.is_enabled(level) {
            self.log(level, &args.to_string());
        }
    }
}

impl<T: StatusLogger + ?Sized> StatusLoggerExt for T {}

/// Convenience macros for status logging
#[macro_export]
macro_rules! status_trace {
    ($logger:expr, $($arg:tt)*) => {
        $crate::status::StatusLoggerExt::log_fmt(&*$logger, $crate::status::StatusLevel::Trace, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! status_debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::status::StatusLoggerExt::log_fmt(&*$logger, $crate::status::StatusLevel::Debug, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! status_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::status::StatusLoggerExt::log_fmt(&*$logger, $crate::status::StatusLevel::Info, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! status_warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::status::StatusLoggerExt::log_fmt(&*$logger, $crate::status::StatusLevel::Warn, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! status_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::status::StatusLoggerExt::log_fmt(&*$logger, $crate::status::StatusLevel::Error, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! status_fatal {
    ($logger:expr, $($arg:tt)*) => {
        $crate::status::StatusLoggerExt::log_fmt(&*$logger, $crate::status::StatusLevel::Fatal, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(StatusLevel::Debug > StatusLevel::Trace);
        assert!(StatusLevel::Info > StatusLevel::Debug);
        assert!(StatusLevel::Warn > StatusLevel::Info);
        assert!(StatusLevel::Error > StatusLevel::Warn);
        assert!(StatusLevel::Fatal > StatusLevel::Error);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(StatusLevel::parse("TRACE"), Some(StatusLevel::Trace));
        assert_eq!(StatusLevel::parse(" warning "), Some(StatusLevel::Warn));
        assert_eq!(StatusLevel::parse("Fatal"), Some(StatusLevel::Fatal));
        assert_eq!(StatusLevel::parse("verbose"), None);
    }
}
