//! Console status logger

use super::traits::{StatusLevel, StatusLogger};

/// Environment variable selecting the minimum level printed to the console
pub const STATUS_LEVEL_ENV: &str = "LOGBOOT_STATUS_LEVEL";

/// A status logger that writes to stderr
///
/// Only errors are printed by default; set `LOGBOOT_STATUS_LEVEL=debug` (or
/// `trace`) to watch the resolution pipeline run.
#[derive(Debug, Clone)]
pub struct ConsoleStatusLogger {
    prefix: String,
    min_level: StatusLevel,
}

impl Default for ConsoleStatusLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleStatusLogger {
    /// Create a console logger honouring `LOGBOOT_STATUS_LEVEL`
    pub fn new() -> Self {
        let min_level = std::env::var(STATUS_LEVEL_ENV)
            .ok()
            .and_then(|v| StatusLevel::parse(&v))
            .unwrap_or(StatusLevel::Error);

        Self {
            prefix: "[logboot]".to_string(),
            min_level,
        }
    }

    /// Use a custom prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Override the minimum level
    pub fn with_level(mut self, level: StatusLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn min_level(&self) -> StatusLevel {
        self.min_level
    }
}

impl StatusLogger for ConsoleStatusLogger {
    fn log(&self, level: StatusLevel, message: &str) {
        if self.is_enabled(level) {
            eprintln!("{} {} {}", self.prefix, level, message);
        }
    }

    fn is_enabled(&self, level: StatusLevel) -> bool {
        level >= self.min_level
    }
}
