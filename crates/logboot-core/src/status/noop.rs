//! No-op status logger

use super::traits::{StatusLevel, StatusLogger};

/// A status logger that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpStatusLogger;

impl NoOpStatusLogger {
    pub fn new() -> Self {
        Self
    }
}

impl StatusLogger for NoOpStatusLogger {
    fn log(&self, _level: StatusLevel, _message: &str) {}

    fn is_enabled(&self, _level: StatusLevel) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_logger() {
        let logger = NoOpStatusLogger::new();
        assert!(!logger.is_enabled(StatusLevel::Fatal));

        // These should all do nothing without panicking
        logger.debug("debug message");
        logger.error("error message");
        crate::status_fatal!(&logger, "fatal {}", 1);
    }
}
