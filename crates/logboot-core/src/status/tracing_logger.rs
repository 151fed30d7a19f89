//! Bridge from the status channel to `tracing`

use super::traits::{StatusLevel, StatusLogger};

/// Forwards status messages to the host's `tracing` subscriber
///
/// Events use the `logboot::status` target. `tracing` has no fatal level, so
/// fatal messages are emitted as errors with `fatal = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatusLogger;

impl TracingStatusLogger {
    pub fn new() -> Self {
        Self
    }
}

impl StatusLogger for TracingStatusLogger {
    fn log(&self, level: StatusLevel, message: &str) {
        match level {
            StatusLevel::Trace => tracing::trace!(target: "logboot::status", "{}", message),
            StatusLevel::Debug => tracing::debug!(target: "logboot::status", "{}", message),
            StatusLevel::Info => tracing::info!(target: "logboot::status", "{}", message),
            StatusLevel::Warn => tracing::warn!(target: "logboot::status", "{}", message),
            StatusLevel::Error => tracing::error!(target: "logboot::status", "{}", message),
            StatusLevel::Fatal => {
                tracing::error!(target: "logboot::status", fatal = true, "{}", message)
            }
        }
    }
}
