//! In-memory status logger

use parking_lot::Mutex;

use super::traits::{StatusLevel, StatusLogger};

/// One recorded status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub level: StatusLevel,
    pub message: String,
}

/// A status logger that keeps every message in memory
///
/// Mostly useful in tests, to assert that a failure was reported rather
/// than thrown.
#[derive(Debug, Default)]
pub struct MemoryStatusLogger {
    entries: Mutex<Vec<StatusEntry>>,
}

impl MemoryStatusLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn entries(&self) -> Vec<StatusEntry> {
        self.entries.lock().clone()
    }

    /// Messages recorded at exactly this level
    pub fn messages_at(&self, level: StatusLevel) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Whether a message at this level contains `needle`
    pub fn contains(&self, level: StatusLevel, needle: &str) -> bool {
        self.entries
            .lock()
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl StatusLogger for MemoryStatusLogger {
    fn log(&self, level: StatusLevel, message: &str) {
        self.entries.lock().push(StatusEntry {
            level,
            message: message.to_string(),
        });
    }
}
