//! Status reporting for the bootstrap itself
//!
//! Failures during discovery and resolution are reported here instead of
//! being returned to the application.

mod traits;
mod noop;
mod console;
mod memory;
mod tracing_logger;

pub use traits::{SharedStatusLogger, StatusLevel, StatusLogger, StatusLoggerExt};
pub use noop::NoOpStatusLogger;
pub use console::{ConsoleStatusLogger, STATUS_LEVEL_ENV};
pub use memory::{MemoryStatusLogger, StatusEntry};
pub use tracing_logger::TracingStatusLogger;
