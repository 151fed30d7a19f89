//! Synchronization primitives for one-time startup work
//!
//! - [`interrupt`]: per-thread interrupt flags that other threads can set
//! - [`StartupLock`]: reentrant lock whose waiters can be interrupted

pub mod interrupt;
mod startup_lock;

pub use interrupt::InterruptHandle;
pub use startup_lock::{Interrupted, StartupGuard, StartupLock};
