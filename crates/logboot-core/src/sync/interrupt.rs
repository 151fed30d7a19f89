//! Per-thread interrupt flags
//!
//! Rust threads have no built-in interruption. Every thread gets a lazily
//! created flag; another thread can hold an [`InterruptHandle`] to it and set
//! it, and blocking operations such as
//! [`StartupLock::lock_interruptibly`](super::StartupLock::lock_interruptibly)
//! poll it while they wait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

thread_local! {
    static CURRENT: InterruptHandle = InterruptHandle::new();
}

/// Handle to one thread's interrupt flag
///
/// Handles are cheap to clone and can be sent to other threads.
///
/// # Example
///
/// ```
/// use logboot_core::sync::{interrupt, InterruptHandle};
///
/// let handle = InterruptHandle::current();
/// handle.interrupt();
/// assert!(interrupt::is_interrupted());
///
/// // Clears the flag, like a blocking call that observed the interrupt
/// assert!(interrupt::interrupted());
/// assert!(!interrupt::is_interrupted());
/// ```
#[derive(Clone)]
pub struct InterruptHandle {
    flag: Arc<AtomicBool>,
}

impl InterruptHandle {
    fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle to the calling thread's flag
    pub fn current() -> Self {
        CURRENT.with(|handle| handle.clone())
    }

    /// Interrupt the thread owning this flag
    pub fn interrupt(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check the flag without clearing it
    pub fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear the flag, returning whether it was set
    pub(crate) fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}

impl std::fmt::Debug for InterruptHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterruptHandle")
            .field("is_interrupted", &self.is_interrupted())
            .finish()
    }
}

/// Whether the calling thread has a pending interrupt
pub fn is_interrupted() -> bool {
    CURRENT.with(InterruptHandle::is_interrupted)
}

/// Test and clear the calling thread's interrupt flag
pub fn interrupted() -> bool {
    CURRENT.with(InterruptHandle::take)
}

/// Set the calling thread's interrupt flag
///
/// Used to re-assert an interrupt that a blocking call consumed, so code
/// further up the stack still observes the cancellation.
pub fn interrupt_current() {
    CURRENT.with(InterruptHandle::interrupt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_flag_starts_clear() {
        thread::spawn(|| {
            assert!(!is_interrupted());
            assert!(!interrupted());
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_interrupted_clears_flag() {
        thread::spawn(|| {
            interrupt_current();
            assert!(is_interrupted());
            assert!(interrupted());
            assert!(!is_interrupted());
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_handle_interrupts_other_thread() {
        let (handle_tx, handle_rx) = mpsc::channel();
        let (go_tx, go_rx) = mpsc::channel::<()>();

        let worker = thread::spawn(move || {
            handle_tx.send(InterruptHandle::current()).unwrap();
            go_rx.recv().unwrap();
            is_interrupted()
        });

        let handle = handle_rx.recv().unwrap();
        handle.interrupt();
        go_tx.send(()).unwrap();

        assert!(worker.join().unwrap());
        // The interrupt belongs to the worker, not to us
        assert!(!is_interrupted());
    }

    #[test]
    fn test_flags_are_per_thread() {
        thread::spawn(|| {
            let mine = InterruptHandle::current();
            let other = thread::spawn(InterruptHandle::current).join().unwrap();
            other.interrupt();
            assert!(!mine.is_interrupted());
            assert!(other.is_interrupted());
        })
        .join()
        .unwrap();
    }
}
