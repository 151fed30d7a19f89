//! Reentrant startup lock with interruptible acquisition

use std::marker::PhantomData;
use std::thread::{self, ThreadId};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

use super::interrupt::InterruptHandle;

/// How often a blocked waiter re-checks its interrupt flag
const INTERRUPT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Returned when a thread is interrupted while waiting for a [`StartupLock`]
///
/// The thread's interrupt flag has been consumed by the time this is
/// returned; callers that swallow the error should re-assert it with
/// [`interrupt_current`](super::interrupt::interrupt_current).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Interrupted while waiting for the startup lock")]
pub struct Interrupted;

#[derive(Debug, Default)]
struct Owner {
    thread: Option<ThreadId>,
    holds: usize,
}

/// Lock guarding one-time startup work
///
/// A hosting framework can hold this lock to delay every lazy initialization
/// attempt until it has finished installing components itself. Threads
/// waiting in [`lock_interruptibly`](Self::lock_interruptibly) stay
/// cancellable through their [`InterruptHandle`] while it does so.
///
/// The lock is reentrant: the owning thread may acquire it again, and it is
/// released once every guard has been dropped.
#[derive(Debug, Default)]
pub struct StartupLock {
    owner: Mutex<Owner>,
    released: Condvar,
}

impl StartupLock {
    /// Create an unlocked startup lock
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock, blocking until it is available
    pub fn lock(&self) -> StartupGuard<'_> {
        let me = thread::current().id();
        let mut owner = self.owner.lock();
        while !Self::claim(&mut owner, me) {
            self.released.wait(&mut owner);
        }
        StartupGuard::new(self)
    }

    /// Acquire the lock unless the calling thread is interrupted first
    ///
    /// A pending interrupt is honoured even when the lock is free, and the
    /// flag is cleared when [`Interrupted`] is returned.
    pub fn lock_interruptibly(&self) -> Result<StartupGuard<'_>, Interrupted> {
        let me = thread::current().id();
        let interrupt = InterruptHandle::current();
        let mut owner = self.owner.lock();
        loop {
            if interrupt.take() {
                return Err(Interrupted);
            }
            if Self::claim(&mut owner, me) {
                return Ok(StartupGuard::new(self));
            }
            let _ = self.released.wait_for(&mut owner, INTERRUPT_POLL_INTERVAL);
        }
    }

    /// Acquire the lock only if it is free or already held by this thread
    pub fn try_lock(&self) -> Option<StartupGuard<'_>> {
        let me = thread::current().id();
        let mut owner = self.owner.lock();
        Self::claim(&mut owner, me).then(|| StartupGuard::new(self))
    }

    /// Whether any thread currently holds the lock
    pub fn is_locked(&self) -> bool {
        self.owner.lock().thread.is_some()
    }

    fn claim(owner: &mut Owner, me: ThreadId) -> bool {
        match owner.thread {
            None => {
                owner.thread = Some(me);
                owner.holds = 1;
                true
            }
            Some(current) if current == me => {
                owner.holds += 1;
                true
            }
            Some(_) => false,
        }
    }

    fn release(&self) {
        let mut owner = self.owner.lock();
        owner.holds = owner.holds.saturating_sub(1);
        if owner.holds == 0 {
            owner.thread = None;
            drop(owner);
            self.released.notify_all();
        }
    }
}

/// Held startup lock; released on drop
///
/// Guards are tied to the thread that acquired them.
#[must_use = "the startup lock is released as soon as the guard is dropped"]
pub struct StartupGuard<'a> {
    lock: &'a StartupLock,
    _not_send: PhantomData<*const ()>,
}

impl<'a> StartupGuard<'a> {
    fn new(lock: &'a StartupLock) -> Self {
        Self {
            lock,
            _not_send: PhantomData,
        }
    }
}

impl Drop for StartupGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

impl std::fmt::Debug for StartupGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartupGuard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::interrupt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{mpsc, Arc};

    #[test]
    fn test_lock_and_release() {
        let lock = StartupLock::new();
        assert!(!lock.is_locked());
        {
            let _guard = lock.lock();
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_reentrant() {
        let lock = StartupLock::new();
        let outer = lock.lock();
        let inner = lock.lock_interruptibly().unwrap();
        drop(inner);
        assert!(lock.is_locked());
        drop(outer);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_try_lock_fails_when_held_elsewhere() {
        let lock = Arc::new(StartupLock::new());
        let _guard = lock.lock();

        let other = Arc::clone(&lock);
        let acquired = thread::spawn(move || other.try_lock().is_some())
            .join()
            .unwrap();
        assert!(!acquired);
    }

    #[test]
    fn test_waiter_acquires_after_release() {
        let lock = Arc::new(StartupLock::new());
        let guard = lock.lock();

        let waiter_lock = Arc::clone(&lock);
        let acquired = Arc::new(AtomicBool::new(false));
        let acquired_flag = Arc::clone(&acquired);
        let waiter = thread::spawn(move || {
            let _guard = waiter_lock.lock_interruptibly().unwrap();
            acquired_flag.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(30));
        assert!(!acquired.load(Ordering::SeqCst));
        drop(guard);

        waiter.join().unwrap();
        assert!(acquired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_interrupt_unblocks_waiter() {
        let lock = Arc::new(StartupLock::new());
        let _guard = lock.lock();

        let (handle_tx, handle_rx) = mpsc::channel();
        let waiter_lock = Arc::clone(&lock);
        let waiter = thread::spawn(move || {
            handle_tx.send(InterruptHandle::current()).unwrap();
            let result = waiter_lock.lock_interruptibly().map(|_| ());
            (result, interrupt::is_interrupted())
        });

        let handle = handle_rx.recv().unwrap();
        thread::sleep(Duration::from_millis(20));
        handle.interrupt();

        let (result, still_flagged) = waiter.join().unwrap();
        assert_eq!(result, Err(Interrupted));
        // The flag is consumed by the lock; re-asserting is the caller's job
        assert!(!still_flagged);
        assert!(lock.is_locked());
    }

    #[test]
    fn test_pending_interrupt_wins_over_free_lock() {
        thread::spawn(|| {
            let lock = StartupLock::new();
            interrupt::interrupt_current();
            assert!(lock.lock_interruptibly().is_err());
            assert!(!lock.is_locked());
            assert!(lock.lock_interruptibly().is_ok());
        })
        .join()
        .unwrap();
    }
}
