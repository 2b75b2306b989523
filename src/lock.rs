//! Advisory operation lock.
//!
//! Blocks redundant user-triggered work while one operation is pending. The
//! lock is an ordinary value: construct one per scope that needs serializing
//! and share it by reference or `Arc`. A [`LockObserver`] lets a UI mirror the
//! lock state (for example by showing a blocking overlay).

use log::{debug, warn};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Errors returned by [`OperationLock::run_exclusive`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LockError {
    #[error("Another operation is in progress, please wait")]
    Busy,
}

/// Notified whenever the lock changes state.
pub trait LockObserver: Send + Sync {
    fn on_locked(&self);
    fn on_unlocked(&self);
}

/// Non-reentrant gate that rejects instead of waiting.
#[derive(Default)]
pub struct OperationLock {
    locked: AtomicBool,
    observer: Option<Arc<dyn LockObserver>>,
}

impl OperationLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: Arc<dyn LockObserver>) -> Self {
        Self {
            locked: AtomicBool::new(false),
            observer: Some(observer),
        }
    }

    /// Takes the lock. Returns `false` if it is already held.
    pub fn acquire(&self) -> bool {
        if self
            .locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        debug!("Operation lock acquired");
        if let Some(observer) = &self.observer {
            observer.on_locked();
        }
        true
    }

    /// Releases the lock. Returns `false` if it was not held.
    pub fn release(&self) -> bool {
        if !self.locked.swap(false, Ordering::AcqRel) {
            return false;
        }
        debug!("Operation lock released");
        if let Some(observer) = &self.observer {
            observer.on_unlocked();
        }
        true
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Releases the lock regardless of who holds it.
    pub fn force_unlock(&self) {
        warn!("Forcing operation lock release");
        self.release();
    }

    /// Takes the lock and returns a guard that releases it on drop.
    pub fn try_lock(&self) -> Option<LockGuard<'_>> {
        self.acquire().then(|| LockGuard { lock: self })
    }

    /// Runs `operation` while holding the lock.
    ///
    /// Rejects immediately with [`LockError::Busy`] if the lock is held. The
    /// lock is released when the operation finishes, including when the
    /// returned future is dropped before completion.
    pub async fn run_exclusive<F>(&self, operation: F) -> Result<F::Output, LockError>
    where
        F: Future,
    {
        let Some(_guard) = self.try_lock() else {
            warn!("Operation rejected: lock is held");
            return Err(LockError::Busy);
        };
        Ok(operation.await)
    }
}

impl std::fmt::Debug for OperationLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationLock")
            .field("locked", &self.is_locked())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Holds an [`OperationLock`] until dropped.
#[derive(Debug)]
pub struct LockGuard<'a> {
    lock: &'a OperationLock,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[derive(Default)]
    struct Counter {
        locked: AtomicUsize,
        unlocked: AtomicUsize,
    }

    impl LockObserver for Counter {
        fn on_locked(&self) {
            self.locked.fetch_add(1, Ordering::SeqCst);
        }

        fn on_unlocked(&self) {
            self.unlocked.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn acquire_and_release_report_transitions() {
        let lock = OperationLock::new();
        assert!(lock.acquire());
        assert!(!lock.acquire());
        assert!(lock.is_locked());
        assert!(lock.release());
        assert!(!lock.release());
        assert!(!lock.is_locked());
    }

    #[test]
    fn guard_releases_on_drop() {
        let lock = OperationLock::new();
        {
            let _guard = lock.try_lock().unwrap();
            assert!(lock.try_lock().is_none());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn observer_sees_each_transition_once() {
        let counter = Arc::new(Counter::default());
        let lock = OperationLock::with_observer(counter.clone());
        assert!(lock.acquire());
        assert!(!lock.acquire());
        lock.force_unlock();
        lock.force_unlock();
        assert_eq!(counter.locked.load(Ordering::SeqCst), 1);
        assert_eq!(counter.unlocked.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn run_exclusive_rejects_while_held() {
        let lock = Arc::new(OperationLock::new());
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let (started_tx, started_rx) = oneshot::channel::<()>();

        let task_lock = lock.clone();
        let handle = tokio::spawn(async move {
            task_lock
                .run_exclusive(async move {
                    started_tx.send(()).unwrap();
                    release_rx.await.unwrap();
                    42
                })
                .await
        });

        started_rx.await.unwrap();
        assert!(lock.is_locked());
        assert_eq!(lock.run_exclusive(async { 0 }).await, Err(LockError::Busy));

        release_tx.send(()).unwrap();
        assert_eq!(handle.await.unwrap(), Ok(42));
        assert!(!lock.is_locked());
    }

    #[tokio::test]
    async fn failed_operation_still_releases() {
        let lock = OperationLock::new();
        let result: Result<Result<(), String>, LockError> = lock
            .run_exclusive(async { Err("upload failed".to_string()) })
            .await;
        assert_eq!(result, Ok(Err("upload failed".to_string())));
        assert!(!lock.is_locked());
    }

    #[tokio::test]
    async fn dropped_operation_releases() {
        let lock = OperationLock::new();
        let timed_out = tokio::time::timeout(
            Duration::from_millis(10),
            lock.run_exclusive(std::future::pending::<()>()),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(!lock.is_locked());
    }
}
