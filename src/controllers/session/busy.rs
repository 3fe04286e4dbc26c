use crate::controllers::session::locks::lock;
use crate::controllers::session::ports::BusyObserver;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusyTransitions {
    pub to_busy: u64,
    pub to_idle: u64,
}

#[derive(Debug, Default)]
struct BusyInner {
    busy: bool,
    transitions: BusyTransitions,
}

/// Busy/idle flag for recomputes. At most one [`BusyGuard`] exists at a
/// time, so busy intervals never overlap.
pub struct BusyState {
    inner: Mutex<BusyInner>,
    idle: Condvar,
    observer: Option<Arc<dyn BusyObserver>>,
}

impl BusyState {
    #[must_use]
    pub fn new(observer: Option<Arc<dyn BusyObserver>>) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(BusyInner::default()),
            idle: Condvar::new(),
            observer,
        })
    }

    /// Marks the state busy, or returns `None` if it already is.
    #[must_use]
    pub fn try_acquire(self: &Arc<Self>) -> Option<BusyGuard> {
        let mut inner = lock(&self.inner);

        if inner.busy {
            return None;
        }

        inner.busy = true;
        inner.transitions.to_busy += 1;

        if let Some(observer) = &self.observer {
            observer.on_busy_changed(true);
        }

        Some(BusyGuard {
            state: Arc::clone(self),
        })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        lock(&self.inner).busy
    }

    #[must_use]
    pub fn transitions(&self) -> BusyTransitions {
        lock(&self.inner).transitions
    }

    /// Blocks until idle or until `timeout` passes; returns whether it is idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let inner = lock(&self.inner);
        let (inner, _) = self
            .idle
            .wait_timeout_while(inner, timeout, |inner| inner.busy)
            .unwrap_or_else(PoisonError::into_inner);

        !inner.busy
    }

    fn release(&self) {
        let mut inner = lock(&self.inner);

        inner.busy = false;
        inner.transitions.to_idle += 1;

        if let Some(observer) = &self.observer {
            observer.on_busy_changed(false);
        }

        self.idle.notify_all();
    }
}

/// Scoped busy marker; dropping it (including during unwinding) returns to idle.
pub struct BusyGuard {
    state: Arc<BusyState>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.state.release();
    }
}

impl std::fmt::Debug for BusyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyGuard").finish_non_exhaustive()
    }
}
