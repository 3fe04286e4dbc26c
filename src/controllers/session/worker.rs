use crate::controllers::session::busy::BusyGuard;
use crate::controllers::session::locks::lock;
use crate::controllers::session::state::SessionState;
use crate::controllers::zoom::ZoomDirection;
use crate::core::viewport::ViewportModel;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeTrigger {
    Initial,
    Zoom(ZoomDirection),
    Parameters,
}

impl fmt::Display for RecomputeTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial render"),
            Self::Zoom(ZoomDirection::In) => write!(f, "zoom in"),
            Self::Zoom(ZoomDirection::Out) => write!(f, "zoom out"),
            Self::Parameters => write!(f, "parameter change"),
        }
    }
}

/// One recompute. Holding the guard is what makes the session busy; it is
/// released when the job is dropped, whatever the outcome.
#[derive(Debug)]
pub struct RecomputeJob {
    pub candidate: ViewportModel,
    pub trigger: RecomputeTrigger,
    /// Push the committed parameters back to the control surface.
    pub resync: bool,
    pub guard: BusyGuard,
}

struct SharedSlot {
    job: Mutex<Option<RecomputeJob>>,
    wake: Condvar,
    shutdown: AtomicBool,
}

/// Background thread that runs recompute jobs one at a time.
pub struct RecomputeWorker {
    shared: Arc<SharedSlot>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RecomputeWorker {
    pub fn spawn(state: Arc<SessionState>) -> Self {
        let shared = Arc::new(SharedSlot {
            job: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
        });

        let worker_shared = Arc::clone(&shared);

        let handle = thread::spawn(move || {
            Self::worker_loop(&worker_shared, &state);
        });

        Self {
            shared,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Hands `job` to the worker. After shutdown the job is dropped, which
    /// releases its busy guard.
    pub fn submit(&self, job: RecomputeJob) {
        {
            let mut slot = lock(&self.shared.job);

            if self.shared.shutdown.load(Ordering::Acquire) {
                log::warn!("recompute worker is shut down; dropping {} job", job.trigger);
                return;
            }

            if let Some(previous) = slot.replace(job) {
                // the busy guard makes this unreachable; keep the newest anyway
                log::warn!("replaced unstarted {} job", previous.trigger);
            }
        }

        self.shared.wake.notify_one();
    }

    pub fn shutdown(&self) {
        {
            let _slot = lock(&self.shared.job);
            self.shared.shutdown.store(true, Ordering::Release);
        }
        self.shared.wake.notify_one();

        let handle = lock(&self.handle).take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }

        // a job the worker never picked up still has to release busy
        drop(lock(&self.shared.job).take());
    }

    fn worker_loop(shared: &SharedSlot, state: &SessionState) {
        loop {
            let job = {
                let mut slot = lock(&shared.job);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(job) = slot.take() {
                        break job;
                    }

                    slot = shared
                        .wake
                        .wait(slot)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            state.run_job(job);
        }
    }
}

impl Drop for RecomputeWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
