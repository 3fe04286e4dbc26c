use crate::controllers::session::locks::lock;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// Periodic background callback. The callback returns `false` to end the
/// ticker on its own; otherwise it runs until [`Ticker::stop`] or drop.
pub struct Ticker {
    signal: Arc<StopSignal>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let signal = Arc::new(StopSignal {
            stopped: Mutex::new(false),
            wake: Condvar::new(),
        });

        let thread_signal = Arc::clone(&signal);

        let handle = thread::spawn(move || {
            loop {
                let stopped = lock(&thread_signal.stopped);
                let (stopped, _) = thread_signal
                    .wake
                    .wait_timeout_while(stopped, interval, |stopped| !*stopped)
                    .unwrap_or_else(PoisonError::into_inner);

                if *stopped {
                    return;
                }
                drop(stopped);

                if !tick() {
                    return;
                }
            }
        });

        Self {
            signal,
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        *lock(&self.signal.stopped) = true;
        self.signal.wake.notify_all();

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
