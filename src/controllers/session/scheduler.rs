use crate::core::viewport::ParameterEdit;
use std::time::{Duration, Instant};

/// The single outstanding debounce timer. The edit is applied to whatever
/// model is current when the timer fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRecompute {
    pub fire_at: Instant,
    pub edit: ParameterEdit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleAction {
    Armed { fire_at: Instant },
    Superseded { fire_at: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulerPoll {
    NothingPending,
    Waiting { fire_at: Instant },
    Due(PendingRecompute),
}

/// Single-slot debouncer for parameter edits. A new edit replaces the
/// pending one and restarts the delay; time comes in through `now`.
#[derive(Debug)]
pub struct RecomputeScheduler {
    debounce: Duration,
    pending: Option<PendingRecompute>,
}

impl RecomputeScheduler {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: None,
        }
    }

    pub fn schedule(&mut self, edit: ParameterEdit, now: Instant) -> ScheduleAction {
        let fire_at = now + self.debounce;
        let previous = self.pending.replace(PendingRecompute { fire_at, edit });

        match previous {
            Some(_) => ScheduleAction::Superseded { fire_at },
            None => ScheduleAction::Armed { fire_at },
        }
    }

    /// Reports whether the pending edit is due without consuming it.
    #[must_use]
    pub fn poll(&self, now: Instant) -> SchedulerPoll {
        match self.pending {
            None => SchedulerPoll::NothingPending,
            Some(pending) if now >= pending.fire_at => SchedulerPoll::Due(pending),
            Some(pending) => SchedulerPoll::Waiting {
                fire_at: pending.fire_at,
            },
        }
    }

    pub fn take(&mut self) -> Option<PendingRecompute> {
        self.pending.take()
    }

    /// Points the pending edit at `iterations` without moving its fire time.
    /// Used when the iteration budget is overridden while an edit waits.
    pub fn override_iterations(&mut self, iterations: u32) -> bool {
        match &mut self.pending {
            Some(pending) => {
                pending.edit.iterations = iterations;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingRecompute> {
        self.pending
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }
}
