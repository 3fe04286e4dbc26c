use crate::controllers::session::busy::{BusyState, BusyTransitions};
use crate::controllers::session::clock::{Clock, SystemClock};
use crate::controllers::session::config::SessionConfig;
use crate::controllers::session::indicator::BusyIndicator;
use crate::controllers::session::locks::lock;
use crate::controllers::session::ports::{
    BusyObserver, ControlSurface, RenderingSurface, StatusSink,
};
use crate::controllers::session::scheduler::{RecomputeScheduler, ScheduleAction, SchedulerPoll};
use crate::controllers::session::state::SessionState;
use crate::controllers::session::ticker::Ticker;
use crate::controllers::session::worker::{RecomputeJob, RecomputeTrigger, RecomputeWorker};
use crate::controllers::zoom::{
    PointerButton, ZoomController, ZoomDirection, ZoomOutcome, ZoomRejection, ZoomRequest,
};
use crate::core::actions::compute_field::{EscapeTimeKernel, FieldEvaluator};
use crate::core::data::complex::Complex;
use crate::core::data::escape_field::EscapeField;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::viewport::{ControlValues, ParameterEdit, ViewportModel};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Collaborators the session reports to.
#[derive(Clone)]
pub struct SessionPorts {
    pub rendering: Arc<dyn RenderingSurface>,
    pub control: Arc<dyn ControlSurface>,
    pub busy_observer: Option<Arc<dyn BusyObserver>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    /// A parameter edit is waiting out its debounce delay.
    Waiting { fire_at: Instant },
    Computing,
}

/// Result of one pass over the debounce slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Idle,
    Waiting { fire_at: Instant },
    /// The timer is due but a recompute is running; it stays pending.
    Deferred,
    Dispatched,
    /// The edit could not be applied to the current model and was dropped.
    Discarded,
}

/// One viewing session: the current model, the zoom state machine, the
/// debounce slot and the recompute worker.
///
/// Every entry point takes `&self`, so a session can be shared across the
/// input thread and the timer drivers behind an `Arc`.
pub struct Session {
    state: Arc<SessionState>,
    busy: Arc<BusyState>,
    zoom: Mutex<ZoomController>,
    clock: Arc<dyn Clock>,
    config: SessionConfig,
    worker: RecomputeWorker,
}

impl Session {
    pub fn new(config: SessionConfig, ports: SessionPorts) -> Self {
        Self::with_parts(
            config,
            ports,
            Arc::new(EscapeTimeKernel),
            Arc::new(SystemClock),
        )
    }

    pub fn with_parts(
        config: SessionConfig,
        ports: SessionPorts,
        evaluator: Arc<dyn FieldEvaluator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let state = Arc::new(SessionState::new(
            config.viewport,
            RecomputeScheduler::new(config.debounce),
            config.controls,
            evaluator,
            ports.rendering,
            ports.control,
        ));

        let worker = RecomputeWorker::spawn(Arc::clone(&state));

        Self {
            state,
            busy: BusyState::new(ports.busy_observer),
            zoom: Mutex::new(ZoomController::new(config.zoom)),
            clock,
            config,
            worker,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The last committed model.
    #[must_use]
    pub fn model(&self) -> ViewportModel {
        self.state.model()
    }

    /// The last successfully evaluated field, if any.
    #[must_use]
    pub fn field(&self) -> Option<Arc<EscapeField>> {
        self.state.field()
    }

    #[must_use]
    pub fn control_values(&self) -> ControlValues {
        self.state.control_values()
    }

    #[must_use]
    pub fn preview(&self) -> Option<PlaneRect> {
        lock(&self.zoom).preview()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        // a due edit is taken from the slot only after busy is set, both under this lock
        let scheduler = lock(self.state.scheduler_lock());

        if self.busy.is_busy() {
            return SessionStatus::Computing;
        }

        match scheduler.pending() {
            Some(pending) => SessionStatus::Waiting {
                fire_at: pending.fire_at,
            },
            None => SessionStatus::Idle,
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    #[must_use]
    pub fn busy_transitions(&self) -> BusyTransitions {
        self.busy.transitions()
    }

    #[must_use]
    pub fn completed_evaluations(&self) -> u64 {
        self.state.completed_evaluations()
    }

    #[must_use]
    pub fn failed_evaluations(&self) -> u64 {
        self.state.failed_evaluations()
    }

    /// Recomputes the current model as is. Returns `false` if a recompute is
    /// already running.
    pub fn refresh(&self) -> bool {
        let model = lock(self.state.model_lock());

        let Some(guard) = self.busy.try_acquire() else {
            log::debug!("refresh ignored: recompute in progress");
            return false;
        };

        self.worker.submit(RecomputeJob {
            candidate: *model,
            trigger: RecomputeTrigger::Initial,
            resync: false,
            guard,
        });

        true
    }

    /// `None` means the pointer left the plot.
    pub fn on_pointer_move(&self, point: Option<Complex>) -> Option<PlaneRect> {
        let model = self.model();
        lock(&self.zoom).on_pointer_move(point, &model)
    }

    pub fn on_pointer_leave(&self) {
        lock(&self.zoom).on_pointer_leave();
    }

    /// Applies a click at `point`. A committed zoom is dispatched to the
    /// worker at once; the model changes when the evaluation succeeds.
    pub fn on_click(&self, point: Complex, button: PointerButton) -> ZoomOutcome {
        let model = lock(self.state.model_lock());
        let mut zoom = lock(&self.zoom);

        let Some(direction) = button.zoom_direction() else {
            zoom.on_pointer_leave();
            log::debug!("click ignored: unsupported button {button:?}");
            return ZoomOutcome::Rejected(ZoomRejection::UnsupportedButton);
        };

        let outcome = zoom.on_click(ZoomRequest { point, direction }, &model);

        let ZoomOutcome::Committed { model: candidate, .. } = outcome else {
            log::debug!("{direction:?} click at {point:?} rejected: {outcome:?}");
            return outcome;
        };

        let Some(guard) = self.busy.try_acquire() else {
            log::debug!("{direction:?} click at {point:?} rejected: recompute in progress");
            return ZoomOutcome::Rejected(ZoomRejection::Busy);
        };

        self.worker.submit(RecomputeJob {
            candidate,
            trigger: RecomputeTrigger::Zoom(direction),
            resync: direction == ZoomDirection::In,
            guard,
        });

        outcome
    }

    /// Records a manual edit; it is applied once the debounce delay passes
    /// without another edit.
    pub fn on_parameter_change(&self, edit: ParameterEdit) -> ScheduleAction {
        let action = lock(self.state.scheduler_lock()).schedule(edit, self.clock.now());

        match action {
            ScheduleAction::Armed { .. } => log::debug!("parameter change armed: {edit:?}"),
            ScheduleAction::Superseded { .. } => {
                log::debug!("parameter change superseded pending edit: {edit:?}");
            }
        }

        action
    }

    /// Fires the debounced edit if it is due and the session is idle.
    pub fn poll_timers(&self) -> PollOutcome {
        let now = self.clock.now();
        let model = lock(self.state.model_lock());
        let mut scheduler = lock(self.state.scheduler_lock());

        let pending = match scheduler.poll(now) {
            SchedulerPoll::NothingPending => return PollOutcome::Idle,
            SchedulerPoll::Waiting { fire_at } => return PollOutcome::Waiting { fire_at },
            SchedulerPoll::Due(pending) => pending,
        };

        if self.busy.is_busy() {
            log::debug!("parameter change due but recompute in progress; deferring");
            return PollOutcome::Deferred;
        }

        let edit = pending.edit;
        let clamped = lock(self.state.ranges_lock()).clamp(edit);

        let candidate = match clamped.apply_to(&model) {
            Ok(candidate) => candidate,
            Err(err) => {
                let _ = scheduler.take();
                log::warn!("parameter change {edit:?} discarded: {err}");
                return PollOutcome::Discarded;
            }
        };

        let Some(guard) = self.busy.try_acquire() else {
            return PollOutcome::Deferred;
        };

        let _ = scheduler.take();

        self.worker.submit(RecomputeJob {
            candidate,
            trigger: RecomputeTrigger::Parameters,
            resync: clamped != edit,
            guard,
        });

        PollOutcome::Dispatched
    }

    /// Blocks until no recompute is running; returns `false` on timeout.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        self.busy.wait_idle(timeout)
    }

    /// Polls the debounce slot every `timer_interval` until the session is
    /// dropped or the ticker is stopped.
    pub fn spawn_timer_driver(self: &Arc<Self>) -> Ticker {
        let session = Arc::downgrade(self);

        Ticker::spawn(self.config.timer_interval, move || {
            let Some(session) = session.upgrade() else {
                return false;
            };
            let _ = session.poll_timers();
            true
        })
    }

    /// Drives the busy spinner on `sink` every `indicator_interval`.
    pub fn spawn_busy_indicator(self: &Arc<Self>, sink: Arc<dyn StatusSink>) -> Ticker {
        let busy = Arc::clone(&self.busy);
        let mut indicator = BusyIndicator::new();

        Ticker::spawn(self.config.indicator_interval, move || {
            indicator.tick(busy.is_busy(), sink.as_ref());
            true
        })
    }

    /// Stops the worker. A recompute already running completes first.
    pub fn shutdown(&self) {
        self.worker.shutdown();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
