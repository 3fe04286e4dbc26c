use crate::controllers::session::locks::{lock, read, write};
use crate::controllers::session::ports::{ControlSurface, RenderingSurface};
use crate::controllers::session::scheduler::RecomputeScheduler;
use crate::controllers::session::worker::{RecomputeJob, RecomputeTrigger};
use crate::controllers::zoom::ZoomDirection;
use crate::core::actions::compute_field::{EvaluationError, FieldEvaluator};
use crate::core::data::escape_field::{EscapeField, EscapeFieldError};
use crate::core::viewport::{ControlRanges, ControlValues, ViewportModel};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

/// State shared between the session front end and the recompute worker.
///
/// Lock order is `model`, then `scheduler`, then `ranges`; `field` is never
/// held together with any of them.
pub struct SessionState {
    model: Mutex<ViewportModel>,
    scheduler: Mutex<RecomputeScheduler>,
    ranges: Mutex<ControlRanges>,
    field: RwLock<Option<Arc<EscapeField>>>,
    evaluations: AtomicU64,
    failures: AtomicU64,
    evaluator: Arc<dyn FieldEvaluator>,
    rendering: Arc<dyn RenderingSurface>,
    control: Arc<dyn ControlSurface>,
}

impl SessionState {
    pub fn new(
        model: ViewportModel,
        scheduler: RecomputeScheduler,
        ranges: ControlRanges,
        evaluator: Arc<dyn FieldEvaluator>,
        rendering: Arc<dyn RenderingSurface>,
        control: Arc<dyn ControlSurface>,
    ) -> Self {
        Self {
            model: Mutex::new(model),
            scheduler: Mutex::new(scheduler),
            ranges: Mutex::new(ranges),
            field: RwLock::new(None),
            evaluations: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            evaluator,
            rendering,
            control,
        }
    }

    #[must_use]
    pub fn model(&self) -> ViewportModel {
        *lock(&self.model)
    }

    pub(crate) fn model_lock(&self) -> &Mutex<ViewportModel> {
        &self.model
    }

    pub(crate) fn scheduler_lock(&self) -> &Mutex<RecomputeScheduler> {
        &self.scheduler
    }

    pub(crate) fn ranges_lock(&self) -> &Mutex<ControlRanges> {
        &self.ranges
    }

    #[must_use]
    pub fn field(&self) -> Option<Arc<EscapeField>> {
        read(&self.field).clone()
    }

    #[must_use]
    pub fn control_values(&self) -> ControlValues {
        let model = lock(&self.model);
        lock(&self.ranges).values_for(&model)
    }

    #[must_use]
    pub fn completed_evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn failed_evaluations(&self) -> u64 {
        self.failures.load(Ordering::Acquire)
    }

    /// Evaluates the job's candidate and commits it only if the field is
    /// usable. The guard is dropped last, after the field is published.
    pub fn run_job(&self, job: RecomputeJob) {
        let RecomputeJob {
            candidate,
            trigger,
            resync,
            guard,
        } = job;

        log::info!(
            "recompute started ({trigger}): {}x{}, {}",
            candidate.width(),
            candidate.height(),
            candidate.title()
        );

        let start = Instant::now();
        let result = self.evaluate(&candidate);
        let elapsed = start.elapsed();

        match result {
            Ok(field) => {
                self.commit(candidate, field, trigger, resync);
                log::info!("recompute finished ({trigger}) in {elapsed:?}");
            }
            Err(err) => {
                self.failures.fetch_add(1, Ordering::AcqRel);
                log::error!("recompute failed ({trigger}) after {elapsed:?}: {err}");
            }
        }

        drop(guard);
    }

    fn evaluate(&self, candidate: &ViewportModel) -> Result<EscapeField, EvaluationError> {
        let field = panic::catch_unwind(AssertUnwindSafe(|| self.evaluator.evaluate(candidate)))
            .unwrap_or_else(|payload| Err(EvaluationError::Panicked(panic_message(&*payload))))?;

        check_field(&field, candidate)?;

        Ok(field)
    }

    fn commit(
        &self,
        candidate: ViewportModel,
        field: EscapeField,
        trigger: RecomputeTrigger,
        resync: bool,
    ) {
        let field = Arc::new(field);

        let values = {
            let mut model = lock(&self.model);
            *model = candidate;

            // the control now shows the adaptive budget, so a waiting edit must not undo it
            if trigger == RecomputeTrigger::Zoom(ZoomDirection::In)
                && lock(&self.scheduler).override_iterations(candidate.max_iterations())
            {
                log::debug!(
                    "pending parameter change now uses {} iterations",
                    candidate.max_iterations()
                );
            }

            let mut ranges = lock(&self.ranges);
            ranges.widen_iterations(candidate.max_iterations());
            ranges.values_for(&model)
        };

        *write(&self.field) = Some(Arc::clone(&field));
        self.evaluations.fetch_add(1, Ordering::AcqRel);

        let published = panic::catch_unwind(AssertUnwindSafe(|| {
            self.rendering.present(field, candidate.bounds());

            if resync {
                self.control.sync(values);
            }
        }));

        if let Err(payload) = published {
            log::error!(
                "publishing {trigger} result panicked: {}",
                panic_message(&*payload)
            );
        }
    }
}

fn check_field(field: &EscapeField, candidate: &ViewportModel) -> Result<(), EvaluationError> {
    let expected = candidate.resolution();

    if field.resolution() != expected {
        return Err(EvaluationError::ShapeMismatch(
            EscapeFieldError::ShapeMismatch {
                expected_size: expected.size(),
                data_size: field.values().len(),
            },
        ));
    }

    if let Some(index) = field.values().iter().position(|v| !v.is_finite()) {
        return Err(EvaluationError::Kernel(format!(
            "non-finite escape value at index {index}"
        )));
    }

    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "evaluator panicked".to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::controllers::session::busy::BusyState;
    use crate::controllers::session::worker::RecomputeTrigger;
    use crate::core::data::plane_rect::PlaneRect;
    use crate::core::data::resolution::Resolution;
    use crate::core::viewport::ParameterEdit;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    #[derive(Default)]
    pub(crate) struct RecordingSurfaces {
        presented: Mutex<Vec<PlaneRect>>,
        synced: Mutex<Vec<ControlValues>>,
    }

    impl RecordingSurfaces {
        pub(crate) fn presented(&self) -> usize {
            self.presented.lock().unwrap().len()
        }

        pub(crate) fn synced(&self) -> Vec<ControlValues> {
            self.synced.lock().unwrap().clone()
        }
    }

    impl RenderingSurface for RecordingSurfaces {
        fn present(&self, _field: Arc<EscapeField>, bounds: PlaneRect) {
            self.presented.lock().unwrap().push(bounds);
        }
    }

    impl ControlSurface for RecordingSurfaces {
        fn sync(&self, values: ControlValues) {
            self.synced.lock().unwrap().push(values);
        }
    }

    /// Fills every cell with the model's iteration budget.
    pub(crate) struct ConstantEvaluator;

    impl FieldEvaluator for ConstantEvaluator {
        fn evaluate(&self, model: &ViewportModel) -> Result<EscapeField, EvaluationError> {
            let resolution = model.resolution();
            let values = vec![f64::from(model.max_iterations()); resolution.size()];
            Ok(EscapeField::from_data(resolution, values)?)
        }
    }

    struct FixedEvaluator(Result<Vec<f64>, &'static str>, Resolution);

    impl FieldEvaluator for FixedEvaluator {
        fn evaluate(&self, _model: &ViewportModel) -> Result<EscapeField, EvaluationError> {
            match &self.0 {
                Ok(values) => Ok(EscapeField::from_data(self.1, values.clone())?),
                Err(message) => Err(EvaluationError::Kernel((*message).to_string())),
            }
        }
    }

    struct PanickingEvaluator;

    impl FieldEvaluator for PanickingEvaluator {
        fn evaluate(&self, _model: &ViewportModel) -> Result<EscapeField, EvaluationError> {
            panic!("kernel exploded");
        }
    }

    pub(crate) fn small_model() -> ViewportModel {
        let defaults = ViewportModel::default();
        ViewportModel::new(
            defaults.bounds(),
            Resolution::new(4, 3).expect("valid resolution"),
            defaults.max_iterations(),
            defaults.escape_radius(),
            defaults.power(),
        )
        .expect("valid model")
    }

    fn state_with(
        surfaces: &Arc<RecordingSurfaces>,
        evaluator: Arc<dyn FieldEvaluator>,
    ) -> Arc<SessionState> {
        Arc::new(SessionState::new(
            small_model(),
            RecomputeScheduler::new(Duration::from_secs(5)),
            ControlRanges::default(),
            evaluator,
            Arc::clone(surfaces) as Arc<dyn RenderingSurface>,
            Arc::clone(surfaces) as Arc<dyn ControlSurface>,
        ))
    }

    pub(crate) fn test_state(surfaces: &Arc<RecordingSurfaces>) -> Arc<SessionState> {
        state_with(surfaces, Arc::new(ConstantEvaluator))
    }

    fn job(busy: &Arc<BusyState>, candidate: ViewportModel, resync: bool) -> RecomputeJob {
        job_for(busy, candidate, RecomputeTrigger::Parameters, resync)
    }

    fn job_for(
        busy: &Arc<BusyState>,
        candidate: ViewportModel,
        trigger: RecomputeTrigger,
        resync: bool,
    ) -> RecomputeJob {
        RecomputeJob {
            candidate,
            trigger,
            resync,
            guard: busy.try_acquire().expect("idle"),
        }
    }

    /// Panics on the first frame it is shown, then behaves.
    #[derive(Default)]
    struct FragileSurface {
        panicked: AtomicBool,
        presented: Mutex<usize>,
    }

    impl RenderingSurface for FragileSurface {
        fn present(&self, _field: Arc<EscapeField>, _bounds: PlaneRect) {
            if !self.panicked.swap(true, Ordering::SeqCst) {
                panic!("surface lost");
            }
            *self.presented.lock().unwrap() += 1;
        }
    }

    fn deeper(model: ViewportModel, iterations: u32) -> ViewportModel {
        let mut next = model;
        next.set_bounds(PlaneRect::from_bounds(-0.5, 0.5, -0.5, 0.5).expect("valid bounds"));
        next.set_max_iterations(iterations).expect("valid iterations");
        next
    }

    #[test]
    fn test_success_commits_candidate_and_publishes_field() {
        let surfaces = Arc::new(RecordingSurfaces::default());
        let state = test_state(&surfaces);
        let busy = BusyState::new(None);
        let candidate = deeper(state.model(), 700);

        state.run_job(job(&busy, candidate, false));

        assert_eq!(state.model(), candidate);
        let field = state.field().expect("field published");
        assert_eq!(field.get(0, 0), Some(700.0));
        assert_eq!(surfaces.presented(), 1);
        assert!(surfaces.synced().is_empty());
        assert_eq!(state.completed_evaluations(), 1);
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_resync_widens_iteration_range() {
        let surfaces = Arc::new(RecordingSurfaces::default());
        let state = test_state(&surfaces);
        let busy = BusyState::new(None);

        state.run_job(job(&busy, deeper(state.model(), 1486), true));

        let synced = surfaces.synced();
        assert_eq!(synced.len(), 1);
        assert_eq!(synced[0].iterations, 1486);
        assert_eq!(synced[0].ranges.iterations, (50, 1486));
        assert_eq!(state.control_values(), synced[0]);
    }

    #[test]
    fn test_kernel_error_leaves_model_and_field_unchanged() {
        let surfaces = Arc::new(RecordingSurfaces::default());
        let good = test_state(&surfaces);
        let busy = BusyState::new(None);
        good.run_job(job(&busy, good.model(), false));

        let resolution = small_model().resolution();
        let failing = state_with(&surfaces, Arc::new(FixedEvaluator(Err("boom"), resolution)));
        failing.run_job(job(&busy, deeper(failing.model(), 900), false));

        assert_eq!(failing.model(), small_model());
        assert!(failing.field().is_none());
        assert_eq!(failing.failed_evaluations(), 1);
        assert_eq!(failing.completed_evaluations(), 0);
        assert_eq!(surfaces.presented(), 1);
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_panic_is_reported_as_failure_and_releases_busy() {
        let surfaces = Arc::new(RecordingSurfaces::default());
        let state = state_with(&surfaces, Arc::new(PanickingEvaluator));
        let busy = BusyState::new(None);

        state.run_job(job(&busy, state.model(), false));

        assert_eq!(state.failed_evaluations(), 1);
        assert!(state.field().is_none());
        assert_eq!(busy.transitions().to_busy, 1);
        assert_eq!(busy.transitions().to_idle, 1);
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let surfaces = Arc::new(RecordingSurfaces::default());
        let other = Resolution::new(2, 2).expect("valid resolution");
        let state = state_with(&surfaces, Arc::new(FixedEvaluator(Ok(vec![1.0; 4]), other)));
        let busy = BusyState::new(None);

        state.run_job(job(&busy, state.model(), false));

        assert_eq!(state.failed_evaluations(), 1);
        assert!(state.field().is_none());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let surfaces = Arc::new(RecordingSurfaces::default());
        let resolution = small_model().resolution();
        let mut values = vec![1.0; resolution.size()];
        values[5] = f64::NAN;
        let state = state_with(&surfaces, Arc::new(FixedEvaluator(Ok(values), resolution)));
        let busy = BusyState::new(None);

        state.run_job(job(&busy, state.model(), false));

        assert_eq!(state.failed_evaluations(), 1);
        assert_eq!(surfaces.presented(), 0);
    }

    #[test]
    fn test_zoom_in_commit_rewrites_waiting_edit_iterations() {
        let surfaces = Arc::new(RecordingSurfaces::default());
        let state = test_state(&surfaces);
        let busy = BusyState::new(None);
        let armed = ParameterEdit {
            iterations: 300,
            power: 3,
            escape_radius: 2.0,
        };
        let _ = lock(state.scheduler_lock()).schedule(armed, Instant::now());

        let zoom_in = RecomputeTrigger::Zoom(ZoomDirection::In);
        state.run_job(job_for(&busy, deeper(state.model(), 564), zoom_in, true));

        let pending = lock(state.scheduler_lock()).pending().expect("edit still waiting");
        assert_eq!(
            pending.edit,
            ParameterEdit {
                iterations: 564,
                ..armed
            }
        );
    }

    #[test]
    fn test_other_commits_leave_waiting_edit_alone() {
        let surfaces = Arc::new(RecordingSurfaces::default());
        let state = test_state(&surfaces);
        let busy = BusyState::new(None);
        let armed = ParameterEdit {
            iterations: 300,
            power: 3,
            escape_radius: 2.0,
        };
        let _ = lock(state.scheduler_lock()).schedule(armed, Instant::now());

        let zoom_out = RecomputeTrigger::Zoom(ZoomDirection::Out);
        state.run_job(job_for(&busy, deeper(state.model(), 564), zoom_out, false));

        let pending = lock(state.scheduler_lock()).pending().expect("edit still waiting");
        assert_eq!(pending.edit, armed);
    }

    #[test]
    fn test_panicking_surface_does_not_escape_the_job() {
        let surfaces = Arc::new(RecordingSurfaces::default());
        let fragile = Arc::new(FragileSurface::default());
        let state = SessionState::new(
            small_model(),
            RecomputeScheduler::new(Duration::from_secs(5)),
            ControlRanges::default(),
            Arc::new(ConstantEvaluator),
            Arc::clone(&fragile) as Arc<dyn RenderingSurface>,
            Arc::clone(&surfaces) as Arc<dyn ControlSurface>,
        );
        let busy = BusyState::new(None);

        state.run_job(job(&busy, state.model(), false));
        state.run_job(job(&busy, state.model(), false));

        assert!(!busy.is_busy());
        assert_eq!(busy.transitions().to_idle, 2);
        assert_eq!(state.completed_evaluations(), 2);
        assert_eq!(*fragile.presented.lock().unwrap(), 1);
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(&*payload), "static message");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(&*payload), "owned message");

        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(&*payload), "evaluator panicked");
    }
}
