use crate::controllers::zoom::iteration_budget::adaptive_max_iterations;
use crate::controllers::zoom::policy::ZoomPolicy;
use crate::controllers::zoom::types::{ZoomDirection, ZoomOutcome, ZoomRejection, ZoomRequest};
use crate::core::data::complex::Complex;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::viewport::ViewportModel;

/// Interprets pointer events into viewport transitions.
///
/// The controller never owns the model: every transition is computed from
/// the snapshot passed in and returned to the caller to commit.
#[derive(Debug)]
pub struct ZoomController {
    policy: ZoomPolicy,
    preview: Option<PlaneRect>,
}

impl ZoomController {
    #[must_use]
    pub fn new(policy: ZoomPolicy) -> Self {
        Self {
            policy,
            preview: None,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &ZoomPolicy {
        &self.policy
    }

    #[must_use]
    pub fn preview(&self) -> Option<PlaneRect> {
        self.preview
    }

    /// Recomputes the hover preview. `None` (or a point outside the view)
    /// means the pointer left the plot and drops any previous preview.
    pub fn on_pointer_move(
        &mut self,
        point: Option<Complex>,
        model: &ViewportModel,
    ) -> Option<PlaneRect> {
        let bounds = model.bounds();

        self.preview = point
            .filter(|p| bounds.contains_point(*p))
            .and_then(|p| {
                PlaneRect::centered_on(
                    p,
                    bounds.width() * self.policy.zoom_factor,
                    bounds.height() * self.policy.zoom_factor,
                )
                .ok()
            });

        self.preview
    }

    pub fn on_pointer_leave(&mut self) {
        self.preview = None;
    }

    /// Evaluates a click against `model`. Rejections leave everything as it was,
    /// apart from the preview which any click discards.
    pub fn on_click(&mut self, request: ZoomRequest, model: &ViewportModel) -> ZoomOutcome {
        self.preview = None;

        let bounds = model.bounds();

        if !bounds.contains_point(request.point) {
            return ZoomOutcome::Rejected(ZoomRejection::OutsideView);
        }

        let factor = match request.direction {
            ZoomDirection::In => self.policy.zoom_factor,
            ZoomDirection::Out => self.policy.zoom_out_factor(),
        };

        let current_width = bounds.width();
        let current_height = bounds.height();

        if request.direction == ZoomDirection::Out
            && (current_width / factor > self.policy.reference_width
                || current_height / factor > self.policy.reference_width)
        {
            return ZoomOutcome::Rejected(ZoomRejection::ZoomOutLimit);
        }

        let new_width = current_width * factor;
        let new_height = current_height * factor;

        if new_width < self.policy.min_size || new_height < self.policy.min_size {
            return ZoomOutcome::Rejected(ZoomRejection::BelowMinimumSize);
        }

        let Ok(new_bounds) = PlaneRect::centered_on(request.point, new_width, new_height) else {
            // the half-widths vanished against the center's magnitude
            return ZoomOutcome::Rejected(ZoomRejection::BelowMinimumSize);
        };

        let mut next = *model;
        next.set_bounds(new_bounds);

        if request.direction == ZoomDirection::In {
            let budget = adaptive_max_iterations(new_width, &self.policy);
            if next.set_max_iterations(budget).is_err() {
                return ZoomOutcome::Rejected(ZoomRejection::BelowMinimumSize);
            }
        }

        ZoomOutcome::Committed {
            model: next,
            direction: request.direction,
        }
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomPolicy::default())
    }
}
