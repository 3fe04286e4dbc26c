use crate::controllers::zoom::policy::ZoomPolicy;
use crate::core::viewport::model::MIN_MAX_ITERATIONS;

/// Iteration budget after a zoom-in to a view `new_width` plane units wide:
/// `min(max, round(base * log2(reference_width / new_width + 1)))`.
#[must_use]
pub fn adaptive_max_iterations(new_width: f64, policy: &ZoomPolicy) -> u32 {
    let zoom_level = policy.reference_width / new_width;
    let budget = (policy.base_iterations * (zoom_level + 1.0).log2()).round();

    if !budget.is_finite() {
        return policy.max_iterations;
    }

    (budget.max(0.0) as u32).clamp(MIN_MAX_ITERATIONS, policy.max_iterations)
}
