use rayon::prelude::*;

use crate::core::actions::compute_field::ports::escape_algorithm::EscapeAlgorithm;
use crate::core::actions::compute_field::ports::field_evaluator::{
    EvaluationError, FieldEvaluator,
};
use crate::core::data::complex::Complex;
use crate::core::data::escape_field::EscapeField;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::data::resolution::Resolution;
use crate::core::fractals::escape_time::EscapeTimeAlgorithm;
use crate::core::util::coordinate_mapper::{column_coords, sample_axis};
use crate::core::viewport::ViewportModel;

/// Samples `algorithm` over the grid in parallel, one row per rayon task.
///
/// Column coordinates are computed once and shared by every row; row `r`
/// samples the imaginary coordinate mapped from `r`, so row 0 is `ymin`.
pub fn compute_field_with<Alg>(
    bounds: PlaneRect,
    resolution: Resolution,
    algorithm: &Alg,
) -> Result<EscapeField, EvaluationError>
where
    Alg: EscapeAlgorithm + Sync,
{
    let width = resolution.width();
    let height = resolution.height();
    let xs = column_coords(bounds, resolution);
    let mut values = vec![0.0; resolution.size()];

    values
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| {
            let y = sample_axis(bounds.ymin(), bounds.ymax(), row, height);
            for (value, &x) in out.iter_mut().zip(&xs) {
                *value = algorithm.escape_time(Complex::new(x, y));
            }
        });

    Ok(EscapeField::from_data(resolution, values)?)
}

/// Escape-time field for `model`: shape `height x width`, every value finite.
pub fn compute_field(model: &ViewportModel) -> Result<EscapeField, EvaluationError> {
    let algorithm = EscapeTimeAlgorithm::new(model);
    compute_field_with(model.bounds(), model.resolution(), &algorithm)
}

/// Production [`FieldEvaluator`] backed by [`compute_field`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeTimeKernel;

impl FieldEvaluator for EscapeTimeKernel {
    fn evaluate(&self, model: &ViewportModel) -> Result<EscapeField, EvaluationError> {
        compute_field(model)
    }
}
