use crate::core::actions::compute_field::ports::escape_algorithm::EscapeAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::smoothing::smoothed_escape_time;
use crate::core::viewport::ViewportModel;

/// Generalised Mandelbrot iteration `z -> z^power + c`, starting from `z = c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeTimeAlgorithm {
    max_iterations: u32,
    escape_radius_squared: f64,
    power: u32,
    ln_power: f64,
}

impl EscapeTimeAlgorithm {
    #[must_use]
    pub fn new(model: &ViewportModel) -> Self {
        let escape_radius = model.escape_radius();

        Self {
            max_iterations: model.max_iterations(),
            escape_radius_squared: escape_radius * escape_radius,
            power: model.power(),
            ln_power: f64::from(model.power()).ln(),
        }
    }
}

impl EscapeAlgorithm for EscapeTimeAlgorithm {
    fn escape_time(&self, c: Complex) -> f64 {
        let mut z = c;

        for iteration in 0..self.max_iterations {
            z = z.powu(self.power) + c;
            let magnitude_squared = z.magnitude_squared();

            // an escaped point is frozen, so nothing after this iteration can change
            // its value; NaN or infinite magnitudes count as escaped
            if !(magnitude_squared <= self.escape_radius_squared) {
                return smoothed_escape_time(iteration, magnitude_squared, self.ln_power);
            }
        }

        0.0
    }
}
