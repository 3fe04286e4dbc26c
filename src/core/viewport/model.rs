use crate::core::data::complex::Complex;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::data::resolution::Resolution;
use crate::core::viewport::errors::ViewportError;

pub const MIN_MAX_ITERATIONS: u32 = 50;
pub const MAX_MAX_ITERATIONS: u32 = 2000;
pub const MIN_ESCAPE_RADIUS: f64 = 1.0;
pub const MAX_ESCAPE_RADIUS: f64 = 10.0;
pub const MIN_POWER: u32 = 2;
pub const MAX_POWER: u32 = 5;

const DEFAULT_MAX_ITERATIONS: u32 = 300;
const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;
const DEFAULT_POWER: u32 = 2;
const DEFAULT_WIDTH: usize = 1920;
const DEFAULT_HEIGHT: usize = 1080;

pub(crate) fn default_bounds() -> PlaneRect {
    PlaneRect::new(Complex::new(-2.0, -1.4), Complex::new(0.8, 1.4))
        .expect("default plane bounds are valid")
}

/// Numeric state of the view: plane bounds, output resolution and the
/// iteration parameters. Every constructor and setter keeps the invariants,
/// so a model held by the session is always safe to evaluate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportModel {
    bounds: PlaneRect,
    resolution: Resolution,
    max_iterations: u32,
    escape_radius: f64,
    power: u32,
}

impl ViewportModel {
    pub fn new(
        bounds: PlaneRect,
        resolution: Resolution,
        max_iterations: u32,
        escape_radius: f64,
        power: u32,
    ) -> Result<Self, ViewportError> {
        validate_max_iterations(max_iterations)?;
        validate_escape_radius(escape_radius)?;
        validate_power(power)?;

        Ok(Self {
            bounds,
            resolution,
            max_iterations,
            escape_radius,
            power,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> PlaneRect {
        self.bounds
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.resolution.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.resolution.height()
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }

    #[must_use]
    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn set_bounds(&mut self, bounds: PlaneRect) {
        self.bounds = bounds;
    }

    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), ViewportError> {
        validate_max_iterations(max_iterations)?;
        self.max_iterations = max_iterations;
        Ok(())
    }

    pub fn set_escape_radius(&mut self, escape_radius: f64) -> Result<(), ViewportError> {
        validate_escape_radius(escape_radius)?;
        self.escape_radius = escape_radius;
        Ok(())
    }

    pub fn set_power(&mut self, power: u32) -> Result<(), ViewportError> {
        validate_power(power)?;
        self.power = power;
        Ok(())
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "Mandelbrot set (Power: {}, Iter: {})",
            self.power, self.max_iterations
        )
    }
}

impl Default for ViewportModel {
    fn default() -> Self {
        Self {
            bounds: default_bounds(),
            resolution: Resolution::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
                .expect("default resolution is valid"),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            power: DEFAULT_POWER,
        }
    }
}

fn validate_max_iterations(max_iterations: u32) -> Result<(), ViewportError> {
    if !(MIN_MAX_ITERATIONS..=MAX_MAX_ITERATIONS).contains(&max_iterations) {
        return Err(ViewportError::MaxIterationsOutOfRange {
            max_iterations,
            min: MIN_MAX_ITERATIONS,
            max: MAX_MAX_ITERATIONS,
        });
    }

    Ok(())
}

fn validate_escape_radius(escape_radius: f64) -> Result<(), ViewportError> {
    // NaN fails the range check
    if !(MIN_ESCAPE_RADIUS..=MAX_ESCAPE_RADIUS).contains(&escape_radius) {
        return Err(ViewportError::EscapeRadiusOutOfRange {
            escape_radius,
            min: MIN_ESCAPE_RADIUS,
            max: MAX_ESCAPE_RADIUS,
        });
    }

    Ok(())
}

fn validate_power(power: u32) -> Result<(), ViewportError> {
    if !(MIN_POWER..=MAX_POWER).contains(&power) {
        return Err(ViewportError::PowerOutOfRange {
            power,
            min: MIN_POWER,
            max: MAX_POWER,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_initial_framing() {
        let model = ViewportModel::default();

        assert_eq!(model.bounds().xmin(), -2.0);
        assert_eq!(model.bounds().xmax(), 0.8);
        assert_eq!(model.bounds().ymin(), -1.4);
        assert_eq!(model.bounds().ymax(), 1.4);
        assert_eq!(model.width(), 1920);
        assert_eq!(model.height(), 1080);
        assert_eq!(model.max_iterations(), 300);
        assert_eq!(model.escape_radius(), 2.0);
        assert_eq!(model.power(), 2);
    }

    #[test]
    fn test_new_rejects_out_of_range_iterations() {
        let result = ViewportModel::new(
            default_bounds(),
            Resolution::new(4, 4).unwrap(),
            49,
            2.0,
            2,
        );

        assert_eq!(
            result,
            Err(ViewportError::MaxIterationsOutOfRange {
                max_iterations: 49,
                min: 50,
                max: 2000
            })
        );
    }

    #[test]
    fn test_setters_enforce_invariants_and_leave_model_unchanged() {
        let mut model = ViewportModel::default();

        assert!(model.set_max_iterations(2001).is_err());
        assert!(model.set_escape_radius(0.5).is_err());
        assert!(model.set_escape_radius(f64::NAN).is_err());
        assert!(model.set_power(6).is_err());
        assert!(model.set_power(1).is_err());

        assert_eq!(model, ViewportModel::default());
    }

    #[test]
    fn test_setters_accept_range_limits() {
        let mut model = ViewportModel::default();

        model.set_max_iterations(2000).unwrap();
        model.set_escape_radius(1.0).unwrap();
        model.set_power(5).unwrap();

        assert_eq!(model.max_iterations(), 2000);
        assert_eq!(model.escape_radius(), 1.0);
        assert_eq!(model.power(), 5);
    }

    #[test]
    fn test_title_reports_power_and_iterations() {
        assert_eq!(
            ViewportModel::default().title(),
            "Mandelbrot set (Power: 2, Iter: 300)"
        );
    }
}
