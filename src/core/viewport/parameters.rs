use crate::core::viewport::errors::ViewportError;
use crate::core::viewport::model::{MAX_MAX_ITERATIONS, ViewportModel};

const ITERATIONS_MIN: u32 = 50;
const ITERATIONS_MAX: u32 = 1000;
const ITERATIONS_STEP: u32 = 50;
const POWER_MIN: u32 = 2;
const POWER_MAX: u32 = 5;
const ESCAPE_RADIUS_MIN: f64 = 1.0;
const ESCAPE_RADIUS_MAX: f64 = 10.0;
const ESCAPE_RADIUS_STEP: f64 = 0.5;

/// Values emitted by the control surface when the user edits a parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParameterEdit {
    pub iterations: u32,
    pub power: u32,
    pub escape_radius: f64,
}

impl ParameterEdit {
    #[must_use]
    pub fn from_model(model: &ViewportModel) -> Self {
        Self {
            iterations: model.max_iterations(),
            power: model.power(),
            escape_radius: model.escape_radius(),
        }
    }

    /// Copies the edited parameters onto `model`, keeping its bounds.
    pub fn apply_to(&self, model: &ViewportModel) -> Result<ViewportModel, ViewportError> {
        let mut next = *model;
        next.set_max_iterations(self.iterations)?;
        next.set_power(self.power)?;
        next.set_escape_radius(self.escape_radius)?;
        Ok(next)
    }
}

/// What the control surface should display after a resync.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ControlValues {
    pub iterations: u32,
    pub power: u32,
    pub escape_radius: f64,
    pub ranges: ControlRanges,
}

/// Declared ranges of the control surface.
///
/// The adaptive iteration budget may exceed the declared iteration maximum;
/// `widen_iterations` stretches the range so the control can still show it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ControlRanges {
    pub iterations: (u32, u32),
    pub iterations_step: u32,
    pub power: (u32, u32),
    pub escape_radius: (f64, f64),
    pub escape_radius_step: f64,
}

impl Default for ControlRanges {
    fn default() -> Self {
        Self {
            iterations: (ITERATIONS_MIN, ITERATIONS_MAX),
            iterations_step: ITERATIONS_STEP,
            power: (POWER_MIN, POWER_MAX),
            escape_radius: (ESCAPE_RADIUS_MIN, ESCAPE_RADIUS_MAX),
            escape_radius_step: ESCAPE_RADIUS_STEP,
        }
    }
}

impl ControlRanges {
    pub fn widen_iterations(&mut self, iterations: u32) {
        let ceiling = iterations.min(MAX_MAX_ITERATIONS);
        if ceiling > self.iterations.1 {
            self.iterations.1 = ceiling;
        }
    }

    /// Clamps a manual edit into the current ranges. NaN radii fall back to the lower bound.
    #[must_use]
    pub fn clamp(&self, edit: ParameterEdit) -> ParameterEdit {
        let (radius_lo, radius_hi) = self.escape_radius;
        let escape_radius = if edit.escape_radius.is_nan() {
            radius_lo
        } else {
            edit.escape_radius.clamp(radius_lo, radius_hi)
        };

        ParameterEdit {
            iterations: edit.iterations.clamp(self.iterations.0, self.iterations.1),
            power: edit.power.clamp(self.power.0, self.power.1),
            escape_radius,
        }
    }

    #[must_use]
    pub fn values_for(&self, model: &ViewportModel) -> ControlValues {
        ControlValues {
            iterations: model.max_iterations(),
            power: model.power(),
            escape_radius: model.escape_radius(),
            ranges: *self,
        }
    }
}
