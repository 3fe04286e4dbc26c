use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlaneRectError {
    InvalidSize { width: f64, height: f64 },
    NonFinite,
}

impl fmt::Display for PlaneRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "plane rect size must be positive: {}x{}", width, height)
            }
            Self::NonFinite => write!(f, "plane rect bounds must be finite"),
        }
    }
}

impl Error for PlaneRectError {}

/// Axis-aligned rectangle of the complex plane, `min` is `(xmin, ymin)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneRect {
    min: Complex,
    max: Complex,
}

impl PlaneRect {
    pub fn new(min: Complex, max: Complex) -> Result<Self, PlaneRectError> {
        let finite = [min.real, min.imag, max.real, max.imag]
            .iter()
            .all(|v| v.is_finite());

        if !finite {
            return Err(PlaneRectError::NonFinite);
        }

        let width = max.real - min.real;
        let height = max.imag - min.imag;

        if width <= 0.0 || height <= 0.0 {
            return Err(PlaneRectError::InvalidSize { width, height });
        }

        Ok(Self { min, max })
    }

    pub fn from_bounds(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, PlaneRectError> {
        Self::new(Complex::new(xmin, ymin), Complex::new(xmax, ymax))
    }

    pub fn centered_on(center: Complex, width: f64, height: f64) -> Result<Self, PlaneRectError> {
        Self::from_bounds(
            center.real - width / 2.0,
            center.real + width / 2.0,
            center.imag - height / 2.0,
            center.imag + height / 2.0,
        )
    }

    #[must_use]
    pub fn xmin(&self) -> f64 {
        self.min.real
    }

    #[must_use]
    pub fn xmax(&self) -> f64 {
        self.max.real
    }

    #[must_use]
    pub fn ymin(&self) -> f64 {
        self.min.imag
    }

    #[must_use]
    pub fn ymax(&self) -> f64 {
        self.max.imag
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.real - self.min.real
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.imag - self.min.imag
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        Complex::new(
            (self.min.real + self.max.real) / 2.0,
            (self.min.imag + self.max.imag) / 2.0,
        )
    }

    #[must_use]
    pub fn contains_point(&self, point: Complex) -> bool {
        self.min.real <= point.real
            && self.min.imag <= point.imag
            && self.max.real >= point.real
            && self.max.imag >= point.imag
    }
}
