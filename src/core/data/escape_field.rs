use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeFieldError {
    ShapeMismatch {
        expected_size: usize,
        data_size: usize,
    },
}

impl fmt::Display for EscapeFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                expected_size,
                data_size,
            } => {
                write!(
                    f,
                    "escape field expects {} values but got {}",
                    expected_size, data_size
                )
            }
        }
    }
}

impl Error for EscapeFieldError {}

/// Row-major `height x width` grid of continuous escape times.
///
/// Row 0 samples `ymin`. A value of `0.0` marks a point that never escaped
/// within the iteration budget; every escaped point holds a positive value.
/// Fields are immutable once built and are replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct EscapeField {
    resolution: Resolution,
    values: Vec<f64>,
}

impl EscapeField {
    pub fn from_data(resolution: Resolution, values: Vec<f64>) -> Result<Self, EscapeFieldError> {
        if resolution.size() != values.len() {
            return Err(EscapeFieldError::ShapeMismatch {
                expected_size: resolution.size(),
                data_size: values.len(),
            });
        }

        Ok(Self { resolution, values })
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
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if !self.resolution.contains(row, col) {
            return None;
        }

        Some(self.values[row * self.resolution.width() + col])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.resolution.width())
    }

    #[must_use]
    pub fn escaped_count(&self) -> usize {
        self.values.iter().filter(|&&v| v > 0.0).count()
    }

    /// Smallest and largest escape time, ignoring points that never escaped.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|&v| v > 0.0)
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
