use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportError {
    MaxIterationsOutOfRange { max_iterations: u32, min: u32, max: u32 },
    EscapeRadiusOutOfRange { escape_radius: f64, min: f64, max: f64 },
    PowerOutOfRange { power: u32, min: u32, max: u32 },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxIterationsOutOfRange {
                max_iterations,
                min,
                max,
            } => write!(
                f,
                "maximum iterations {} outside [{}, {}]",
                max_iterations, min, max
            ),
            Self::EscapeRadiusOutOfRange {
                escape_radius,
                min,
                max,
            } => write!(
                f,
                "escape radius {} outside [{}, {}]",
                escape_radius, min, max
            ),
            Self::PowerOutOfRange { power, min, max } => {
                write!(f, "power {} outside [{}, {}]", power, min, max)
            }
        }
    }
}

impl Error for ViewportError {}
