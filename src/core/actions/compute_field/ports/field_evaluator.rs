use crate::core::data::escape_field::{EscapeField, EscapeFieldError};
use crate::core::viewport::ViewportModel;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    Kernel(String),
    ShapeMismatch(EscapeFieldError),
    Panicked(String),
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kernel(message) => write!(f, "kernel error: {}", message),
            Self::ShapeMismatch(err) => write!(f, "kernel produced a malformed field: {}", err),
            Self::Panicked(message) => write!(f, "kernel panicked: {}", message),
        }
    }
}

impl Error for EvaluationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ShapeMismatch(err) => Some(err),
            Self::Kernel(_) | Self::Panicked(_) => None,
        }
    }
}

impl From<EscapeFieldError> for EvaluationError {
    fn from(err: EscapeFieldError) -> Self {
        Self::ShapeMismatch(err)
    }
}

/// Turns a model snapshot into a field. Must be pure so it can run on a worker.
pub trait FieldEvaluator: Send + Sync {
    fn evaluate(&self, model: &ViewportModel) -> Result<EscapeField, EvaluationError>;
}
