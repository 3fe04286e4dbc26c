pub mod compute_field;
pub mod ports;

pub use compute_field::{EscapeTimeKernel, compute_field};
pub use ports::field_evaluator::{EvaluationError, FieldEvaluator};
