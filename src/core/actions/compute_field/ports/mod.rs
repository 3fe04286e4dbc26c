pub mod escape_algorithm;
pub mod field_evaluator;
