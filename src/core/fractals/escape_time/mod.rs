pub mod algorithm;
pub mod smoothing;

pub use algorithm::EscapeTimeAlgorithm;
