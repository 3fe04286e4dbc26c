use crate::core::data::complex::Complex;

pub trait EscapeAlgorithm {
    /// Continuous escape time of `c`, or `0.0` if it stays bounded.
    fn escape_time(&self, c: Complex) -> f64;
}
