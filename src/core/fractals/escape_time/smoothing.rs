//! Continuous (smoothed) escape time.
//!
//! The smoothed value for a point that escaped on zero-based iteration `i`
//! with final magnitude `|z|` is
//!
//! ```text
//! (i + 1) - ln(ln |z|) / ln(power)
//! ```
//!
//! The expression is undefined when `ln |z| <= 0` and overflows for huge
//! magnitudes. In those cases, and whenever the result is not a finite,
//! strictly positive number, the raw iteration count `i + 1` is used so that
//! `0.0` keeps meaning "never escaped".

/// Smoothed escape time from the squared magnitude at the escaping iteration.
#[must_use]
pub fn smoothed_escape_time(iteration: u32, magnitude_squared: f64, ln_power: f64) -> f64 {
    let raw = f64::from(iteration) + 1.0;
    let ln_magnitude = 0.5 * magnitude_squared.ln();

    if !(ln_magnitude.is_finite() && ln_magnitude > 0.0) {
        return raw;
    }

    let smoothed = raw - ln_magnitude.ln() / ln_power;

    if smoothed.is_finite() && smoothed > 0.0 {
        smoothed
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LN_2: f64 = std::f64::consts::LN_2;

    #[test]
    fn test_smoothed_value_matches_formula() {
        let magnitude_squared: f64 = 9.0;
        let expected = 5.0 - (3.0f64.ln()).ln() / LN_2;

        let value = smoothed_escape_time(4, magnitude_squared, LN_2);

        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_smoothed_value_sits_within_its_iteration_band() {
        // |z| in (R, R^power] with R = 2 keeps the value within half a band of i + 1
        for magnitude in [2.01f64, 2.5, 3.0, 3.9] {
            let value = smoothed_escape_time(9, magnitude * magnitude, LN_2);
            assert!(value > 9.5 && value < 10.6, "value {} for |z| {}", value, magnitude);
        }
    }

    #[test]
    fn test_magnitude_at_or_below_one_falls_back_to_iteration_count() {
        assert_eq!(smoothed_escape_time(3, 1.0, LN_2), 4.0);
        assert_eq!(smoothed_escape_time(3, 0.25, LN_2), 4.0);
        assert_eq!(smoothed_escape_time(3, 0.0, LN_2), 4.0);
    }

    #[test]
    fn test_non_finite_magnitude_falls_back_to_iteration_count() {
        assert_eq!(smoothed_escape_time(0, f64::INFINITY, LN_2), 1.0);
        assert_eq!(smoothed_escape_time(7, f64::NAN, LN_2), 8.0);
    }

    #[test]
    fn test_non_positive_result_falls_back_to_iteration_count() {
        // |z| = 1e6 on the first iteration: 1 - ln(ln 1e6)/ln 2 < 0
        let value = smoothed_escape_time(0, 1e12, LN_2);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_magnitude_just_above_one_stays_finite() {
        let value = smoothed_escape_time(2, 1.0 + 4.0 * f64::EPSILON, LN_2);

        assert!(value.is_finite());
        assert!(value > 0.0);
    }
}
