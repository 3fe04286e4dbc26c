#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPolicy {
    pub zoom_factor: f64,
    pub min_size: f64,
    pub reference_width: f64,
    pub base_iterations: f64,
    pub max_iterations: u32,
}

impl ZoomPolicy {
    #[must_use]
    pub fn zoom_out_factor(&self) -> f64 {
        1.0 / self.zoom_factor
    }
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self {
            zoom_factor: 0.4,
            // below this plane coordinates stop being distinguishable in f64
            min_size: 1e-13,
            reference_width: 3.0,
            base_iterations: 300.0,
            max_iterations: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ZoomPolicy;

    #[test]
    fn default_policy_is_finite_and_consistent() {
        let policy = ZoomPolicy::default();

        assert!(policy.zoom_factor > 0.0 && policy.zoom_factor < 1.0);
        assert!(policy.min_size > 0.0);
        assert!(policy.reference_width > policy.min_size);
        assert!(policy.base_iterations.is_finite());
        assert!(policy.max_iterations > 0);
    }

    #[test]
    fn zoom_out_factor_inverts_zoom_factor() {
        let policy = ZoomPolicy::default();

        assert!((policy.zoom_out_factor() - 2.5).abs() < f64::EPSILON);
    }
}
