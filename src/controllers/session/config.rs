use crate::controllers::zoom::ZoomPolicy;
use crate::core::viewport::{ControlRanges, ViewportModel};
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_secs(5);
const INDICATOR_INTERVAL: Duration = Duration::from_millis(100);
const TIMER_INTERVAL: Duration = Duration::from_millis(50);

/// Everything a [`Session`](super::Session) needs to start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub viewport: ViewportModel,
    pub zoom: ZoomPolicy,
    pub controls: ControlRanges,
    /// Quiet period before a parameter edit is applied.
    pub debounce: Duration,
    pub indicator_interval: Duration,
    /// How often the timer driver polls the debounce slot.
    pub timer_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportModel::default(),
            zoom: ZoomPolicy::default(),
            controls: ControlRanges::default(),
            debounce: DEBOUNCE,
            indicator_interval: INDICATOR_INTERVAL,
            timer_interval: TIMER_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = SessionConfig::default();

        assert_eq!(config.debounce, Duration::from_secs(5));
        assert_eq!(config.indicator_interval, Duration::from_millis(100));
        assert_eq!(config.timer_interval, Duration::from_millis(50));
        assert_eq!(config.viewport, ViewportModel::default());
    }
}
