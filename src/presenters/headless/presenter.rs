use crate::controllers::session::locks::lock;
use crate::controllers::session::ports::{
    BusyObserver, ControlSurface, RenderingSurface, StatusSink,
};
use crate::core::data::escape_field::EscapeField;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::viewport::ControlValues;
use std::sync::{Arc, Mutex};

/// Headless stand-in for the plot, the sliders and the status line: reports
/// everything through `log` and keeps the last frame for inspection.
#[derive(Default)]
pub struct LogPresenter {
    frame: Mutex<Option<(Arc<EscapeField>, PlaneRect)>>,
    frames: Mutex<u64>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<(Arc<EscapeField>, PlaneRect)> {
        lock(&self.frame).clone()
    }

    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        *lock(&self.frames)
    }
}

impl RenderingSurface for LogPresenter {
    fn present(&self, field: Arc<EscapeField>, bounds: PlaneRect) {
        let range = match field.value_range() {
            Some((lo, hi)) => format!("{lo:.3}..{hi:.3}"),
            None => "none".to_string(),
        };

        log::info!(
            "frame {}x{} over x [{}, {}] y [{}, {}]: {} of {} escaped, range {range}",
            field.width(),
            field.height(),
            bounds.xmin(),
            bounds.xmax(),
            bounds.ymin(),
            bounds.ymax(),
            field.escaped_count(),
            field.values().len(),
        );

        *lock(&self.frame) = Some((field, bounds));
        *lock(&self.frames) += 1;
    }
}

impl ControlSurface for LogPresenter {
    fn sync(&self, values: ControlValues) {
        log::info!(
            "controls: iterations {} in [{}, {}], power {}, escape radius {}",
            values.iterations,
            values.ranges.iterations.0,
            values.ranges.iterations.1,
            values.power,
            values.escape_radius,
        );
    }
}

impl BusyObserver for LogPresenter {
    fn on_busy_changed(&self, busy: bool) {
        log::debug!("{}", if busy { "busy" } else { "idle" });
    }
}

impl StatusSink for LogPresenter {
    fn show_progress(&self, text: &str) {
        log::debug!("{text}");
    }

    fn clear(&self) {
        log::debug!("status cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::resolution::Resolution;
    use crate::core::viewport::{ControlRanges, ViewportModel};

    #[test_log::test]
    fn test_present_keeps_last_frame() {
        let presenter = LogPresenter::new();
        let resolution = Resolution::new(2, 2).unwrap();
        let field = Arc::new(EscapeField::from_data(resolution, vec![0.0, 1.5, 2.5, 0.0]).unwrap());
        let bounds = PlaneRect::from_bounds(-1.0, 1.0, -1.0, 1.0).unwrap();

        presenter.present(Arc::clone(&field), bounds);

        let (kept, kept_bounds) = presenter.last_frame().expect("frame kept");
        assert!(Arc::ptr_eq(&kept, &field));
        assert_eq!(kept_bounds, bounds);
        assert_eq!(presenter.frames_presented(), 1);
    }

    #[test_log::test]
    fn test_other_ports_only_log() {
        let presenter = LogPresenter::new();

        presenter.sync(ControlRanges::default().values_for(&ViewportModel::default()));
        presenter.on_busy_changed(true);
        presenter.show_progress("Computing... ●●●○○○○○");
        presenter.clear();
        presenter.on_busy_changed(false);

        assert!(presenter.last_frame().is_none());
        assert_eq!(presenter.frames_presented(), 0);
    }
}
