pub mod controllers;
pub mod core;
pub mod presenters;

pub use controllers::session::{
    PollOutcome, Session, SessionConfig, SessionPorts, SessionStatus, Ticker,
};
pub use controllers::zoom::{PointerButton, ZoomOutcome, ZoomPolicy, ZoomRejection};
pub use crate::core::actions::compute_field::{EscapeTimeKernel, FieldEvaluator, compute_field};
pub use crate::core::data::complex::Complex;
pub use crate::core::data::escape_field::EscapeField;
pub use crate::core::data::plane_rect::PlaneRect;
pub use crate::core::data::resolution::Resolution;
pub use crate::core::util::coordinate_mapper::{pixel_to_plane, plane_to_pixel};
pub use crate::core::viewport::{ControlRanges, ParameterEdit, ViewportModel};
pub use presenters::headless::presenter::LogPresenter;
pub use controllers::session::ports::{BusyObserver, ControlSurface, RenderingSurface, StatusSink};
