//! Collaborators the session talks to but does not implement.

pub mod control_surface;
pub mod rendering_surface;
pub mod status;

pub use control_surface::ControlSurface;
pub use rendering_surface::RenderingSurface;
pub use status::{BusyObserver, StatusSink};
