use crate::core::data::escape_field::EscapeField;
use crate::core::data::plane_rect::PlaneRect;
use std::sync::Arc;

pub trait RenderingSurface: Send + Sync {
    /// Called once per successful evaluation, from the worker thread.
    fn present(&self, field: Arc<EscapeField>, bounds: PlaneRect);
}
