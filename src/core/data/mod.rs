pub mod complex;
pub mod escape_field;
pub mod plane_rect;
pub mod resolution;
