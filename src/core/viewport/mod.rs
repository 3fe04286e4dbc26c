pub mod errors;
pub mod model;
pub mod parameters;

pub use errors::ViewportError;
pub use model::ViewportModel;
pub use parameters::{ControlRanges, ControlValues, ParameterEdit};
