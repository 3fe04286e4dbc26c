pub mod controller;
pub mod iteration_budget;
pub mod policy;
pub mod types;

pub use controller::ZoomController;
pub use policy::ZoomPolicy;
pub use types::{PointerButton, ZoomDirection, ZoomOutcome, ZoomRejection, ZoomRequest};
