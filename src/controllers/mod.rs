pub mod session;
pub mod zoom;
