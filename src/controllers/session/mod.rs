//! The viewing session: owns the committed model and serializes recomputes.

pub mod busy;
pub mod clock;
pub mod config;
pub mod indicator;
pub(crate) mod locks;
pub mod ports;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod ticker;
pub mod worker;

pub use busy::{BusyGuard, BusyState, BusyTransitions};
pub use clock::{Clock, SystemClock};
pub use config::SessionConfig;
pub use indicator::BusyIndicator;
pub use scheduler::{PendingRecompute, RecomputeScheduler, ScheduleAction, SchedulerPoll};
pub use session::{PollOutcome, Session, SessionPorts, SessionStatus};
pub use ticker::Ticker;
pub use worker::RecomputeTrigger;
