//! Workout session runner and session history.

pub mod clock;
pub mod effect;
pub mod error;
pub mod history;
pub mod phase;
pub mod runner;

pub use clock::{Clock, ManualClock, SystemClock};
pub use effect::Effect;
pub use error::SessionError;
pub use history::{group_by_day, HistoryDay};
pub use phase::Phase;
pub use runner::{RunnerSettings, SessionRunner};
