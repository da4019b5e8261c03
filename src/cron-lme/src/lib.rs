pub mod errors;
pub mod schedule;

pub use errors::Error;
pub use schedule::{CycleOutcome, ScheduleState, is_due, poll_once};
