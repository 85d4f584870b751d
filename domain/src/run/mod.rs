//! Run bookkeeping: statuses, progress and run identity

pub mod progress;
pub mod status;

pub use progress::{RunId, RunProgress};
pub use status::{AgentRunStatus, RunState};
