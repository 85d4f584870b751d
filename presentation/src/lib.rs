//! Presentation layer for danmaku-troupe
//!
//! CLI argument parsing, console progress display, the caller-facing state
//! mirror, and timeline output formatting.

pub mod cli;
pub mod output;
pub mod progress;
pub mod state;

pub use cli::{Cli, OutputFormat};
pub use output::ConsoleFormatter;
pub use progress::{ProgressReporter, SimpleProgress};
pub use state::{PipelineState, StateSnapshot};
