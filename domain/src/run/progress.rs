//! Run progress and run identity

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identity of one pipeline run (Value Object)
///
/// A fresh id is allocated at the start of every run. State mirrors compare
/// incoming event ids against their current run and drop stale updates, so
/// an abandoned run can never write into the state of a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(u64);

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

impl RunId {
    /// Allocate the next process-unique run id.
    pub fn next() -> Self {
        RunId(NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// Overall progress of a run: completed fraction plus a human-readable message
///
/// The fraction is derived from agents completed over total agents scheduled
/// and never decreases within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunProgress {
    pub fraction: f64,
    pub message: String,
}

impl RunProgress {
    pub fn zero() -> Self {
        Self {
            fraction: 0.0,
            message: String::new(),
        }
    }

    /// Progress after `completed` of `total` agents finished.
    pub fn of(completed: usize, total: usize) -> Self {
        let fraction = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        };
        Self {
            fraction,
            message: String::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn percent(&self) -> u32 {
        (self.fraction * 100.0).round() as u32
    }
}

impl Default for RunProgress {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_unique_and_increasing() {
        let a = RunId::next();
        let b = RunId::next();
        assert!(b.value() > a.value());
    }

    #[test]
    fn test_fraction_of_completed_agents() {
        let progress = RunProgress::of(3, 8);
        assert!((progress.fraction - 0.375).abs() < f64::EPSILON);
        assert_eq!(progress.percent(), 38);
    }

    #[test]
    fn test_zero_total_yields_zero() {
        assert_eq!(RunProgress::of(0, 0).fraction, 0.0);
    }

    #[test]
    fn test_message_builder() {
        let progress = RunProgress::of(1, 2).with_message("halfway");
        assert_eq!(progress.message, "halfway");
        assert_eq!(progress.percent(), 50);
    }
}
