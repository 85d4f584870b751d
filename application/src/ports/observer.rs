//! Pipeline observation port
//!
//! The orchestrator emits a sequence of immutable progress events through
//! this trait; presentation layers subscribe and project them into their
//! own state. Every event carries the [`RunId`] so a mirror can drop stale
//! updates from an abandoned run.

use troupe_domain::{AgentId, Persona, RunId, RunProgress, Timeline};

/// Callback interface for progress updates during pipeline execution
///
/// Implementations live in the presentation layer (console progress bars,
/// state mirrors, test recorders). All methods default to no-ops.
pub trait PipelineObserver: Send + Sync {
    /// Called once before the first agent starts.
    fn on_run_start(&self, _run: RunId, _total: usize) {}

    /// Called when an agent's turn begins (`index` is zero-based).
    fn on_agent_start(&self, _run: RunId, _index: usize, _total: usize, _persona: &Persona) {}

    /// Called when the generation adapter is about to back off and retry.
    fn on_retry(&self, _run: RunId, _persona: &Persona, _attempt: u32, _max_attempts: u32) {}

    /// Called after an agent's batch has been merged into the timeline.
    fn on_agent_complete(
        &self,
        _run: RunId,
        _persona: &Persona,
        _batch_len: usize,
        _progress: &RunProgress,
        _timeline: &Timeline,
    ) {
    }

    /// Called once after every scheduled agent succeeded.
    fn on_run_complete(&self, _run: RunId) {}

    /// Called when the run aborts, naming the agent that failed.
    fn on_run_failed(&self, _run: RunId, _agent: AgentId, _message: &str) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoObserver;

impl PipelineObserver for NoObserver {}
