//! Pipeline state mirror
//!
//! Projects orchestrator events into a caller-facing snapshot: per-agent
//! statuses, per-agent comment counts, overall progress and the latest
//! timeline. The mirror is keyed by [`RunId`]; events from a run other than
//! the one announced by the latest `on_run_start` are dropped, so an
//! abandoned run can never overwrite newer state.

use std::collections::HashMap;
use std::sync::Mutex;
use troupe_application::ports::observer::PipelineObserver;
use troupe_domain::{
    AgentId, AgentRunStatus, Comment, Persona, RunId, RunProgress, RunState, Timeline,
};

/// Snapshot of everything a UI needs to render one run
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    pub state: RunState,
    pub statuses: HashMap<AgentId, AgentRunStatus>,
    pub comment_counts: HashMap<AgentId, usize>,
    pub progress: RunProgress,
    pub timeline: Vec<Comment>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    run: Option<RunId>,
    snapshot: StateSnapshot,
}

/// Observer that mirrors pipeline events into queryable state
#[derive(Debug, Default)]
pub struct PipelineState {
    inner: Mutex<Inner>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot (cloned; the mirror keeps updating).
    pub fn snapshot(&self) -> StateSnapshot {
        self.inner.lock().unwrap().snapshot.clone()
    }

    /// Reset the progress display after the post-run hold, keeping the
    /// timeline and statuses visible.
    pub fn clear_progress(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.snapshot.progress = RunProgress::zero();
    }

    /// Run the closure only when the event belongs to the current run.
    fn if_current(&self, run: RunId, f: impl FnOnce(&mut StateSnapshot)) {
        let mut inner = self.inner.lock().unwrap();
        if inner.run == Some(run) {
            f(&mut inner.snapshot);
        }
    }
}

impl PipelineObserver for PipelineState {
    fn on_run_start(&self, run: RunId, _total: usize) {
        let mut inner = self.inner.lock().unwrap();
        inner.run = Some(run);
        inner.snapshot = StateSnapshot {
            state: RunState::Running,
            statuses: AgentId::ALL
                .into_iter()
                .map(|id| (id, AgentRunStatus::Idle))
                .collect(),
            comment_counts: HashMap::new(),
            progress: RunProgress::zero().with_message("Initializing..."),
            timeline: Vec::new(),
            error: None,
        };
    }

    fn on_agent_start(&self, run: RunId, index: usize, total: usize, persona: &Persona) {
        self.if_current(run, |s| {
            s.statuses.insert(persona.id, AgentRunStatus::Loading);
            s.progress.message = format!("[{}/{}] {} is working...", index + 1, total, persona.name);
        });
    }

    fn on_retry(&self, run: RunId, persona: &Persona, attempt: u32, max_attempts: u32) {
        self.if_current(run, |s| {
            s.progress.message = format!(
                "{} hit a rate limit, retrying (attempt {}/{})...",
                persona.name, attempt, max_attempts
            );
        });
    }

    fn on_agent_complete(
        &self,
        run: RunId,
        persona: &Persona,
        batch_len: usize,
        progress: &RunProgress,
        timeline: &Timeline,
    ) {
        self.if_current(run, |s| {
            s.statuses.insert(persona.id, AgentRunStatus::Success);
            s.comment_counts.insert(persona.id, batch_len);
            s.progress.fraction = progress.fraction;
            s.timeline = timeline.as_slice().to_vec();
        });
    }

    fn on_run_complete(&self, run: RunId) {
        self.if_current(run, |s| {
            s.state = RunState::Completed;
            s.progress.fraction = 1.0;
            s.progress.message = "All agents finished!".to_string();
        });
    }

    fn on_run_failed(&self, run: RunId, agent: AgentId, message: &str) {
        self.if_current(run, |s| {
            s.state = RunState::Failed;
            s.statuses
                .insert(agent, AgentRunStatus::Error(message.to_string()));
            s.error = Some(format!("Execution stopped due to an error with {agent}."));
            s.progress = RunProgress::zero().with_message("An error occurred.");
        });
    }
}
