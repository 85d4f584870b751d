//! Per-agent and per-run status tracking

use serde::{Deserialize, Serialize};

/// Status of one agent within a run
///
/// Transitions strictly `Idle -> Loading -> {Success | Error}`; the terminal
/// states never change for the remainder of the run. Retries inside the
/// generation adapter are invisible at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum AgentRunStatus {
    Idle,
    Loading,
    Success,
    Error(String),
}

impl AgentRunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentRunStatus::Success | AgentRunStatus::Error(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AgentRunStatus::Error(_))
    }
}

impl Default for AgentRunStatus {
    fn default() -> Self {
        AgentRunStatus::Idle
    }
}

/// Overall state of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Failed,
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!AgentRunStatus::Idle.is_terminal());
        assert!(!AgentRunStatus::Loading.is_terminal());
        assert!(AgentRunStatus::Success.is_terminal());
        assert!(AgentRunStatus::Error("boom".into()).is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(AgentRunStatus::Error("rate limited".into())).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "rate limited");

        let json = serde_json::to_value(AgentRunStatus::Idle).unwrap();
        assert_eq!(json["status"], "idle");
    }
}
