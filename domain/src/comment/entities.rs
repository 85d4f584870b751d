//! Comment entity - one generated timestamped text unit

use crate::agent::AgentId;
use serde::{Deserialize, Serialize};

/// One danmaku-style comment (Entity, immutable once created)
///
/// `time` uses a lexicographically sortable clock format (`HH:MM:SS.ss`),
/// so string comparison equals chronological comparison. `command` is an
/// optional Niconico styling directive (`"ue pink"`, `"shita green"`, ...)
/// and may be empty. The originating agent id is attached by the
/// orchestrator after generation; it is never part of the model's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub time: String,
    #[serde(default)]
    pub command: String,
    pub comment: String,
    #[serde(rename = "agentId", skip_serializing_if = "Option::is_none", default)]
    pub agent_id: Option<AgentId>,
}

impl Comment {
    pub fn new(time: impl Into<String>, command: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            command: command.into(),
            comment: comment.into(),
            agent_id: None,
        }
    }

    /// Return a copy tagged with its originating agent.
    pub fn tagged(mut self, agent: AgentId) -> Self {
        self.agent_id = Some(agent);
        self
    }

    /// View of this comment for embedding in a prompt.
    ///
    /// Agent attribution is orchestration metadata, not generation-relevant
    /// input, so the prompt view drops it.
    pub fn prompt_view(&self) -> PromptComment<'_> {
        PromptComment {
            time: &self.time,
            command: &self.command,
            comment: &self.comment,
        }
    }
}

/// Serializable comment view without agent attribution
#[derive(Debug, Serialize)]
pub struct PromptComment<'a> {
    pub time: &'a str,
    pub command: &'a str,
    pub comment: &'a str,
}
