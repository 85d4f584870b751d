//! Domain error types

use crate::agent::AgentId;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No video selected")]
    NoVideo,

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Duplicate agent in execution order: {0}")]
    DuplicateAgent(AgentId),

    #[error("No prompt template loaded for agent: {0}")]
    MissingPrompt(AgentId),

    #[error("Run cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
