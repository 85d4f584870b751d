//! Prompt template source port
//!
//! Persona prompt templates load asynchronously before a run; the pipeline
//! cannot start until every persona's template is available, because the
//! registry refuses to build without them.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use troupe_domain::AgentId;

/// Errors while loading persona prompt templates
#[derive(Error, Debug)]
pub enum PromptSourceError {
    #[error("Failed to read prompt template: {0}")]
    Io(#[from] std::io::Error),

    #[error("No prompt template available for agent: {0}")]
    MissingAgent(AgentId),
}

/// Supplier of per-agent prompt templates
#[async_trait]
pub trait PromptSource: Send + Sync {
    /// Load a template for every agent id; missing agents are an error.
    async fn load(&self) -> Result<HashMap<AgentId, String>, PromptSourceError>;
}
