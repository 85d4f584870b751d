//! Domain layer for danmaku-troupe
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Troupe
//!
//! A fixed cast of persona agents, each with its own prompt template and
//! output-count hint. One run schedules the troupe sequentially so that
//! every agent can react to the comments produced by the agents before it.
//!
//! ## Merged timeline
//!
//! The chronologically sorted union of every agent's comments, kept sorted
//! by lexicographic comparison of the `HH:MM:SS.ss` timestamp strings.

pub mod agent;
pub mod comment;
pub mod core;
pub mod prompt;
pub mod run;

// Re-export commonly used types
pub use agent::{AgentId, AgentRegistry, ExecutionOrder, PERSONA_DEFAULTS, Persona};
pub use comment::{Comment, PromptComment, Timeline};
pub use crate::core::{error::DomainError, model::Model};
pub use prompt::{InlineMedia, PromptPayload, VideoRef, compose_prompt};
pub use run::{AgentRunStatus, RunId, RunProgress, RunState};
