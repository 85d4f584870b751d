//! Prompt composition for persona agents

pub mod composer;
pub mod payload;

pub use composer::compose_prompt;
pub use payload::{InlineMedia, PromptPayload, VideoRef};
