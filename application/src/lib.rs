//! Application layer for danmaku-troupe
//!
//! Use cases and the ports they depend on. The pipeline use case owns the
//! sequential agent loop; everything crossing a boundary (generation,
//! progress observation, prompt loading) is a port implemented elsewhere.

pub mod ports;
pub mod use_cases;

pub use ports::{
    CommentGenerator, GenerationError, NoObserver, PipelineObserver, PromptSource,
    PromptSourceError, RetryObserver, no_retry_observer,
};
pub use use_cases::{PipelineResult, RunPipelineError, RunPipelineInput, RunPipelineUseCase};
