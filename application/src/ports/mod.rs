//! Ports - interfaces between the application core and the outside world

pub mod generation;
pub mod observer;
pub mod prompt_source;

pub use generation::{CommentGenerator, GenerationError, RetryObserver, no_retry_observer};
pub use observer::{NoObserver, PipelineObserver};
pub use prompt_source::{PromptSource, PromptSourceError};
