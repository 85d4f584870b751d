//! Comment generation port
//!
//! Defines the interface for the external generation capability. The only
//! port that performs network I/O; the retry policy for transient
//! rate-limit failures is internal to implementations.

use async_trait::async_trait;
use thiserror::Error;
use troupe_domain::{Comment, Model, PromptPayload};

/// Callback invoked before each backoff wait, with `(attempt, max_attempts)`.
///
/// `attempt` is the attempt that just failed with a rate limit; the adapter
/// will sleep its fixed backoff and try again.
pub type RetryObserver<'a> = &'a (dyn Fn(u32, u32) + Send + Sync);

/// No-op retry observer for callers that do not surface retries.
pub fn no_retry_observer() -> RetryObserver<'static> {
    &|_, _| {}
}

/// Errors from one agent's generation call, after internal retries
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Rate limit still exceeded after {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },

    #[error("Invalid response from the generation API: {0}")]
    InvalidResponse(String),

    #[error("Generation request failed: {0}")]
    Request(String),

    #[error("Generation cancelled")]
    Cancelled,
}

/// Gateway to the generation capability
///
/// Implementations (adapters) live in the infrastructure layer and must be
/// substitutable with fakes: the contract is pure input to output, with no
/// ambient state beyond the injected model identifier and payload.
///
/// The returned batch keeps whatever order the model produced; sorting is
/// the orchestrator's responsibility.
#[async_trait]
pub trait CommentGenerator: Send + Sync {
    async fn generate(
        &self,
        model: &Model,
        payload: &PromptPayload,
        on_retry: RetryObserver<'_>,
    ) -> Result<Vec<Comment>, GenerationError>;
}
