//! Gemini-backed implementation of the CommentGenerator port
//!
//! Wraps one transport attempt in the bounded retry loop, then coerces the
//! reply into domain comments. Parse failures are non-retriable: a reply
//! that violated the schema once will violate it again.

use async_trait::async_trait;
use crate::gemini::error::GeminiApiError;
use crate::gemini::retry::RetryPolicy;
use crate::gemini::schema::parse_comments;
use crate::gemini::transport::GenerateTransport;
use tracing::{debug, warn};
use troupe_application::ports::generation::{CommentGenerator, GenerationError, RetryObserver};
use troupe_domain::{Comment, Model, PromptPayload};

/// Comment generator backed by the Gemini generateContent endpoint
pub struct GeminiCommentGenerator<T: GenerateTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: GenerateTransport> GeminiCommentGenerator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl<T: GenerateTransport> CommentGenerator for GeminiCommentGenerator<T> {
    async fn generate(
        &self,
        model: &Model,
        payload: &PromptPayload,
        on_retry: RetryObserver<'_>,
    ) -> Result<Vec<Comment>, GenerationError> {
        let max = self.policy.max_attempts;

        for attempt in 1..=max {
            debug!("generateContent attempt {}/{}", attempt, max);
            match self.transport.generate_content(model, payload).await {
                Ok(body) => {
                    return parse_comments(&body)
                        .map_err(|e| GenerationError::InvalidResponse(e.to_string()));
                }
                Err(e) if e.is_rate_limited() => {
                    if !self.policy.can_retry(attempt) {
                        warn!("rate limited on final attempt {}/{}", attempt, max);
                        return Err(GenerationError::RateLimitExhausted { attempts: max });
                    }
                    warn!(
                        "rate limited on attempt {}/{}, backing off {:?}",
                        attempt, max, self.policy.backoff
                    );
                    on_retry(attempt, max);
                    tokio::time::sleep(self.policy.backoff).await;
                }
                Err(e) => {
                    return Err(GenerationError::Request(e.to_string()));
                }
            }
        }

        // The loop always returns from its last iteration.
        unreachable!("retry loop exhausted without returning")
    }
}
