//! Error types for the Gemini adapter

use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiApiError>;

/// Errors from one attempt against the Gemini generateContent endpoint
#[derive(Error, Debug)]
pub enum GeminiApiError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GeminiApiError {
    /// Whether this failure signals rate limiting and is worth retrying.
    ///
    /// Only HTTP 429 and quota-exhaustion bodies qualify; timeouts and every
    /// other transport or schema failure are non-retriable.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GeminiApiError::Http { status: 429, .. } => true,
            GeminiApiError::Http { body, .. } => {
                body.contains("RESOURCE_EXHAUSTED") || body.contains("rate limit")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_429_is_rate_limited() {
        let err = GeminiApiError::Http {
            status: 429,
            body: String::new(),
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_resource_exhausted_body_is_rate_limited() {
        let err = GeminiApiError::Http {
            status: 503,
            body: r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#.to_string(),
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_other_errors_are_not_retriable() {
        let err = GeminiApiError::Http {
            status: 500,
            body: "internal".to_string(),
        };
        assert!(!err.is_rate_limited());
        assert!(!GeminiApiError::MalformedResponse("x".into()).is_rate_limited());
        assert!(!GeminiApiError::MissingApiKey.is_rate_limited());
    }
}
