//! Gemini generation adapter
//!
//! Implements the application's [`CommentGenerator`] port against the
//! Gemini REST API: structured-output schema enforcement, a bounded retry
//! loop for rate limiting, and coercion of replies into domain comments.
//!
//! [`CommentGenerator`]: troupe_application::ports::generation::CommentGenerator

pub mod error;
pub mod generator;
pub mod retry;
pub mod schema;
pub mod transport;

pub use error::GeminiApiError;
pub use generator::GeminiCommentGenerator;
pub use retry::RetryPolicy;
pub use transport::{DEFAULT_REQUEST_TIMEOUT, GenerateTransport, HttpTransport};
