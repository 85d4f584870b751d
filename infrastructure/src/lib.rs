//! Infrastructure layer for danmaku-troupe
//!
//! Adapters for the outside world: the Gemini generation client, the prompt
//! template files, and configuration loading.

pub mod config;
pub mod gemini;
pub mod prompts;

pub use config::{ConfigLoader, FileConfig};
pub use gemini::{
    DEFAULT_REQUEST_TIMEOUT, GeminiApiError, GeminiCommentGenerator, GenerateTransport,
    HttpTransport, RetryPolicy,
};
pub use prompts::{FilePromptSource, default_prompt};
