//! Comments and the merged timeline

pub mod entities;
pub mod timeline;

pub use entities::{Comment, PromptComment};
pub use timeline::Timeline;
