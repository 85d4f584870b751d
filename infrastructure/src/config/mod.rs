//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{AgentOverride, FileConfig, GenerationConfig, TroupeConfig};
pub use loader::ConfigLoader;
