//! File configuration schema

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration file structure (`troupe.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub generation: GenerationConfig,
    pub troupe: TroupeConfig,
}

/// `[generation]` section - model choice, timeout and retry knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model identifier for every agent in the run
    pub model: String,
    /// Timeout for one generateContent request, in seconds
    pub request_timeout_secs: u64,
    /// Total attempts per agent against rate limiting
    pub max_attempts: u32,
    /// Fixed wait between rate-limited attempts, in seconds
    pub backoff_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            request_timeout_secs: 300,
            max_attempts: 3,
            backoff_secs: 60,
        }
    }
}

/// `[troupe]` section - schedule and per-agent overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TroupeConfig {
    /// Execution order as agent id strings; empty means registration order
    pub order: Vec<String>,
    /// Directory with per-agent prompt override files
    pub prompts_dir: Option<PathBuf>,
    /// Per-agent overrides keyed by agent id
    pub agents: HashMap<String, AgentOverride>,
}

/// `[troupe.agents.<id>]` - one persona's configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentOverride {
    pub target_comment_count: Option<u32>,
    /// Path to a prompt template replacing the one from the prompt source
    pub prompt_file: Option<PathBuf>,
}
