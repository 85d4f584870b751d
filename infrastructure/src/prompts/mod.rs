//! Prompt template source
//!
//! Persona prompts ship embedded in the binary; a prompts directory can
//! override any of them per agent. The pipeline will not start until every
//! persona has a template, so a load failure here fails the run up front.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;
use troupe_application::ports::prompt_source::{PromptSource, PromptSourceError};
use troupe_domain::AgentId;

/// Built-in prompt template for one persona.
pub fn default_prompt(id: AgentId) -> &'static str {
    match id {
        AgentId::Gal => include_str!("../../prompts/gal.md"),
        AgentId::Professor => include_str!("../../prompts/professor.md"),
        AgentId::Comedian => include_str!("../../prompts/comedian.md"),
        AgentId::Otaku => include_str!("../../prompts/otaku.md"),
        AgentId::Tsundere => include_str!("../../prompts/tsundere.md"),
        AgentId::Commentator => include_str!("../../prompts/commentator.md"),
        AgentId::Aizuchi => include_str!("../../prompts/aizuchi.md"),
        AgentId::Yajiuma => include_str!("../../prompts/yajiuma.md"),
    }
}

/// Loads persona prompts from `<dir>/<agent_id>.md`, falling back to the
/// embedded defaults for agents without an override file.
pub struct FilePromptSource {
    dir: Option<PathBuf>,
}

impl FilePromptSource {
    /// Source with overrides from the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Source serving only the embedded defaults.
    pub fn builtin() -> Self {
        Self { dir: None }
    }
}

#[async_trait]
impl PromptSource for FilePromptSource {
    async fn load(&self) -> Result<HashMap<AgentId, String>, PromptSourceError> {
        let mut prompts = HashMap::new();

        for id in AgentId::ALL {
            let override_path = self.dir.as_ref().map(|d| d.join(format!("{id}.md")));
            let prompt = match override_path {
                Some(path) if path.exists() => {
                    debug!("loading prompt override for {} from {}", id, path.display());
                    tokio::fs::read_to_string(&path).await?
                }
                _ => default_prompt(id).to_string(),
            };
            prompts.insert(id, prompt);
        }

        Ok(prompts)
    }
}
