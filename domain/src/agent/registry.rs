//! Agent registry - the read-only persona catalog for one run

use crate::agent::AgentId;
use crate::agent::persona::{PERSONA_DEFAULTS, Persona};
use crate::core::error::DomainError;
use std::collections::HashMap;

/// Catalog of personas keyed by their stable identifier.
///
/// Built once from the static defaults plus loaded prompt templates.
/// The registry itself is read-only after initialization; configuration
/// layers mutate the persona values before a run through the setters,
/// which operate on this registry instance (a per-run copy).
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    personas: Vec<Persona>,
}

impl AgentRegistry {
    /// Build the registry from loaded prompt templates.
    ///
    /// Every agent id must have a prompt; a missing entry fails with
    /// [`DomainError::MissingPrompt`].
    pub fn new(prompts: &HashMap<AgentId, String>) -> Result<Self, DomainError> {
        let mut personas = Vec::with_capacity(PERSONA_DEFAULTS.len());
        for defaults in &PERSONA_DEFAULTS {
            let prompt = prompts
                .get(&defaults.id)
                .ok_or(DomainError::MissingPrompt(defaults.id))?;
            personas.push(defaults.with_prompt(prompt.clone()));
        }
        Ok(Self { personas })
    }

    /// Look up a persona by id.
    pub fn get(&self, id: AgentId) -> Result<&Persona, DomainError> {
        self.personas
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::UnknownAgent(id.to_string()))
    }

    /// Registered agent ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.personas.iter().map(|p| p.id)
    }

    /// Number of registered personas.
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Override one persona's target comment count (clamped to at least 1).
    pub fn set_target_count(&mut self, id: AgentId, count: u32) -> Result<(), DomainError> {
        let persona = self.get_mut(id)?;
        persona.target_comment_count = count.max(1);
        Ok(())
    }

    /// Replace one persona's prompt template.
    pub fn set_prompt(&mut self, id: AgentId, prompt: impl Into<String>) -> Result<(), DomainError> {
        let persona = self.get_mut(id)?;
        persona.prompt = prompt.into();
        Ok(())
    }

    fn get_mut(&mut self, id: AgentId) -> Result<&mut Persona, DomainError> {
        self.personas
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::UnknownAgent(id.to_string()))
    }
}
