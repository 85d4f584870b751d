//! Persona entity - one configured generation role in the troupe

use crate::agent::AgentId;
use serde::{Deserialize, Serialize};

/// A persona agent (Entity)
///
/// Constructed from static defaults at startup, optionally mutated by
/// configuration before a run. The `prompt` field is the persona's template
/// text loaded from a prompt source; `target_comment_count` is an advisory
/// hint forwarded to the model, not a hard cap on the returned batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: AgentId,
    pub name: String,
    pub icon: String,
    pub description: String,
    /// Presentation-only accent color
    pub color: String,
    /// Prompt template text for this persona
    pub prompt: String,
    /// Approximate number of comments the model is asked to produce
    pub target_comment_count: u32,
}

/// Static display metadata and defaults for one persona
pub struct PersonaDefaults {
    pub id: AgentId,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub target_comment_count: u32,
}

/// Built-in persona catalog, in registration order.
pub const PERSONA_DEFAULTS: [PersonaDefaults; 8] = [
    PersonaDefaults {
        id: AgentId::Gal,
        name: "Gal Agent",
        icon: "\u{1F48B}",
        description: "Intuitive and emotional. Gets to the heart of the matter with style.",
        color: "pink",
        target_comment_count: 100,
    },
    PersonaDefaults {
        id: AgentId::Professor,
        name: "Professor Agent",
        icon: "\u{1F468}\u{200D}\u{1F3EB}",
        description: "Logical and analytical. Provides context and factual explanations.",
        color: "blue",
        target_comment_count: 30,
    },
    PersonaDefaults {
        id: AgentId::Comedian,
        name: "Comedian Agent",
        icon: "\u{1F602}",
        description: "Humorous and witty. Finds the funny moments and makes jokes.",
        color: "orange",
        target_comment_count: 100,
    },
    PersonaDefaults {
        id: AgentId::Otaku,
        name: "Otaku Agent",
        icon: "\u{1F913}",
        description: "Deep dives with anime/game knowledge and points out tropes.",
        color: "purple",
        target_comment_count: 100,
    },
    PersonaDefaults {
        id: AgentId::Tsundere,
        name: "Tsundere Agent",
        icon: "\u{1F644}",
        description: "Acts tough, but secretly impressed. \"It's not like I like it or anything!\"",
        color: "red",
        target_comment_count: 100,
    },
    PersonaDefaults {
        id: AgentId::Commentator,
        name: "Commentator Agent",
        icon: "\u{1F399}",
        description: "Narrates the action with high energy, like a sports announcer.",
        color: "teal",
        target_comment_count: 100,
    },
    PersonaDefaults {
        id: AgentId::Aizuchi,
        name: "Aizuchi Agent",
        icon: "\u{1F44F}",
        description: "Adds timely interjections and reactions to liven up the conversation.",
        color: "yellow",
        target_comment_count: 100,
    },
    PersonaDefaults {
        id: AgentId::Yajiuma,
        name: "Onlooker Agent",
        icon: "\u{1F440}",
        description: "Acts like a curious bystander, heckling and asking questions from the crowd.",
        color: "lime",
        target_comment_count: 100,
    },
];

impl PersonaDefaults {
    /// Materialize a persona from these defaults and a prompt template.
    pub fn with_prompt(&self, prompt: impl Into<String>) -> Persona {
        Persona {
            id: self.id,
            name: self.name.to_string(),
            icon: self.icon.to_string(),
            description: self.description.to_string(),
            color: self.color.to_string(),
            prompt: prompt.into(),
            target_comment_count: self.target_comment_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_agent() {
        for (defaults, id) in PERSONA_DEFAULTS.iter().zip(AgentId::ALL) {
            assert_eq!(defaults.id, id);
        }
    }

    #[test]
    fn test_professor_has_smaller_target() {
        let professor = PERSONA_DEFAULTS
            .iter()
            .find(|d| d.id == AgentId::Professor)
            .unwrap();
        assert_eq!(professor.target_comment_count, 30);
    }

    #[test]
    fn test_with_prompt() {
        let persona = PERSONA_DEFAULTS[0].with_prompt("You are a gal.");
        assert_eq!(persona.id, AgentId::Gal);
        assert_eq!(persona.prompt, "You are a gal.");
    }
}
