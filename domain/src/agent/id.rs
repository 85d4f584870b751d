//! Agent identifier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable identifier for a persona agent (Value Object)
///
/// The troupe is a fixed closed set: identifiers never change across
/// configuration, and serialized comment records reference them by their
/// string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentId {
    Gal,
    Professor,
    Comedian,
    Otaku,
    Tsundere,
    Commentator,
    Aizuchi,
    Yajiuma,
}

impl AgentId {
    /// All agents in registration order.
    ///
    /// This order doubles as the default execution order.
    pub const ALL: [AgentId; 8] = [
        AgentId::Gal,
        AgentId::Professor,
        AgentId::Comedian,
        AgentId::Otaku,
        AgentId::Tsundere,
        AgentId::Commentator,
        AgentId::Aizuchi,
        AgentId::Yajiuma,
    ];

    /// Get the stable string key for this agent
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::Gal => "gal",
            AgentId::Professor => "professor",
            AgentId::Comedian => "comedian",
            AgentId::Otaku => "otaku",
            AgentId::Tsundere => "tsundere",
            AgentId::Commentator => "commentator",
            AgentId::Aizuchi => "aizuchi",
            AgentId::Yajiuma => "yajiuma",
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gal" => Ok(AgentId::Gal),
            "professor" => Ok(AgentId::Professor),
            "comedian" => Ok(AgentId::Comedian),
            "otaku" => Ok(AgentId::Otaku),
            "tsundere" => Ok(AgentId::Tsundere),
            "commentator" => Ok(AgentId::Commentator),
            "aizuchi" => Ok(AgentId::Aizuchi),
            "yajiuma" => Ok(AgentId::Yajiuma),
            other => Err(DomainError::UnknownAgent(other.to_string())),
        }
    }
}

impl Serialize for AgentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
