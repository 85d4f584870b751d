//! Persona agents: identifiers, catalog and scheduling

pub mod id;
pub mod order;
pub mod persona;
pub mod registry;

pub use id::AgentId;
pub use order::ExecutionOrder;
pub use persona::{PERSONA_DEFAULTS, Persona, PersonaDefaults};
pub use registry::AgentRegistry;
