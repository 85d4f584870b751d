//! Execution order - the sequential schedule for one run

use crate::agent::AgentId;
use crate::agent::registry::AgentRegistry;
use crate::core::error::DomainError;

/// Validated sequential schedule for one run (Value Object)
///
/// A sequence of agent ids with no duplicates, each resolving to a
/// registered persona. Agents absent from the order are not scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOrder {
    ids: Vec<AgentId>,
}

impl ExecutionOrder {
    /// Validate an explicit order against the registry.
    pub fn new(ids: Vec<AgentId>, registry: &AgentRegistry) -> Result<Self, DomainError> {
        let mut seen = Vec::with_capacity(ids.len());
        for id in &ids {
            registry.get(*id)?;
            if seen.contains(id) {
                return Err(DomainError::DuplicateAgent(*id));
            }
            seen.push(*id);
        }
        Ok(Self { ids })
    }

    /// The default schedule: every registered agent in registration order.
    pub fn default_for(registry: &AgentRegistry) -> Self {
        Self {
            ids: registry.ids().collect(),
        }
    }

    pub fn ids(&self) -> &[AgentId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn registry() -> AgentRegistry {
        let prompts: HashMap<AgentId, String> = AgentId::ALL
            .into_iter()
            .map(|id| (id, String::from("p")))
            .collect();
        AgentRegistry::new(&prompts).unwrap()
    }

    #[test]
    fn test_default_order_is_registration_order() {
        let order = ExecutionOrder::default_for(&registry());
        assert_eq!(order.ids(), &AgentId::ALL);
    }

    #[test]
    fn test_partial_order_accepted() {
        let order =
            ExecutionOrder::new(vec![AgentId::Otaku, AgentId::Gal], &registry()).unwrap();
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = ExecutionOrder::new(
            vec![AgentId::Gal, AgentId::Professor, AgentId::Gal],
            &registry(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::DuplicateAgent(AgentId::Gal));
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        let mut ids = AgentId::ALL.to_vec();
        ids.reverse();
        let order = ExecutionOrder::new(ids.clone(), &registry()).unwrap();
        assert_eq!(order.ids(), ids.as_slice());
    }
}
