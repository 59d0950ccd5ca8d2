//! Agent identities and display names.
//!
//! The registry is the world's [`AgentDirectory`]: stores and factories ask
//! it for names, never each other.

use std::collections::BTreeMap;

use chronicle_core::types::{AgentDirectory, AgentId};
use chronicle_core::{ChronicleError, Result};

/// Issues [`AgentId`]s and remembers what everyone is called.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    issued: u64,
    names: BTreeMap<AgentId, String>,
}

impl AgentRegistry {
    /// Create an empty registry. The first id issued is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new agent called `name`.
    pub fn register(&mut self, name: impl Into<String>) -> AgentId {
        self.issued += 1;
        let id = AgentId(self.issued);
        self.names.insert(id, name.into());
        id
    }

    /// Change an agent's display name (marriage, nickname...).
    ///
    /// # Errors
    /// `UnknownAgent` if `agent` was never registered or has been removed.
    pub fn rename(&mut self, agent: AgentId, name: impl Into<String>) -> Result<()> {
        let slot = self
            .names
            .get_mut(&agent)
            .ok_or(ChronicleError::UnknownAgent(agent))?;
        *slot = name.into();
        Ok(())
    }

    /// Forget an agent's name. Memories that mention it fall back to the
    /// `agent #<id>` placeholder.
    pub fn remove(&mut self, agent: AgentId) -> Option<String> {
        self.names.remove(&agent)
    }

    /// Whether `agent` currently has a name.
    #[must_use]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.names.contains_key(&agent)
    }

    /// Number of named agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no agent is named.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Named agents in id order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

impl AgentDirectory for AgentRegistry {
    fn display_name(&self, agent: AgentId) -> Option<String> {
        self.names.get(&agent).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let mut registry = AgentRegistry::new();
        assert_eq!(registry.register("Ana"), AgentId(1));
        assert_eq!(registry.register("Bento"), AgentId(2));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn rename_and_remove() {
        let mut registry = AgentRegistry::new();
        let ana = registry.register("Ana");
        registry.rename(ana, "Ana Sousa").expect("known agent");
        assert_eq!(registry.display_name(ana).as_deref(), Some("Ana Sousa"));

        assert_eq!(registry.remove(ana).as_deref(), Some("Ana Sousa"));
        assert!(!registry.contains(ana));
        assert_eq!(registry.name_or_placeholder(ana), "agent #1");
        assert!(matches!(
            registry.rename(ana, "ghost"),
            Err(ChronicleError::UnknownAgent(AgentId(1)))
        ));
    }

    #[test]
    fn removed_ids_are_never_reissued() {
        let mut registry = AgentRegistry::new();
        let first = registry.register("Ana");
        registry.remove(first);
        assert_eq!(registry.register("Bento"), AgentId(2));
        assert!(registry.iter().eq([(AgentId(2), "Bento")]));
    }
}
