//! Core type definitions: identities, id generation and the agent directory.
//!
//! Nothing in here is global. The world driver decides which id generator and
//! which directory a store or factory sees.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Identifier of an agent (NPC) in the simulated world.
///
/// Issued by the world driver; the memory core only ever compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent #{}", self.0)
    }
}

/// Identifier of a place (building, room, plot) where something happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationId(pub u64);

/// Unique identifier for a memory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryId(pub Uuid);

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Id generation
// ---------------------------------------------------------------------------

/// Source of fresh [`MemoryId`]s, handed to each store at construction.
///
/// Takes `&self` so one generator can be shared by every store in a world.
pub trait IdGenerator: Send + Sync {
    /// Produce an id never returned before by this generator.
    fn next_id(&self) -> MemoryId;
}

/// Random v4 UUIDs. Unique without coordination.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> MemoryId {
        MemoryId(Uuid::new_v4())
    }
}

/// Deterministic ids from an atomic counter (`00000000-...-000000000001`, ...).
///
/// Useful for reproducible simulations and tests.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Start counting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> MemoryId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        MemoryId(Uuid::from_u128(u128::from(n)))
    }
}

// ---------------------------------------------------------------------------
// Agent directory
// ---------------------------------------------------------------------------

/// Display-name lookup supplied by the agent model.
pub trait AgentDirectory {
    /// Current display name of `agent`, if it is known.
    fn display_name(&self, agent: AgentId) -> Option<String>;

    /// Display name, or a stable placeholder for agents the directory lost.
    fn name_or_placeholder(&self, agent: AgentId) -> String {
        self.display_name(agent)
            .unwrap_or_else(|| agent.to_string())
    }
}

impl AgentDirectory for HashMap<AgentId, String> {
    fn display_name(&self, agent: AgentId) -> Option<String> {
        self.get(&agent).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_unique_and_ordered() {
        let ids = SequentialIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.0.as_u128(), 1);
        assert_eq!(b.0.as_u128(), 2);
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn random_ids_do_not_collide() {
        let a = RandomIds.next_id();
        let b = RandomIds.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn directory_falls_back_to_placeholder() {
        let mut names = HashMap::new();
        names.insert(AgentId(1), "Ana".to_string());
        assert_eq!(names.name_or_placeholder(AgentId(1)), "Ana");
        assert_eq!(names.name_or_placeholder(AgentId(2)), "agent #2");
    }
}
