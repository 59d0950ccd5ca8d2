//! The memory model and the per-agent [`MemoryStore`].
//!
//! - [`record`] — a single memory and its relevance/decay math
//! - [`draft`] — unsaved memories handed to the store
//! - [`store`] — tiers, indexes, add/tick/consolidate/decay
//! - [`query`] — typed retrieval over a store
//! - [`opinion`] — net sentiment toward another agent
//! - [`narrative`] — deterministic textual digest

pub mod draft;
pub mod narrative;
pub mod opinion;
pub mod query;
pub mod record;
pub mod store;

pub use draft::MemoryDraft;
pub use opinion::Attitude;
pub use record::{Details, MemoryRecord};
pub use store::{ConsolidationReport, MemoryListener, MemoryStore, StoreStats, TickReport};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of memory categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryKind {
    /// Dealings with another agent.
    Interaction,
    /// A significant event (wedding, birth, death...).
    Event,
    /// A personal accomplishment.
    Achievement,
    /// Something witnessed.
    Observation,
    /// General experience (work, travel).
    Experience,
    /// A significant negative experience.
    Trauma,
    /// A significant positive experience.
    Joy,
    /// Something learned.
    Learning,
    /// A change in a relationship.
    Relationship,
    /// An important decision taken.
    Decision,
}

impl MemoryKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Interaction,
        Self::Event,
        Self::Achievement,
        Self::Observation,
        Self::Experience,
        Self::Trauma,
        Self::Joy,
        Self::Learning,
        Self::Relationship,
        Self::Decision,
    ];
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interaction => "interaction",
            Self::Event => "event",
            Self::Achievement => "achievement",
            Self::Observation => "observation",
            Self::Experience => "experience",
            Self::Trauma => "trauma",
            Self::Joy => "joy",
            Self::Learning => "learning",
            Self::Relationship => "relationship",
            Self::Decision => "decision",
        };
        f.write_str(name)
    }
}
