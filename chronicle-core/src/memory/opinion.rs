//! Net sentiment of a store's owner toward another agent.
//!
//! The score is a relevance-weighted average of emotional impact, mapped from
//! `[-100, 100]` onto `[0, 100]` with 50 as indifference:
//!
//! ```text
//! opinion = 50 + 0.5 · Σ(impact · relevance) / Σ(relevance)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::memory::MemoryStore;
use crate::types::AgentId;

/// Opinion held toward an agent nobody remembers anything about.
pub const NEUTRAL_OPINION: f64 = 50.0;

/// Coarse reading of an opinion score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attitude {
    /// Below 30.
    Hostile,
    /// 30 up to 45.
    Wary,
    /// 45 through 55.
    Neutral,
    /// Above 55 through 70.
    Friendly,
    /// Above 70.
    Devoted,
}

impl Attitude {
    /// Bucket an opinion score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            Self::Hostile
        } else if score < 45.0 {
            Self::Wary
        } else if score <= 55.0 {
            Self::Neutral
        } else if score <= 70.0 {
            Self::Friendly
        } else {
            Self::Devoted
        }
    }
}

impl fmt::Display for Attitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hostile => "hostile",
            Self::Wary => "wary",
            Self::Neutral => "neutral",
            Self::Friendly => "friendly",
            Self::Devoted => "devoted",
        })
    }
}

impl MemoryStore {
    /// Opinion of `agent` in `[0, 100]`.
    ///
    /// Read-only: forming an opinion does not count as recalling. Returns
    /// [`NEUTRAL_OPINION`] when nothing relevant is remembered.
    #[must_use]
    pub fn opinion_of(&self, agent: AgentId) -> f64 {
        let Some(indices) = self.by_agent.get(&agent) else {
            return NEUTRAL_OPINION;
        };
        let now = self.clock.now();
        let (total, weighted) = indices
            .iter()
            .map(|&idx| &self.records[idx])
            .fold((0.0_f64, 0.0_f64), |(total, weighted), record| {
                let relevance = record.relevance_at(now);
                (total + relevance, weighted + f64::from(record.emotional_impact()) * relevance)
            });
        if total <= 0.0 {
            return NEUTRAL_OPINION;
        }
        NEUTRAL_OPINION + 0.5 * weighted / total
    }

    /// [`opinion_of`](Self::opinion_of), bucketed.
    #[must_use]
    pub fn attitude_toward(&self, agent: AgentId) -> Attitude {
        Attitude::from_score(self.opinion_of(agent))
    }
}
