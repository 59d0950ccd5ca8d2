//! A single episodic record and its relevance/decay math.
//!
//! Relevance combines four things: fixed importance, exponential recency
//! decay (half-life ≈ 13.9 days), accumulated fading (`decay_level`) and
//! rehearsal (`access_count`). Only `decay_level` and `access_count` ever
//! change after creation.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChronicleError, Result};
use crate::memory::MemoryKind;
use crate::types::{AgentId, LocationId, MemoryId};

/// Per-day exponent of the recency factor `e^(-k·days)`.
pub const RECENCY_DECAY_PER_DAY: f64 = 0.05;
/// How much one rehearsal unit shields a record from its own decay.
pub const REHEARSAL_DECAY_SHIELD: f64 = 0.2;
/// How much one rehearsal unit boosts relevance.
pub const REHEARSAL_BOOST: f64 = 0.5;
/// Decay removed by a single recall.
pub const RECALL_DECAY_RELIEF: f32 = 0.05;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Open key/value payload attached by the caller (opaque to the store).
pub type Details = serde_json::Map<String, serde_json::Value>;

/// One thing an agent remembers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    id: MemoryId,
    timestamp: DateTime<Utc>,
    kind: MemoryKind,
    importance: f32,
    emotional_impact: f32,
    related_agents: BTreeSet<AgentId>,
    location: Option<LocationId>,
    details: Details,
    description: String,
    decay_rate: f32,
    decay_level: f32,
    access_count: u32,
}

impl MemoryRecord {
    /// Assemble a record from already validated parts. Used by
    /// [`MemoryDraft::into_record`](crate::memory::MemoryDraft::into_record).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: MemoryId,
        timestamp: DateTime<Utc>,
        kind: MemoryKind,
        importance: f32,
        emotional_impact: f32,
        related_agents: BTreeSet<AgentId>,
        location: Option<LocationId>,
        details: Details,
        description: String,
        decay_rate: f32,
    ) -> Self {
        Self {
            id,
            timestamp,
            kind,
            importance,
            emotional_impact,
            related_agents,
            location,
            details,
            description,
            decay_rate,
            decay_level: 0.0,
            access_count: 1,
        }
    }

    /// Unique id, assigned when the record entered its store.
    #[must_use]
    pub fn id(&self) -> MemoryId {
        self.id
    }

    /// When the remembered thing happened.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Category of the memory.
    #[must_use]
    pub fn kind(&self) -> MemoryKind {
        self.kind
    }

    /// Importance in `[0, 100]`, fixed at creation.
    #[must_use]
    pub fn importance(&self) -> f32 {
        self.importance
    }

    /// Emotional impact in `[-100, 100]`, fixed at creation.
    #[must_use]
    pub fn emotional_impact(&self) -> f32 {
        self.emotional_impact
    }

    /// Agents this memory concerns (deduplicated, ordered by id).
    #[must_use]
    pub fn related_agents(&self) -> &BTreeSet<AgentId> {
        &self.related_agents
    }

    /// Whether `agent` is one of the related agents.
    #[must_use]
    pub fn involves(&self, agent: AgentId) -> bool {
        self.related_agents.contains(&agent)
    }

    /// Where it happened, if known.
    #[must_use]
    pub fn location(&self) -> Option<LocationId> {
        self.location
    }

    /// Caller-defined payload.
    #[must_use]
    pub fn details(&self) -> &Details {
        &self.details
    }

    /// Human-readable summary.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Base decay speed per day.
    #[must_use]
    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }

    /// Accumulated fading: 0 = pristine, 1 = fully decayed.
    #[must_use]
    pub fn decay_level(&self) -> f32 {
        self.decay_level
    }

    /// Times this memory has been recalled (starts at 1).
    #[must_use]
    pub fn access_count(&self) -> u32 {
        self.access_count
    }

    /// Age in fractional days at `now`.
    ///
    /// # Errors
    /// `InvalidArgument` if `now` precedes the record's timestamp.
    pub fn days_since(&self, now: DateTime<Utc>) -> Result<f64> {
        let days = age_in_days(self.timestamp, now);
        if days < 0.0 {
            return Err(ChronicleError::invalid(
                "now",
                format!("{now} is before the memory timestamp {}", self.timestamp),
            ));
        }
        Ok(days)
    }

    /// Current relevance at `now`.
    ///
    /// ```text
    /// time    = e^(-0.05 · days)
    /// access  = log10(access_count + 1)
    /// decay'  = decay_level / (1 + 0.2 · access)
    /// R       = importance · time · (1 - decay') · (1 + 0.5 · access)
    /// ```
    ///
    /// # Errors
    /// `InvalidArgument` if `now` precedes the record's timestamp.
    pub fn relevance(&self, now: DateTime<Utc>) -> Result<f64> {
        Ok(self.relevance_after_days(self.days_since(now)?))
    }

    /// Relevance with the age clamped at zero. Stores validate timestamps
    /// against their clock on insertion, so the clamp never bites there.
    #[must_use]
    pub(crate) fn relevance_at(&self, now: DateTime<Utc>) -> f64 {
        self.relevance_after_days(age_in_days(self.timestamp, now).max(0.0))
    }

    fn relevance_after_days(&self, days: f64) -> f64 {
        let time_factor = (-RECENCY_DECAY_PER_DAY * days).exp();
        let access_factor = (f64::from(self.access_count) + 1.0).log10();
        let effective_decay =
            f64::from(self.decay_level) / (1.0 + REHEARSAL_DECAY_SHIELD * access_factor);
        f64::from(self.importance)
            * time_factor
            * (1.0 - effective_decay)
            * (1.0 + REHEARSAL_BOOST * access_factor)
    }

    /// Recall the memory: rehearsal strengthens it and peels off some decay.
    pub fn access(&mut self) {
        self.access_count = self.access_count.saturating_add(1);
        self.decay_level = (self.decay_level - RECALL_DECAY_RELIEF).max(0.0);
    }

    /// Let `delta_days` of natural fading act on the record.
    ///
    /// Important memories fade more slowly: the effective rate is
    /// `decay_rate · (1 - importance / 200)`.
    ///
    /// # Errors
    /// `InvalidArgument` if `delta_days` is negative or not finite.
    pub fn update_decay(&mut self, delta_days: f64) -> Result<()> {
        if !delta_days.is_finite() || delta_days < 0.0 {
            return Err(ChronicleError::invalid(
                "delta_days",
                format!("must be a non-negative number of days, got {delta_days}"),
            ));
        }
        self.apply_decay(delta_days);
        Ok(())
    }

    /// Infallible core of [`update_decay`](Self::update_decay); callers
    /// validate `delta_days` first.
    pub(crate) fn apply_decay(&mut self, delta_days: f64) {
        let adjusted_rate = f64::from(self.decay_rate) * (1.0 - f64::from(self.importance) / 200.0);
        let level = f64::from(self.decay_level) + adjusted_rate * delta_days;
        #[allow(clippy::cast_possible_truncation)]
        let level = level.min(1.0) as f32;
        self.decay_level = level;
    }
}

fn age_in_days(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let millis = now.signed_duration_since(then).num_milliseconds() as f64;
    millis / MILLIS_PER_DAY
}
