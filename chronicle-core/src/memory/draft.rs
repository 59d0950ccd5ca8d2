//! Memory drafts: what callers hand to [`MemoryStore::add`].
//!
//! A draft carries the caller-supplied fields. The store assigns the id,
//! fills in defaults and validates everything before any tier is touched.
//!
//! [`MemoryStore::add`]: crate::memory::MemoryStore::add

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChronicleError, Result};
use crate::memory::MemoryKind;
use crate::memory::record::{Details, MemoryRecord};
use crate::types::{AgentId, LocationId, MemoryId};

/// Maximum importance score.
pub const MAX_IMPORTANCE: f32 = 100.0;
/// Bound on the magnitude of emotional impact.
pub const MAX_EMOTIONAL_IMPACT: f32 = 100.0;

/// An unsaved memory. Build with the chained setters:
///
/// ```
/// use chronicle_core::memory::{MemoryDraft, MemoryKind};
/// use chronicle_core::types::AgentId;
///
/// let draft = MemoryDraft::of_kind(MemoryKind::Interaction)
///     .importance(40.0)
///     .emotional_impact(25.0)
///     .related([AgentId(1), AgentId(2)])
///     .description("Ana greeted Bruno");
/// assert_eq!(draft.related_agents.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDraft {
    /// Category. Required.
    pub kind: Option<MemoryKind>,
    /// Importance in `[0, 100]`. Required.
    pub importance: Option<f32>,
    /// Emotional impact in `[-100, 100]`. Defaults to 0.
    pub emotional_impact: Option<f32>,
    /// Agents the memory concerns.
    pub related_agents: BTreeSet<AgentId>,
    /// Where it happened.
    pub location: Option<LocationId>,
    /// Event-specific payload.
    pub details: Details,
    /// Human-readable summary.
    pub description: String,
    /// When it happened. Defaults to the store's "now".
    pub timestamp: Option<DateTime<Utc>>,
    /// Per-record decay speed. Defaults to the store's configured rate.
    pub decay_rate: Option<f32>,
}

impl MemoryDraft {
    /// Start a draft of the given kind.
    #[must_use]
    pub fn of_kind(kind: MemoryKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Set the kind.
    #[must_use]
    pub fn kind(mut self, kind: MemoryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the importance.
    #[must_use]
    pub fn importance(mut self, importance: f32) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Set the emotional impact.
    #[must_use]
    pub fn emotional_impact(mut self, impact: f32) -> Self {
        self.emotional_impact = Some(impact);
        self
    }

    /// Add related agents. Duplicates collapse.
    #[must_use]
    pub fn related(mut self, agents: impl IntoIterator<Item = AgentId>) -> Self {
        self.related_agents.extend(agents);
        self
    }

    /// Set the location.
    #[must_use]
    pub fn location(mut self, location: LocationId) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach one detail entry.
    #[must_use]
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Pin the timestamp instead of using "now" at insertion.
    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Override the decay rate.
    #[must_use]
    pub fn decay_rate(mut self, rate: f32) -> Self {
        self.decay_rate = Some(rate);
        self
    }

    /// Validate the draft and turn it into a record.
    ///
    /// # Errors
    /// - `MissingField` if kind or importance is unset.
    /// - `InvalidArgument` for out-of-range or non-finite scores, a negative
    ///   decay rate, or a timestamp later than `now`.
    pub fn into_record(
        self,
        id: MemoryId,
        now: DateTime<Utc>,
        default_decay_rate: f32,
    ) -> Result<MemoryRecord> {
        let kind = self.kind.ok_or(ChronicleError::MissingField("kind"))?;
        let importance = self.importance.ok_or(ChronicleError::MissingField("importance"))?;
        if !importance.is_finite() || !(0.0..=MAX_IMPORTANCE).contains(&importance) {
            return Err(ChronicleError::invalid(
                "importance",
                format!("must be within [0, {MAX_IMPORTANCE}], got {importance}"),
            ));
        }

        let emotional_impact = self.emotional_impact.unwrap_or(0.0);
        if !emotional_impact.is_finite() || emotional_impact.abs() > MAX_EMOTIONAL_IMPACT {
            return Err(ChronicleError::invalid(
                "emotional_impact",
                format!(
                    "must be within [-{MAX_EMOTIONAL_IMPACT}, {MAX_EMOTIONAL_IMPACT}], got {emotional_impact}"
                ),
            ));
        }

        let decay_rate = self.decay_rate.unwrap_or(default_decay_rate);
        if !decay_rate.is_finite() || decay_rate < 0.0 {
            return Err(ChronicleError::invalid(
                "decay_rate",
                format!("must be a non-negative number, got {decay_rate}"),
            ));
        }

        let timestamp = self.timestamp.unwrap_or(now);
        if timestamp > now {
            return Err(ChronicleError::invalid(
                "timestamp",
                format!("{timestamp} lies in the future (now is {now})"),
            ));
        }

        Ok(MemoryRecord::from_parts(
            id,
            timestamp,
            kind,
            importance,
            emotional_impact,
            self.related_agents,
            self.location,
            self.details,
            self.description,
            decay_rate,
        ))
    }
}
