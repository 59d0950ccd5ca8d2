//! Builders for the canonical memories of common life events.
//!
//! Each helper fixes kind, default scores, the related-agent set and a
//! structured `details` payload, and renders a description with names from
//! an [`AgentDirectory`]. The result is a [`MemoryDraft`]: validation happens
//! when it is added to a store, so caller-supplied scores are checked there.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::memory::{MemoryDraft, MemoryKind};
use crate::types::{AgentDirectory, AgentId};

/// Importance of a birth or a death.
pub const LIFE_EVENT_IMPORTANCE: f32 = 95.0;
/// Emotional impact of a birth on the family.
pub const CHILDBIRTH_IMPACT: f32 = 90.0;
/// Emotional impact of a death on the mourners.
pub const DEATH_IMPACT: f32 = -90.0;
/// Emotional impact of learning a skill.
pub const LEARNING_IMPACT: f32 = 40.0;
/// Importance of finishing a building.
pub const CONSTRUCTION_IMPORTANCE: f32 = 70.0;
/// Emotional impact of finishing a building.
pub const CONSTRUCTION_IMPACT: f32 = 60.0;
/// Importance of witnessing a crime.
pub const CRIME_IMPORTANCE: f32 = 75.0;
/// Emotional impact of witnessing a crime.
pub const CRIME_IMPACT: f32 = -70.0;

/// Why an agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Died of age.
    OldAge,
    /// Ran out of food.
    Starvation,
    /// Ran out of water.
    Dehydration,
    /// Disease.
    Illness,
    /// Accident at work or on the road.
    Accident,
    /// Killed by another agent.
    Violence,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OldAge => "old age",
            Self::Starvation => "starvation",
            Self::Dehydration => "dehydration",
            Self::Illness => "illness",
            Self::Accident => "accident",
            Self::Violence => "violence",
        })
    }
}

/// Draft builder bound to a name directory.
#[derive(Clone, Copy)]
pub struct MemoryFactory<'a> {
    names: &'a dyn AgentDirectory,
}

impl<'a> MemoryFactory<'a> {
    /// Render names through `names`.
    #[must_use]
    pub fn new(names: &'a dyn AgentDirectory) -> Self {
        Self { names }
    }

    fn name(&self, agent: AgentId) -> String {
        self.names.name_or_placeholder(agent)
    }

    /// `actor` did `action` to `target`.
    #[must_use]
    pub fn interaction(
        &self,
        actor: AgentId,
        target: AgentId,
        action: &str,
        impact: f32,
        importance: f32,
    ) -> MemoryDraft {
        MemoryDraft::of_kind(MemoryKind::Interaction)
            .importance(importance)
            .emotional_impact(impact)
            .related([actor, target])
            .detail("action", action)
            .detail("actorId", actor.0)
            .detail("targetId", target.0)
            .description(format!("{} {action} {}", self.name(actor), self.name(target)))
    }

    /// A free-form significant event.
    #[must_use]
    pub fn event(
        &self,
        description: &str,
        impact: f32,
        importance: f32,
        involved: impl IntoIterator<Item = AgentId>,
    ) -> MemoryDraft {
        MemoryDraft::of_kind(MemoryKind::Event)
            .importance(importance)
            .emotional_impact(impact)
            .related(involved)
            .detail("eventType", "generic")
            .description(description)
    }

    /// Something that happened to `agent` while working as `job`.
    #[must_use]
    pub fn work(&self, agent: AgentId, job: &str, event: &str, impact: f32, importance: f32) -> MemoryDraft {
        MemoryDraft::of_kind(MemoryKind::Experience)
            .importance(importance)
            .emotional_impact(impact)
            .related([agent])
            .detail("job", job)
            .detail("event", event)
            .description(format!("{} {event} as {job}", self.name(agent)))
    }

    /// The relationship between `a` and `b` changed.
    #[must_use]
    pub fn relationship(
        &self,
        a: AgentId,
        b: AgentId,
        change: &str,
        impact: f32,
        importance: f32,
    ) -> MemoryDraft {
        MemoryDraft::of_kind(MemoryKind::Relationship)
            .importance(importance)
            .emotional_impact(impact)
            .related([a, b])
            .detail("change", change)
            .description(format!(
                "Relationship between {} and {}: {change}",
                self.name(a),
                self.name(b)
            ))
    }

    /// `mother` and `father` had `child`.
    #[must_use]
    pub fn childbirth(&self, mother: AgentId, father: AgentId, child: AgentId, child_name: &str) -> MemoryDraft {
        MemoryDraft::of_kind(MemoryKind::Event)
            .importance(LIFE_EVENT_IMPORTANCE)
            .emotional_impact(CHILDBIRTH_IMPACT)
            .related([mother, father, child])
            .detail("eventType", "childbirth")
            .detail("motherId", mother.0)
            .detail("fatherId", father.0)
            .detail("childId", child.0)
            .detail("childName", child_name)
            .description(format!(
                "{} and {} had a child named {child_name}",
                self.name(mother),
                self.name(father)
            ))
    }

    /// `deceased` died of `cause`, seen by `witnesses`.
    #[must_use]
    pub fn death(&self, deceased: AgentId, cause: DeathCause, witnesses: &[AgentId]) -> MemoryDraft {
        MemoryDraft::of_kind(MemoryKind::Trauma)
            .importance(LIFE_EVENT_IMPORTANCE)
            .emotional_impact(DEATH_IMPACT)
            .related(witnesses.iter().copied().chain([deceased]))
            .detail("eventType", "death")
            .detail("deceasedId", deceased.0)
            .detail("cause", cause.to_string())
            .description(format!("{} died. Cause: {cause}", self.name(deceased)))
    }

    /// `agent` reached `level` in `skill`.
    #[must_use]
    pub fn learning(&self, agent: AgentId, skill: &str, level: u32, importance: f32) -> MemoryDraft {
        MemoryDraft::of_kind(MemoryKind::Learning)
            .importance(importance)
            .emotional_impact(LEARNING_IMPACT)
            .related([agent])
            .detail("skill", skill)
            .detail("level", level)
            .description(format!("{} learned {skill} (level {level})", self.name(agent)))
    }

    /// `agent` finished a building.
    #[must_use]
    pub fn construction(
        &self,
        agent: AgentId,
        building_type: &str,
        building_id: u64,
        location: &str,
    ) -> MemoryDraft {
        MemoryDraft::of_kind(MemoryKind::Achievement)
            .importance(CONSTRUCTION_IMPORTANCE)
            .emotional_impact(CONSTRUCTION_IMPACT)
            .related([agent])
            .detail("buildingType", building_type)
            .detail("buildingId", building_id)
            .detail("location", location)
            .description(format!("{} built {building_type} in {location}", self.name(agent)))
    }

    /// `perpetrator` committed `crime_type`, optionally against `victim`,
    /// seen by `witnesses`.
    #[must_use]
    pub fn crime(
        &self,
        perpetrator: AgentId,
        victim: Option<AgentId>,
        crime_type: &str,
        witnesses: &[AgentId],
    ) -> MemoryDraft {
        let victim_name = victim.map_or_else(|| "no one in particular".to_string(), |v| self.name(v));
        MemoryDraft::of_kind(MemoryKind::Observation)
            .importance(CRIME_IMPORTANCE)
            .emotional_impact(CRIME_IMPACT)
            .related(witnesses.iter().copied().chain([perpetrator]).chain(victim))
            .detail("crimeType", crime_type)
            .detail("perpetratorId", perpetrator.0)
            .detail("victimId", victim.map(|v| v.0))
            .description(format!(
                "{} committed {crime_type} against {victim_name}",
                self.name(perpetrator)
            ))
    }
}

impl fmt::Debug for MemoryFactory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryFactory").finish_non_exhaustive()
    }
}
