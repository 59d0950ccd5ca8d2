//! Life events that create memories.
//!
//! The world turns each event into one draft through the [`MemoryFactory`]
//! and files a separate copy with every recipient.

use chronicle_core::{AgentId, DeathCause, MemoryDraft, MemoryFactory};

/// Something that happened in the world and is worth remembering.
#[derive(Debug, Clone, PartialEq)]
pub enum LifeEvent {
    /// One agent did something to another.
    Interaction {
        /// Who acted.
        actor: AgentId,
        /// Who it was done to.
        target: AgentId,
        /// Verb phrase ("helped", "insulted").
        action: String,
        /// Emotional impact in `[-100, 100]`.
        impact: f32,
        /// Importance in `[0, 100]`.
        importance: f32,
    },

    /// A child was born.
    Childbirth {
        /// Mother.
        mother: AgentId,
        /// Father.
        father: AgentId,
        /// The newborn, already spawned.
        child: AgentId,
        /// The newborn's name.
        child_name: String,
    },

    /// An agent died.
    Death {
        /// Who died.
        deceased: AgentId,
        /// Why.
        cause: DeathCause,
        /// Family and bystanders who mourn.
        witnesses: Vec<AgentId>,
    },

    /// A crime was committed.
    Crime {
        /// Offender.
        perpetrator: AgentId,
        /// Victim, if there was one.
        victim: Option<AgentId>,
        /// Kind of crime ("theft", "arson").
        crime_type: String,
        /// Who saw it.
        witnesses: Vec<AgentId>,
    },

    /// A building was finished.
    Construction {
        /// Who built it.
        builder: AgentId,
        /// What was built ("a mill").
        building_type: String,
        /// Identifier of the new building.
        building_id: u64,
        /// Where it stands.
        location: String,
    },

    /// A skill level was reached.
    Learning {
        /// Learner.
        agent: AgentId,
        /// Skill name.
        skill: String,
        /// Level reached.
        level: u32,
        /// Importance in `[0, 100]`.
        importance: f32,
    },

    /// Something happened on the job.
    Work {
        /// Worker.
        agent: AgentId,
        /// Occupation.
        job: String,
        /// What happened ("harvested wheat").
        event: String,
        /// Emotional impact in `[-100, 100]`.
        impact: f32,
        /// Importance in `[0, 100]`.
        importance: f32,
    },

    /// A relationship changed.
    Relationship {
        /// One side.
        a: AgentId,
        /// The other side.
        b: AgentId,
        /// What changed ("married", "fell out").
        change: String,
        /// Emotional impact in `[-100, 100]`.
        impact: f32,
        /// Importance in `[0, 100]`.
        importance: f32,
    },

    /// Anything else.
    Generic {
        /// Free text.
        description: String,
        /// Emotional impact in `[-100, 100]`.
        impact: f32,
        /// Importance in `[0, 100]`.
        importance: f32,
        /// Everyone involved; all of them remember it.
        involved: Vec<AgentId>,
    },
}

impl LifeEvent {
    /// Short name for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Interaction { .. } => "interaction",
            Self::Childbirth { .. } => "childbirth",
            Self::Death { .. } => "death",
            Self::Crime { .. } => "crime",
            Self::Construction { .. } => "construction",
            Self::Learning { .. } => "learning",
            Self::Work { .. } => "work",
            Self::Relationship { .. } => "relationship",
            Self::Generic { .. } => "generic",
        }
    }

    /// Agents who form a memory of this event, without duplicates, in
    /// first-mention order.
    #[must_use]
    pub fn recipients(&self) -> Vec<AgentId> {
        let candidates: Vec<AgentId> = match self {
            Self::Interaction { actor, target, .. } => vec![*actor, *target],
            Self::Childbirth { mother, father, .. } => vec![*mother, *father],
            Self::Death { witnesses, .. } => witnesses.clone(),
            Self::Crime {
                victim, witnesses, ..
            } => witnesses.iter().copied().chain(*victim).collect(),
            Self::Construction { builder, .. } => vec![*builder],
            Self::Learning { agent, .. } | Self::Work { agent, .. } => vec![*agent],
            Self::Relationship { a, b, .. } => vec![*a, *b],
            Self::Generic { involved, .. } => involved.clone(),
        };
        let mut recipients = Vec::with_capacity(candidates.len());
        for agent in candidates {
            if !recipients.contains(&agent) {
                recipients.push(agent);
            }
        }
        recipients
    }

    /// Build the shared draft for this event.
    #[must_use]
    pub fn draft(&self, factory: &MemoryFactory<'_>) -> MemoryDraft {
        match self {
            Self::Interaction {
                actor,
                target,
                action,
                impact,
                importance,
            } => factory.interaction(*actor, *target, action, *impact, *importance),
            Self::Childbirth {
                mother,
                father,
                child,
                child_name,
            } => factory.childbirth(*mother, *father, *child, child_name),
            Self::Death {
                deceased,
                cause,
                witnesses,
            } => factory.death(*deceased, *cause, witnesses),
            Self::Crime {
                perpetrator,
                victim,
                crime_type,
                witnesses,
            } => factory.crime(*perpetrator, *victim, crime_type, witnesses),
            Self::Construction {
                builder,
                building_type,
                building_id,
                location,
            } => factory.construction(*builder, building_type, *building_id, location),
            Self::Learning {
                agent,
                skill,
                level,
                importance,
            } => factory.learning(*agent, skill, *level, *importance),
            Self::Work {
                agent,
                job,
                event,
                impact,
                importance,
            } => factory.work(*agent, job, event, *impact, *importance),
            Self::Relationship {
                a,
                b,
                change,
                impact,
                importance,
            } => factory.relationship(*a, *b, change, *impact, *importance),
            Self::Generic {
                description,
                impact,
                importance,
                involved,
            } => factory.event(description, *impact, *importance, involved.iter().copied()),
        }
    }
}
