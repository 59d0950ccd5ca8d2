//! The world driver: one [`MemoryStore`] per living agent, a shared
//! simulated clock, and an hourly tick.
//!
//! ```text
//!   LifeEvent ──observe──▶ MemoryFactory ──draft──▶ store of each recipient
//!   tick_hour ──▶ clock += 1h ──▶ store.tick(1.0) for every agent
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn};

use chronicle_core::metrics::MemoryCounters;
use chronicle_core::{
    AgentId, Attitude, ChronicleError, Clock, MemoryDraft, MemoryFactory, MemoryStore, Result,
    SequentialIds, SimClock, TickBudgetMonitor,
};
use chronicle_core::types::MemoryId;

use crate::config::WorldConfig;
use crate::events::LifeEvent;
use crate::registry::AgentRegistry;

/// What one simulated hour did across all stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourReport {
    /// Hours elapsed since the world began, including this one.
    pub hour: u64,
    /// Stores that ran consolidation this hour.
    pub consolidations: usize,
    /// Stores that ran a decay sweep this hour.
    pub decay_sweeps: usize,
}

/// A population of remembering agents.
pub struct World {
    config: WorldConfig,
    clock: Arc<SimClock>,
    registry: AgentRegistry,
    ids: Arc<SequentialIds>,
    counters: Arc<MemoryCounters>,
    monitor: TickBudgetMonitor,
    stores: BTreeMap<AgentId, MemoryStore>,
    hours: u64,
}

impl World {
    /// Create an empty world at `config.world.start_time`.
    ///
    /// # Errors
    /// `Config` if the configuration holds out-of-range values.
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.chronicle.validate()?;
        let monitor = TickBudgetMonitor::new(config.chronicle.telemetry.tick_budget_ms);
        Ok(Self {
            clock: Arc::new(SimClock::new(config.world.start_time)),
            registry: AgentRegistry::new(),
            ids: Arc::new(SequentialIds::new()),
            counters: Arc::new(MemoryCounters::new()),
            monitor,
            stores: BTreeMap::new(),
            hours: 0,
            config,
        })
    }

    // -----------------------------------------------------------------------
    // Population
    // -----------------------------------------------------------------------

    /// Bring a new agent into the world with an empty memory.
    ///
    /// # Errors
    /// Only if the store cannot be built from the world's memory settings.
    pub fn spawn_agent(&mut self, name: impl Into<String>) -> Result<AgentId> {
        let name = name.into();
        let agent = self.registry.register(name.clone());
        let store = MemoryStore::new(agent, self.config.chronicle.memory.clone(), self.clock.clone())?
            .with_ids(self.ids.clone())
            .with_counters(self.counters.clone());
        let store = match self.config.world.seed {
            Some(seed) => store.with_seed(seed.wrapping_add(agent.0)),
            None => store,
        };
        self.stores.insert(agent, store);
        info!(%agent, %name, "agent spawned");
        Ok(agent)
    }

    /// Remove an agent's memory from the world.
    ///
    /// The name stays registered so that others can still speak of them.
    ///
    /// # Errors
    /// `UnknownAgent` if `agent` has no store.
    pub fn despawn_agent(&mut self, agent: AgentId) -> Result<MemoryStore> {
        let store = self
            .stores
            .remove(&agent)
            .ok_or(ChronicleError::UnknownAgent(agent))?;
        info!(%agent, memories = store.len(), "agent despawned");
        Ok(store)
    }

    /// Read access to an agent's memory.
    ///
    /// # Errors
    /// `UnknownAgent` if `agent` has no store.
    pub fn store(&self, agent: AgentId) -> Result<&MemoryStore> {
        self.stores.get(&agent).ok_or(ChronicleError::UnknownAgent(agent))
    }

    /// Write access to an agent's memory.
    ///
    /// # Errors
    /// `UnknownAgent` if `agent` has no store.
    pub fn store_mut(&mut self, agent: AgentId) -> Result<&mut MemoryStore> {
        self.stores
            .get_mut(&agent)
            .ok_or(ChronicleError::UnknownAgent(agent))
    }

    // -----------------------------------------------------------------------
    // Memory creation
    // -----------------------------------------------------------------------

    /// Add a hand-built memory to `owner`'s store.
    ///
    /// # Errors
    /// `UnknownAgent`, or the store's validation error.
    pub fn record(&mut self, owner: AgentId, draft: MemoryDraft) -> Result<MemoryId> {
        self.store_mut(owner)?.add(draft)
    }

    /// Let every recipient of `event` remember it.
    ///
    /// Each recipient gets its own record. Recipients without a store (never
    /// spawned, or despawned) are skipped.
    ///
    /// # Errors
    /// The store's validation error if the event carries out-of-range scores.
    /// Every recipient sees the same draft, so either all copies are stored or
    /// the first one fails and none are.
    pub fn observe(&mut self, event: &LifeEvent) -> Result<Vec<MemoryId>> {
        let factory = MemoryFactory::new(&self.registry);
        let draft = event.draft(&factory);

        let mut stored = Vec::new();
        for recipient in event.recipients() {
            let Some(store) = self.stores.get_mut(&recipient) else {
                debug!(%recipient, event = event.label(), "recipient has no memory store, skipping");
                continue;
            };
            stored.push(store.add(draft.clone())?);
        }
        debug!(event = event.label(), recipients = stored.len(), "event observed");
        Ok(stored)
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Advance one simulated hour and tick every store.
    ///
    /// # Errors
    /// Propagates a store's tick error (not expected with a fixed step).
    pub fn tick_hour(&mut self) -> Result<HourReport> {
        let _span = info_span!("chronicle::world_tick", hour = self.hours + 1).entered();
        let slow_ms = self.config.chronicle.telemetry.log_slow_operations_ms;
        let mut report = HourReport {
            hour: self.hours + 1,
            ..HourReport::default()
        };
        {
            let _guard = self.monitor.begin_tick();
            self.clock.advance_hours(1);
            for (agent, store) in &mut self.stores {
                let started = Instant::now();
                let tick = store.tick(1.0)?;
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                if elapsed_ms > slow_ms {
                    warn!(%agent, elapsed_ms, memories = store.len(), "slow memory tick");
                }
                report.consolidations += usize::from(tick.consolidation.is_some());
                report.decay_sweeps += usize::from(tick.decayed.is_some());
            }
        }
        self.hours += 1;

        if self.monitor.is_over_budget() {
            warn!(
                hour = self.hours,
                elapsed_ms = self.monitor.last_tick_ms(),
                budget_ms = self.monitor.budget_ms(),
                agents = self.stores.len(),
                "world tick over budget"
            );
        }
        Ok(report)
    }

    /// Run `hours` consecutive hourly ticks.
    ///
    /// # Errors
    /// Stops at the first failing tick.
    pub fn run_hours(&mut self, hours: u32) -> Result<Vec<HourReport>> {
        (0..hours).map(|_| self.tick_hour()).collect()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// `owner`'s opinion of `about`, in `[0, 100]`.
    ///
    /// # Errors
    /// `UnknownAgent` if `owner` has no store.
    pub fn opinion(&self, owner: AgentId, about: AgentId) -> Result<f64> {
        Ok(self.store(owner)?.opinion_of(about))
    }

    /// `owner`'s attitude toward `about`.
    ///
    /// # Errors
    /// `UnknownAgent` if `owner` has no store.
    pub fn attitude(&self, owner: AgentId, about: AgentId) -> Result<Attitude> {
        Ok(self.store(owner)?.attitude_toward(about))
    }

    /// `owner`'s life story from their `max_memories` most important memories.
    ///
    /// # Errors
    /// `UnknownAgent` if `owner` has no store.
    pub fn narrative(&self, owner: AgentId, max_memories: usize) -> Result<String> {
        Ok(self.store(owner)?.summarize(&self.registry, max_memories))
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Current simulated time.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Hours ticked so far.
    #[must_use]
    pub fn hours_elapsed(&self) -> u64 {
        self.hours
    }

    /// Names and ids.
    #[must_use]
    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Names and ids, mutable (renames).
    pub fn registry_mut(&mut self) -> &mut AgentRegistry {
        &mut self.registry
    }

    /// Agents that currently have a memory store, in id order.
    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.stores.keys().copied()
    }

    /// Counters shared by every store.
    #[must_use]
    pub fn counters(&self) -> &MemoryCounters {
        &self.counters
    }

    /// Tick timing history.
    #[must_use]
    pub fn monitor(&self) -> &TickBudgetMonitor {
        &self.monitor
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("now", &self.now())
            .field("hours", &self.hours)
            .field("agents", &self.stores.len())
            .finish_non_exhaustive()
    }
}
