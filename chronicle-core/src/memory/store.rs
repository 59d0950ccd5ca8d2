//! The per-agent memory store.
//!
//! Records live once, in an append-only arena (`records`). The short-term
//! and long-term tiers, the traumatic/happy lists and the related-agent index
//! only hold arena positions, so dropping a record from a tier never deletes
//! it.
//!
//! ```text
//!   add ──▶ short-term (cap S) ──consolidate──▶ long-term (cap L)
//!              │   overflow: keep top-S            │  overflow: keep top-L
//!              ▼                                   ▼
//!            (still in records and indexes, never deleted)
//! ```

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, debug_span, info, trace, warn};

use crate::clock::Clock;
use crate::config::MemoryConfig;
use crate::error::{ChronicleError, Result};
use crate::memory::{MemoryDraft, MemoryRecord};
use crate::metrics::MemoryCounters;
use crate::types::{AgentId, IdGenerator, MemoryId, RandomIds};

/// Records more important than this can be filed as traumatic or happy.
pub const CLASSIFY_IMPORTANCE: f32 = 70.0;
/// Impact below this (with high importance) marks a traumatic memory.
pub const TRAUMATIC_IMPACT: f32 = -50.0;
/// Impact above this (with high importance) marks a happy memory.
pub const HAPPY_IMPACT: f32 = 50.0;
/// Importance above this guarantees promotion at consolidation.
pub const SALIENT_IMPORTANCE: f32 = 30.0;
/// `|impact|` above this guarantees promotion at consolidation.
pub const SALIENT_IMPACT: f32 = 40.0;
/// Survival chance of a zero-importance record at consolidation.
pub const BASE_SURVIVAL_CHANCE: f64 = 0.3;

/// Reaction hook for the owning agent, called synchronously after each add.
pub trait MemoryListener: Send {
    /// A record was just stored for `owner`.
    fn on_memory_added(&mut self, owner: AgentId, record: &MemoryRecord);
}

impl<F> MemoryListener for F
where
    F: FnMut(AgentId, &MemoryRecord) + Send,
{
    fn on_memory_added(&mut self, owner: AgentId, record: &MemoryRecord) {
        self(owner, record);
    }
}

/// What one consolidation sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Records newly placed in long-term.
    pub promoted: usize,
    /// Short-term records that failed their survival roll.
    pub forgotten: usize,
    /// Records dropped from long-term to respect its capacity.
    pub evicted: usize,
}

/// What one [`MemoryStore::tick`] call triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Set when consolidation ran.
    pub consolidation: Option<ConsolidationReport>,
    /// Number of records touched, set when the decay sweep ran.
    pub decayed: Option<usize>,
}

/// Size snapshot of a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// All records ever retained.
    pub total: usize,
    /// Records in the short-term tier.
    pub short_term: usize,
    /// Records in the long-term tier.
    pub long_term: usize,
    /// Records filed as traumatic.
    pub traumatic: usize,
    /// Records filed as happy.
    pub happy: usize,
    /// Distinct agents referenced by at least one record.
    pub known_agents: usize,
}

/// All memories of one agent.
///
/// Not internally synchronised: `add`/`tick` calls on one store are expected
/// to be serialised by the owning simulation step. Distinct stores share no
/// mutable state and can be processed on different threads.
pub struct MemoryStore {
    pub(super) owner: AgentId,
    pub(super) config: MemoryConfig,
    pub(super) clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    rng: StdRng,
    pub(super) counters: Arc<MemoryCounters>,
    listener: Option<Box<dyn MemoryListener>>,

    pub(super) records: Vec<MemoryRecord>,
    positions: HashMap<MemoryId, usize>,
    short_term: Vec<usize>,
    long_term: Vec<usize>,
    pub(super) traumatic: Vec<usize>,
    pub(super) happy: Vec<usize>,
    pub(super) by_agent: HashMap<AgentId, Vec<usize>>,

    consolidation_timer: f32,
    decay_timer: f32,
}

impl MemoryStore {
    /// Create an empty store for `owner`.
    ///
    /// Uses random ids, an entropy-seeded RNG and private counters until
    /// replaced with the `with_*` builders.
    ///
    /// # Errors
    /// `Config` if `config` holds out-of-range values.
    pub fn new(owner: AgentId, config: MemoryConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            owner,
            config,
            clock,
            ids: Arc::new(RandomIds),
            rng: StdRng::from_entropy(),
            counters: Arc::new(MemoryCounters::new()),
            listener: None,
            records: Vec::new(),
            positions: HashMap::new(),
            short_term: Vec::new(),
            long_term: Vec::new(),
            traumatic: Vec::new(),
            happy: Vec::new(),
            by_agent: HashMap::new(),
            consolidation_timer: 0.0,
            decay_timer: 0.0,
        })
    }

    /// Use a shared id generator.
    #[must_use]
    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Seed the consolidation RNG for reproducible forgetting.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Report into shared counters.
    #[must_use]
    pub fn with_counters(mut self, counters: Arc<MemoryCounters>) -> Self {
        self.counters = counters;
        self
    }

    /// Notify `listener` after every successful add.
    #[must_use]
    pub fn with_listener(mut self, listener: impl MemoryListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Store a new memory.
    ///
    /// Assigns an id, defaults the timestamp to "now", files the record in
    /// short-term (trimming to the top-`S` by relevance on overflow), in the
    /// traumatic/happy lists when it qualifies, and under every related agent.
    /// The listener is notified last.
    ///
    /// # Errors
    /// `MissingField`/`InvalidArgument` from draft validation. The store is
    /// untouched on error.
    pub fn add(&mut self, draft: MemoryDraft) -> Result<MemoryId> {
        let now = self.clock.now();
        let record = match draft.into_record(self.ids.next_id(), now, self.config.default_decay_rate) {
            Ok(record) => record,
            Err(e) => {
                MemoryCounters::add(&self.counters.rejected_inputs, 1);
                warn!(owner = %self.owner, error = %e, "rejected memory draft");
                return Err(e);
            }
        };

        let id = record.id();
        let idx = self.records.len();

        if record.importance() > CLASSIFY_IMPORTANCE {
            if record.emotional_impact() < TRAUMATIC_IMPACT {
                self.traumatic.push(idx);
            } else if record.emotional_impact() > HAPPY_IMPACT {
                self.happy.push(idx);
            }
        }
        for agent in record.related_agents() {
            self.by_agent.entry(*agent).or_default().push(idx);
        }

        debug!(
            owner = %self.owner,
            memory = %id,
            kind = %record.kind(),
            importance = record.importance(),
            impact = record.emotional_impact(),
            "stored memory: {}",
            record.description()
        );
        self.records.push(record);
        self.positions.insert(id, idx);
        self.short_term.push(idx);

        let evicted = keep_most_relevant(&self.records, &mut self.short_term, self.config.short_term_capacity, now);
        MemoryCounters::add(&self.counters.records_added, 1);
        MemoryCounters::add(&self.counters.short_term_evictions, evicted);

        if let Some(listener) = self.listener.as_mut() {
            listener.on_memory_added(self.owner, &self.records[idx]);
        }
        Ok(id)
    }

    /// One simulated hour has passed: advance both sweep timers by one and
    /// run whichever sweeps came due.
    ///
    /// Every call counts as exactly one hour. `hours` is checked but does
    /// not scale the timers, so cadence is set by how often the host calls.
    /// Each sweep runs at most once per call and then resets its timer.
    ///
    /// # Errors
    /// `InvalidArgument` if `hours` is negative or not finite (no timer moves).
    pub fn tick(&mut self, hours: f32) -> Result<TickReport> {
        if !hours.is_finite() || hours < 0.0 {
            MemoryCounters::add(&self.counters.rejected_inputs, 1);
            return Err(ChronicleError::invalid(
                "hours",
                format!("must be a non-negative number of hours, got {hours}"),
            ));
        }

        self.consolidation_timer += 1.0;
        self.decay_timer += 1.0;

        let mut report = TickReport::default();
        if self.consolidation_timer >= self.config.consolidation_interval_hours {
            report.consolidation = Some(self.consolidate());
            self.consolidation_timer = 0.0;
        }
        if self.decay_timer >= self.config.decay_interval_hours {
            report.decayed = Some(self.decay_sweep());
            self.decay_timer = 0.0;
        }
        Ok(report)
    }

    /// Move short-term memories into long-term.
    ///
    /// Salient records (importance > 30 or |impact| > 40) always survive;
    /// the rest survive with probability `0.3 + importance/100 · 0.7`.
    /// Short-term is emptied either way, then long-term is trimmed to its
    /// top-`L` by relevance. Forgotten records stay in `records` and indexes.
    pub fn consolidate(&mut self) -> ConsolidationReport {
        let _span = debug_span!("chronicle::consolidate", owner = %self.owner).entered();
        let mut report = ConsolidationReport::default();

        for idx in std::mem::take(&mut self.short_term) {
            let record = &self.records[idx];
            let survives = is_salient(record) || self.rng.gen_bool(survival_chance(record.importance()));
            if survives {
                if !self.long_term.contains(&idx) {
                    self.long_term.push(idx);
                    report.promoted += 1;
                }
            } else {
                report.forgotten += 1;
                debug!(owner = %self.owner, memory = %record.id(), "forgot memory: {}", record.description());
            }
        }

        let now = self.clock.now();
        report.evicted = keep_most_relevant(&self.records, &mut self.long_term, self.config.long_term_capacity, now);

        MemoryCounters::add(&self.counters.consolidations, 1);
        MemoryCounters::add(&self.counters.promotions, report.promoted);
        MemoryCounters::add(&self.counters.forgotten, report.forgotten);
        MemoryCounters::add(&self.counters.long_term_evictions, report.evicted);
        info!(
            owner = %self.owner,
            promoted = report.promoted,
            forgotten = report.forgotten,
            evicted = report.evicted,
            long_term = self.long_term.len(),
            "consolidated memories"
        );
        report
    }

    /// Apply one sweep's worth of natural fading to every record.
    ///
    /// Returns the number of records touched.
    pub fn decay_sweep(&mut self) -> usize {
        let _span = debug_span!("chronicle::decay", owner = %self.owner).entered();
        let amount = self.config.daily_decay_amount;
        for record in &mut self.records {
            record.apply_decay(amount);
        }
        MemoryCounters::add(&self.counters.decay_sweeps, 1);
        trace!(owner = %self.owner, records = self.records.len(), amount, "decay sweep");
        self.records.len()
    }

    /// Explicitly recall a memory, strengthening it.
    pub fn recall(&mut self, id: MemoryId) -> Option<&MemoryRecord> {
        let idx = *self.positions.get(&id)?;
        self.touch(idx);
        Some(&self.records[idx])
    }

    pub(super) fn touch(&mut self, idx: usize) {
        self.records[idx].access();
        MemoryCounters::add(&self.counters.recalls, 1);
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// The agent owning this store.
    #[must_use]
    pub fn owner(&self) -> AgentId {
        self.owner
    }

    /// Tier and sweep settings.
    #[must_use]
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// "Now" according to the store's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Number of records ever retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record was ever added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look a record up by id.
    #[must_use]
    pub fn get(&self, id: MemoryId) -> Option<&MemoryRecord> {
        self.positions.get(&id).map(|&idx| &self.records[idx])
    }

    /// Every record, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[MemoryRecord] {
        &self.records
    }

    /// Short-term tier contents.
    pub fn short_term(&self) -> impl Iterator<Item = &MemoryRecord> + '_ {
        self.short_term.iter().map(|&idx| &self.records[idx])
    }

    /// Long-term tier contents.
    pub fn long_term(&self) -> impl Iterator<Item = &MemoryRecord> + '_ {
        self.long_term.iter().map(|&idx| &self.records[idx])
    }

    /// Records filed as traumatic at insertion, in insertion order.
    pub fn traumatic(&self) -> impl Iterator<Item = &MemoryRecord> + '_ {
        self.traumatic.iter().map(|&idx| &self.records[idx])
    }

    /// Records filed as happy at insertion, in insertion order.
    pub fn happy(&self) -> impl Iterator<Item = &MemoryRecord> + '_ {
        self.happy.iter().map(|&idx| &self.records[idx])
    }

    /// Agents referenced by at least one record.
    pub fn known_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.by_agent.keys().copied()
    }

    /// Whether `id` currently sits in short-term.
    #[must_use]
    pub fn is_in_short_term(&self, id: MemoryId) -> bool {
        self.positions
            .get(&id)
            .is_some_and(|idx| self.short_term.contains(idx))
    }

    /// Whether `id` currently sits in long-term.
    #[must_use]
    pub fn is_in_long_term(&self, id: MemoryId) -> bool {
        self.positions
            .get(&id)
            .is_some_and(|idx| self.long_term.contains(idx))
    }

    /// Hours accumulated towards the next consolidation.
    #[must_use]
    pub fn consolidation_timer(&self) -> f32 {
        self.consolidation_timer
    }

    /// Hours accumulated towards the next decay sweep.
    #[must_use]
    pub fn decay_timer(&self) -> f32 {
        self.decay_timer
    }

    /// Size snapshot.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total: self.records.len(),
            short_term: self.short_term.len(),
            long_term: self.long_term.len(),
            traumatic: self.traumatic.len(),
            happy: self.happy.len(),
            known_agents: self.by_agent.len(),
        }
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("owner", &self.owner)
            .field("stats", &self.stats())
            .field("consolidation_timer", &self.consolidation_timer)
            .field("decay_timer", &self.decay_timer)
            .finish_non_exhaustive()
    }
}

fn is_salient(record: &MemoryRecord) -> bool {
    record.importance() > SALIENT_IMPORTANCE || record.emotional_impact().abs() > SALIENT_IMPACT
}

/// Chance that a non-salient record survives consolidation.
#[must_use]
pub fn survival_chance(importance: f32) -> f64 {
    (BASE_SURVIVAL_CHANCE + f64::from(importance) / 100.0 * (1.0 - BASE_SURVIVAL_CHANCE)).clamp(0.0, 1.0)
}

/// Trim `tier` to its `capacity` most relevant entries, returning how many
/// were dropped. The sort is stable, so equal relevance keeps tier order.
fn keep_most_relevant(
    records: &[MemoryRecord],
    tier: &mut Vec<usize>,
    capacity: usize,
    now: DateTime<Utc>,
) -> usize {
    if tier.len() <= capacity {
        return 0;
    }
    let mut scored: Vec<(OrderedFloat<f64>, usize)> = tier
        .iter()
        .map(|&idx| (OrderedFloat(records[idx].relevance_at(now)), idx))
        .collect();
    scored.sort_by_key(|&(score, _)| Reverse(score));
    let dropped = scored.len() - capacity;
    *tier = scored.into_iter().take(capacity).map(|(_, idx)| idx).collect();
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimClock;
    use crate::memory::MemoryKind;
    use crate::types::SequentialIds;
    use chrono::TimeZone;
    use std::sync::Mutex;

    fn clock() -> Arc<SimClock> {
        let start = Utc.with_ymd_and_hms(1985, 6, 1, 6, 0, 0).single().expect("valid date");
        Arc::new(SimClock::new(start))
    }

    fn store_with(config: MemoryConfig, clock: &Arc<SimClock>) -> MemoryStore {
        MemoryStore::new(AgentId(1), config, clock.clone())
            .expect("valid config")
            .with_ids(Arc::new(SequentialIds::new()))
            .with_seed(7)
    }

    fn store(clock: &Arc<SimClock>) -> MemoryStore {
        store_with(MemoryConfig::default(), clock)
    }

    fn draft(importance: f32, impact: f32) -> MemoryDraft {
        MemoryDraft::of_kind(MemoryKind::Event)
            .importance(importance)
            .emotional_impact(impact)
            .description(format!("event {importance}/{impact}"))
    }

    #[test]
    fn add_places_record_everywhere_it_belongs() {
        let clock = clock();
        let mut s = store(&clock);
        let id = s
            .add(draft(80.0, -70.0).related([AgentId(2), AgentId(3)]))
            .expect("valid");

        assert_eq!(s.len(), 1);
        assert!(s.is_in_short_term(id));
        assert!(!s.is_in_long_term(id));
        assert_eq!(s.traumatic().count(), 1);
        assert_eq!(s.happy().count(), 0);
        let stats = s.stats();
        assert_eq!(stats.known_agents, 2);
        assert_eq!(s.get(id).map(MemoryRecord::timestamp), Some(clock.now()));
    }

    #[test]
    fn classification_needs_high_importance() {
        let clock = clock();
        let mut s = store(&clock);
        s.add(draft(70.0, 90.0)).expect("valid"); // importance not > 70
        s.add(draft(71.0, 51.0)).expect("valid");
        s.add(draft(71.0, 50.0)).expect("valid"); // impact not > 50
        assert_eq!(s.happy().count(), 1);
        assert_eq!(s.traumatic().count(), 0);
    }

    #[test]
    fn rejected_draft_leaves_store_untouched() {
        let clock = clock();
        let mut s = store(&clock);
        let before = s.stats();
        assert!(s.add(MemoryDraft::default().importance(5.0)).is_err());
        assert!(s.add(draft(500.0, 0.0)).is_err());
        assert_eq!(s.stats(), before);
        assert_eq!(s.counters.snapshot().rejected_inputs, 2);
    }

    #[test]
    fn short_term_overflow_keeps_most_relevant() {
        let clock = clock();
        let config = MemoryConfig {
            short_term_capacity: 3,
            ..MemoryConfig::default()
        };
        let mut s = store_with(config, &clock);
        let ids: Vec<_> = [5.0, 50.0, 10.0, 40.0]
            .into_iter()
            .map(|imp| s.add(draft(imp, 0.0)).expect("valid"))
            .collect();

        assert_eq!(s.short_term().count(), 3);
        assert!(!s.is_in_short_term(ids[0]));
        assert_eq!(s.len(), 4);
        assert_eq!(s.counters.snapshot().short_term_evictions, 1);
    }

    #[test]
    fn short_term_overflow_evicts_faded_memories_first() {
        let clock = clock();
        let config = MemoryConfig {
            short_term_capacity: 2,
            ..MemoryConfig::default()
        };
        let mut s = store_with(config, &clock);
        let faded = s.add(draft(90.0, 0.0)).expect("valid");
        clock.advance_days(60);
        let recent = s.add(draft(40.0, 0.0)).expect("valid");
        let newest = s.add(draft(30.0, 0.0)).expect("valid");

        assert!(!s.is_in_short_term(faded));
        assert!(s.is_in_short_term(recent));
        assert!(s.is_in_short_term(newest));
        assert!(s.get(faded).is_some());
    }

    #[test]
    fn listener_sees_every_added_record() {
        let clock = clock();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut s = store(&clock).with_listener(move |owner: AgentId, record: &MemoryRecord| {
            sink.lock().expect("not poisoned").push((owner, record.id()));
        });
        let id = s.add(draft(10.0, 0.0)).expect("valid");
        let seen = seen.lock().expect("not poisoned");
        assert_eq!(seen.as_slice(), &[(AgentId(1), id)]);
    }

    #[test]
    fn consolidation_promotes_salient_and_empties_short_term() {
        let clock = clock();
        let mut s = store(&clock);
        let important = s.add(draft(80.0, 0.0)).expect("valid");
        let upsetting = s.add(draft(5.0, -60.0)).expect("valid");
        let report = s.consolidate();

        assert!(s.is_in_long_term(important));
        assert!(s.is_in_long_term(upsetting));
        assert!(report.promoted >= 2);
        assert_eq!(s.short_term().count(), 0);
    }

    #[test]
    fn forgotten_records_remain_in_the_store() {
        let clock = clock();
        let mut s = store(&clock);
        for _ in 0..50 {
            s.add(draft(0.0, 0.0).related([AgentId(9)])).expect("valid");
            s.consolidate();
        }
        let forgotten = s.counters.snapshot().forgotten;
        assert!(forgotten > 0, "with 50 rolls at 30% some must be forgotten");
        assert_eq!(s.len(), 50);
        assert_eq!(s.by_agent[&AgentId(9)].len(), 50);
        assert_eq!(s.long_term().count() + usize::try_from(forgotten).expect("small"), 50);
    }

    #[test]
    fn long_term_is_trimmed_to_capacity() {
        let clock = clock();
        let config = MemoryConfig {
            long_term_capacity: 4,
            ..MemoryConfig::default()
        };
        let mut s = store_with(config, &clock);
        for i in 0..10u8 {
            s.add(draft(40.0 + f32::from(i), 0.0)).expect("valid");
        }
        let report = s.consolidate();
        assert_eq!(s.long_term().count(), 4);
        assert_eq!(report.evicted, 6);
        assert!(s.long_term().all(|r| r.importance() >= 46.0));
    }

    #[test]
    fn tick_runs_sweeps_on_their_own_schedules() {
        let clock = clock();
        let mut s = store(&clock);
        s.add(draft(90.0, 0.0)).expect("valid");

        let mut consolidations = 0;
        let mut decays = 0;
        for _ in 0..24 {
            let report = s.tick(1.0).expect("valid hours");
            consolidations += usize::from(report.consolidation.is_some());
            decays += usize::from(report.decayed.is_some());
        }
        assert_eq!(consolidations, 4);
        assert_eq!(decays, 1);
        assert!(s.decay_timer().abs() < f32::EPSILON);
    }

    #[test]
    fn every_tick_counts_as_one_hour() {
        let clock = clock();
        let mut s = store(&clock);
        s.add(draft(90.0, 0.0)).expect("valid");

        let due: Vec<usize> = (1..=12)
            .filter(|_| s.tick(0.5).expect("valid hours").consolidation.is_some())
            .collect();
        assert_eq!(due, [6, 12]);

        let report = s.tick(72.0).expect("valid hours");
        assert!(report.consolidation.is_none());
        assert!(report.decayed.is_none());
        assert!((s.consolidation_timer() - 1.0).abs() < f32::EPSILON);
        assert!((s.decay_timer() - 13.0).abs() < f32::EPSILON);
        assert_eq!(s.counters.snapshot().decay_sweeps, 0);
    }

    #[test]
    fn negative_tick_is_rejected() {
        let clock = clock();
        let mut s = store(&clock);
        assert!(s.tick(-1.0).is_err());
        assert!(s.tick(f32::INFINITY).is_err());
        assert!(s.consolidation_timer().abs() < f32::EPSILON);
    }

    #[test]
    fn decay_sweep_touches_every_record() {
        let clock = clock();
        let mut s = store(&clock);
        s.add(draft(0.0, 0.0)).expect("valid");
        s.add(draft(100.0, 0.0)).expect("valid");
        assert_eq!(s.decay_sweep(), 2);
        let levels: Vec<f32> = s.records().iter().map(MemoryRecord::decay_level).collect();
        assert!((levels[0] - 0.1 / 365.0).abs() < 1e-7);
        assert!((levels[1] - 0.05 / 365.0).abs() < 1e-7);
    }

    #[test]
    fn recall_strengthens_and_counts() {
        let clock = clock();
        let mut s = store(&clock);
        let id = s.add(draft(20.0, 0.0)).expect("valid");
        assert_eq!(s.recall(id).map(MemoryRecord::access_count), Some(2));
        assert!(s.recall(MemoryId(uuid::Uuid::nil())).is_none());
        assert_eq!(s.counters.snapshot().recalls, 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let clock = clock();
        let config = MemoryConfig {
            decay_interval_hours: 0.0,
            ..MemoryConfig::default()
        };
        assert!(MemoryStore::new(AgentId(1), config, clock).is_err());
    }

    #[test]
    fn survival_chance_matches_formula() {
        assert!((survival_chance(0.0) - 0.3).abs() < 1e-12);
        assert!((survival_chance(10.0) - 0.37).abs() < 1e-12);
        assert!((survival_chance(100.0) - 1.0).abs() < 1e-12);
    }
}
