//! Property-Based Tests for Chronicle Core
//!
//! Uses `proptest` to check the store invariants under random inputs:
//! relevance ordering, rehearsal, tier capacities, no physical deletion and
//! guaranteed promotion of salient memories.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use chronicle_core::{AgentId, MemoryConfig, MemoryDraft, MemoryKind, MemoryStore, SequentialIds, SimClock};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).single().expect("valid date")
}

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_kind() -> impl Strategy<Value = MemoryKind> {
    prop::sample::select(MemoryKind::ALL.to_vec())
}

fn arb_draft() -> impl Strategy<Value = MemoryDraft> {
    (
        arb_kind(),
        0.0..=100.0f32,
        -100.0..=100.0f32,
        prop::collection::btree_set(0..8u64, 0..4),
    )
        .prop_map(|(kind, importance, impact, agents)| {
            MemoryDraft::of_kind(kind)
                .importance(importance)
                .emotional_impact(impact)
                .related(agents.into_iter().map(AgentId))
                .description(format!("{kind} {importance:.1}"))
        })
}

fn small_store(clock: &Arc<SimClock>, short: usize, long: usize, seed: u64) -> MemoryStore {
    let config = MemoryConfig {
        short_term_capacity: short,
        long_term_capacity: long,
        ..MemoryConfig::default()
    };
    MemoryStore::new(AgentId(100), config, clock.clone())
        .expect("valid config")
        .with_ids(Arc::new(SequentialIds::new()))
        .with_seed(seed)
}

// ---------------------------------------------------------------------------
// Property: relevance strictly decreases with age
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn relevance_decreases_with_age(
        importance in 1.0..=100.0f32,
        hours in 1..10_000i64,
        extra in 1..10_000i64,
    ) {
        let clock = Arc::new(SimClock::new(start()));
        let mut s = small_store(&clock, 20, 100, 0);
        let id = s.add(MemoryDraft::of_kind(MemoryKind::Event).importance(importance)).expect("valid");
        let record = s.get(id).expect("stored");

        let earlier = record.relevance(start() + Duration::hours(hours)).expect("not in the past");
        let later = record.relevance(start() + Duration::hours(hours + extra)).expect("not in the past");
        prop_assert!(later < earlier);
    }
}

// ---------------------------------------------------------------------------
// Property: rehearsal never lowers relevance
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rehearsal_never_lowers_relevance(
        draft in arb_draft(),
        days in 0.0..3650.0f64,
        recalls in 1..20usize,
    ) {
        let clock = Arc::new(SimClock::new(start()));
        let mut s = small_store(&clock, 20, 100, 0);
        let id = s.add(draft).expect("valid");
        let mut untouched = s.get(id).expect("stored").clone();
        untouched.update_decay(days).expect("valid delta");
        let mut rehearsed = untouched.clone();
        for _ in 0..recalls {
            rehearsed.access();
        }
        let now = start() + Duration::days(30);
        let before = untouched.relevance(now).expect("not in the past");
        let after = rehearsed.relevance(now).expect("not in the past");
        prop_assert!(after >= before);
    }
}

// ---------------------------------------------------------------------------
// Property: capacities hold and nothing is ever deleted
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn tiers_respect_capacity_and_log_only_grows(
        drafts in prop::collection::vec(arb_draft(), 1..120),
        short in 1..25usize,
        long in 1..40usize,
        seed in any::<u64>(),
    ) {
        let clock = Arc::new(SimClock::new(start()));
        let mut s = small_store(&clock, short, long, seed);
        let mut previous = 0;
        for (i, draft) in drafts.into_iter().enumerate() {
            clock.advance(Duration::minutes(37));
            s.add(draft).expect("valid");
            prop_assert!(s.short_term().count() <= short);
            if i % 7 == 0 {
                s.consolidate();
                prop_assert!(s.long_term().count() <= long);
            }
            s.tick(1.0).expect("valid hours");
            prop_assert!(s.short_term().count() <= short);
            prop_assert!(s.long_term().count() <= long);
            prop_assert!(s.len() > previous);
            previous = s.len();
        }
        prop_assert_eq!(s.recent_memories(usize::MAX).len(), previous);
    }
}

// ---------------------------------------------------------------------------
// Property: salient memories are always promoted
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn salient_memories_always_promoted(
        importance in 30.5..=100.0f32,
        impact in -100.0..=100.0f32,
        seed in any::<u64>(),
    ) {
        let clock = Arc::new(SimClock::new(start()));
        let mut s = small_store(&clock, 20, 100, seed);
        let id = s
            .add(MemoryDraft::of_kind(MemoryKind::Event).importance(importance).emotional_impact(impact))
            .expect("valid");
        s.consolidate();
        prop_assert!(s.is_in_long_term(id));
    }

    #[test]
    fn strong_feelings_always_promoted(
        importance in 0.0..=30.0f32,
        magnitude in 40.5..=100.0f32,
        negative in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let clock = Arc::new(SimClock::new(start()));
        let mut s = small_store(&clock, 20, 100, seed);
        let impact = if negative { -magnitude } else { magnitude };
        let id = s
            .add(MemoryDraft::of_kind(MemoryKind::Event).importance(importance).emotional_impact(impact))
            .expect("valid");
        s.consolidate();
        prop_assert!(s.is_in_long_term(id));
    }
}

// ---------------------------------------------------------------------------
// Property: opinion stays within [0, 100]
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn opinion_is_bounded(drafts in prop::collection::vec(arb_draft(), 0..40)) {
        let clock = Arc::new(SimClock::new(start()));
        let mut s = small_store(&clock, 20, 100, 1);
        for draft in drafts {
            s.add(draft).expect("valid");
        }
        for agent in 0..8 {
            let opinion = s.opinion_of(AgentId(agent));
            prop_assert!((0.0..=100.0).contains(&opinion), "opinion {}", opinion);
        }
    }
}
