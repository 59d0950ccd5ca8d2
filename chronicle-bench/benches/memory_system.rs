//! Chronicle Benchmark Suite
//!
//! Hot paths of the memory system:
//!   memory_add_into_full_short_term .... insertion with overflow re-sort
//!   consolidate_20_into_100 ............. one consolidation sweep
//!   memories_about_from_500 ............. indexed query with rehearsal
//!   opinion_from_500 .................... relevance-weighted aggregate
//!   world_tick_50_agents ................ one simulated hour, 50 stores

use std::hint::black_box;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use chronicle_core::{AgentId, MemoryConfig, MemoryDraft, MemoryKind, MemoryStore, SequentialIds, SimClock};
use chronicle_sim::{LifeEvent, World, WorldConfig};

fn make_store(records: u32) -> MemoryStore {
    let start = Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).single().unwrap_or_default();
    let clock = Arc::new(SimClock::new(start));
    let mut store = MemoryStore::new(AgentId(0), MemoryConfig::default(), clock.clone())
        .expect("default config is valid")
        .with_ids(Arc::new(SequentialIds::new()))
        .with_seed(1);
    for i in 0..records {
        clock.advance_hours(1);
        store.add(make_draft(i)).expect("valid draft");
        if i % 20 == 19 {
            store.consolidate();
        }
    }
    store
}

fn make_draft(i: u32) -> MemoryDraft {
    MemoryDraft::of_kind(MemoryKind::ALL[i as usize % MemoryKind::ALL.len()])
        .importance((i % 101) as f32)
        .emotional_impact((i % 201) as f32 - 100.0)
        .related([AgentId(u64::from(i % 12) + 1)])
        .description(format!("Event number {i} happened in the town square"))
}

fn bench_add(c: &mut Criterion) {
    let mut store = make_store(20);
    let mut i = 20;
    c.bench_function("memory_add_into_full_short_term", |b| {
        b.iter(|| {
            i += 1;
            black_box(store.add(make_draft(black_box(i))).expect("valid draft"));
        });
    });
}

fn bench_consolidate(c: &mut Criterion) {
    c.bench_function("consolidate_20_into_100", |b| {
        b.iter_batched(
            || {
                let mut store = make_store(100);
                for i in 0..20 {
                    store.add(make_draft(1000 + i)).expect("valid draft");
                }
                store
            },
            |mut store| black_box(store.consolidate()),
            BatchSize::SmallInput,
        );
    });
}

fn bench_queries(c: &mut Criterion) {
    let mut store = make_store(500);
    c.bench_function("memories_about_from_500", |b| {
        b.iter(|| black_box(store.memories_about(black_box(AgentId(3)), 10.0).len()));
    });
    c.bench_function("opinion_from_500", |b| {
        b.iter(|| black_box(store.opinion_of(black_box(AgentId(5)))));
    });
    c.bench_function("most_important_5_from_500", |b| {
        b.iter(|| black_box(store.most_important_memories(5).len()));
    });
}

fn bench_world_tick(c: &mut Criterion) {
    let mut world = World::new(WorldConfig::default().seeded(3)).expect("default config is valid");
    let agents: Vec<AgentId> = (0..50)
        .map(|i| world.spawn_agent(format!("Villager {i}")).expect("spawn"))
        .collect();
    for pair in agents.windows(2) {
        world
            .observe(&LifeEvent::Interaction {
                actor: pair[0],
                target: pair[1],
                action: "greeted".to_string(),
                impact: 10.0,
                importance: 20.0,
            })
            .expect("valid event");
    }

    c.bench_function("world_tick_50_agents", |b| {
        b.iter(|| black_box(world.tick_hour().expect("tick")));
    });
}

criterion_group!(benches, bench_add, bench_consolidate, bench_queries, bench_world_tick);
criterion_main!(benches);
