//! Retrieval over a [`MemoryStore`].
//!
//! Every query scans the whole arena (or one index), so forgotten records
//! still answer queries. Results borrow from the store.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::memory::{MemoryKind, MemoryRecord, MemoryStore};
use crate::types::AgentId;

impl MemoryStore {
    /// Memories involving `agent` with relevance at or above `min_relevance`,
    /// most relevant first.
    ///
    /// Recalling someone strengthens what you remember about them: every
    /// returned record is accessed once.
    pub fn memories_about(&mut self, agent: AgentId, min_relevance: f64) -> Vec<&MemoryRecord> {
        let Some(indices) = self.by_agent.get(&agent) else {
            return Vec::new();
        };
        let hits = self.ranked_above(indices.iter().copied(), min_relevance);
        for &idx in &hits {
            self.touch(idx);
        }
        hits.into_iter().map(|idx| &self.records[idx]).collect()
    }

    /// Memories of `kind` with relevance at or above `min_relevance`, most
    /// relevant first.
    #[must_use]
    pub fn memories_of_kind(&self, kind: MemoryKind, min_relevance: f64) -> Vec<&MemoryRecord> {
        let matching = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.kind() == kind)
            .map(|(idx, _)| idx);
        self.ranked_above(matching, min_relevance)
            .into_iter()
            .map(|idx| &self.records[idx])
            .collect()
    }

    /// The `count` newest memories by timestamp.
    #[must_use]
    pub fn recent_memories(&self, count: usize) -> Vec<&MemoryRecord> {
        let mut all: Vec<&MemoryRecord> = self.records.iter().collect();
        all.sort_by_key(|r| Reverse(r.timestamp()));
        all.truncate(count);
        all
    }

    /// The `count` memories with the highest current relevance.
    ///
    /// Old memories fade: a decayed record can rank below a fresher, less
    /// important one. Nothing is accessed.
    #[must_use]
    pub fn most_important_memories(&self, count: usize) -> Vec<&MemoryRecord> {
        let mut ranked = self.ranked_above(0..self.records.len(), f64::NEG_INFINITY);
        ranked.truncate(count);
        ranked.into_iter().map(|idx| &self.records[idx]).collect()
    }

    /// Up to `count` strongly emotional memories.
    ///
    /// `positive` reads the happy list, strongest joy first; otherwise the
    /// traumatic list, most painful first.
    #[must_use]
    pub fn emotional_memories(&self, positive: bool, count: usize) -> Vec<&MemoryRecord> {
        let (indices, sign) = if positive {
            (&self.happy, -1.0)
        } else {
            (&self.traumatic, 1.0)
        };
        let mut picked: Vec<&MemoryRecord> = indices.iter().map(|&idx| &self.records[idx]).collect();
        picked.sort_by_key(|r| OrderedFloat(sign * r.emotional_impact()));
        picked.truncate(count);
        picked
    }

    /// Arena positions from `candidates` at or above `min_relevance`, sorted
    /// by relevance descending. Stable, so ties keep candidate order.
    fn ranked_above(&self, candidates: impl Iterator<Item = usize>, min_relevance: f64) -> Vec<usize> {
        let now = self.clock.now();
        let mut scored: Vec<(OrderedFloat<f64>, usize)> = candidates
            .map(|idx| (OrderedFloat(self.records[idx].relevance_at(now)), idx))
            .filter(|(score, _)| score.0 >= min_relevance)
            .collect();
        scored.sort_by_key(|&(score, _)| Reverse(score));
        scored.into_iter().map(|(_, idx)| idx).collect()
    }
}
