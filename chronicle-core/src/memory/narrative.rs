//! Deterministic textual digest of a store.

use crate::memory::{MemoryRecord, MemoryStore};
use crate::types::AgentDirectory;

impl MemoryStore {
    /// "`<name>` remembers: a, b and c", built from the `max_memories` most
    /// relevant records right now. An empty store yields "`<name>` has no notable
    /// memories."
    #[must_use]
    pub fn summarize<D>(&self, directory: &D, max_memories: usize) -> String
    where
        D: AgentDirectory + ?Sized,
    {
        let name = directory.name_or_placeholder(self.owner);
        if self.records.is_empty() {
            return format!("{name} has no notable memories.");
        }
        let descriptions: Vec<&str> = self
            .most_important_memories(max_memories)
            .into_iter()
            .map(MemoryRecord::description)
            .collect();
        format!("{name} remembers: {}", join_with_and(&descriptions))
    }
}

/// `["a", "b", "c"]` → `"a, b and c"`.
#[must_use]
pub fn join_with_and(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::clock::SimClock;
    use crate::config::MemoryConfig;
    use crate::memory::{MemoryDraft, MemoryKind};
    use crate::types::AgentId;

    fn clock() -> Arc<SimClock> {
        let start = Utc.with_ymd_and_hms(1985, 6, 1, 6, 0, 0).single().expect("valid date");
        Arc::new(SimClock::new(start))
    }

    fn store_on(clock: &Arc<SimClock>) -> MemoryStore {
        MemoryStore::new(AgentId(1), MemoryConfig::default(), clock.clone()).expect("valid config")
    }

    fn store() -> MemoryStore {
        store_on(&clock())
    }

    fn names() -> HashMap<AgentId, String> {
        HashMap::from([(AgentId(1), "Ana".to_string())])
    }

    #[test]
    fn joins_naturally() {
        assert_eq!(join_with_and(&[]), "");
        assert_eq!(join_with_and(&["a"]), "a");
        assert_eq!(join_with_and(&["a", "b"]), "a and b");
        assert_eq!(join_with_and(&["a", "b", "c"]), "a, b and c");
    }

    #[test]
    fn empty_store_has_nothing_to_tell() {
        assert_eq!(store().summarize(&names(), 3), "Ana has no notable memories.");
    }

    #[test]
    fn summary_lists_most_important_first() {
        let mut s = store();
        for (importance, text) in [(40.0, "moved to the village"), (95.0, "had a daughter"), (70.0, "built a mill"), (5.0, "ate bread")] {
            s.add(MemoryDraft::of_kind(MemoryKind::Event).importance(importance).description(text))
                .expect("valid");
        }
        assert_eq!(
            s.summarize(&names(), 3),
            "Ana remembers: had a daughter, built a mill and moved to the village"
        );
    }

    #[test]
    fn summary_puts_fresh_memories_before_faded_ones() {
        let clock = clock();
        let mut s = store_on(&clock);
        s.add(MemoryDraft::of_kind(MemoryKind::Event).importance(90.0).description("saw the comet"))
            .expect("valid");
        clock.advance(Duration::days(60));
        s.add(MemoryDraft::of_kind(MemoryKind::Event).importance(40.0).description("fixed the roof"))
            .expect("valid");
        assert_eq!(s.summarize(&names(), 1), "Ana remembers: fixed the roof");
        assert_eq!(
            s.summarize(&names(), 2),
            "Ana remembers: fixed the roof and saw the comet"
        );
    }

    #[test]
    fn unknown_owner_gets_placeholder_name() {
        let mut s = store();
        s.add(MemoryDraft::of_kind(MemoryKind::Joy).importance(50.0).description("sunrise"))
            .expect("valid");
        let nobody: HashMap<AgentId, String> = HashMap::new();
        assert_eq!(s.summarize(&nobody, 5), "agent #1 remembers: sunrise");
    }
}
