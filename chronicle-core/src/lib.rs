//! # Chronicle Core
//!
//! Episodic memory for the inhabitants of a life simulation.
//!
//! Every agent owns a [`MemoryStore`]: an append-only log of
//! [`MemoryRecord`]s with two bounded working sets on top of it.
//!
//! - **Short-term**: everything recent, capped at `S` by relevance
//! - **Long-term**: what survived consolidation, capped at `L`
//! - **Traumatic / happy**: strong experiences, filed once at insertion
//! - **By agent**: every record indexed under each agent it involves
//!
//! Relevance combines importance, age, accumulated decay and rehearsal.
//! The owning simulation calls [`MemoryStore::tick`] once per simulated hour;
//! consolidation and decay sweeps run on their own schedules from there.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use chronicle_core::{AgentId, MemoryConfig, MemoryDraft, MemoryKind, MemoryStore, SystemClock};
//!
//! let mut store = MemoryStore::new(AgentId(1), MemoryConfig::default(), Arc::new(SystemClock))?;
//! store.add(
//!     MemoryDraft::of_kind(MemoryKind::Interaction)
//!         .importance(40.0)
//!         .emotional_impact(30.0)
//!         .related([AgentId(2)])
//!         .description("shared bread with a neighbour"),
//! )?;
//! assert!(store.opinion_of(AgentId(2)) > 50.0);
//! # Ok::<(), chronicle_core::ChronicleError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod config;
pub mod error;
pub mod factory;
pub mod memory;
pub mod metrics;
pub mod types;

pub use clock::{Clock, SimClock, SystemClock};
pub use config::{ChronicleConfig, MemoryConfig};
pub use error::{ChronicleError, Result};
pub use factory::{DeathCause, MemoryFactory};
pub use memory::{Attitude, MemoryDraft, MemoryKind, MemoryRecord, MemoryStore};
pub use metrics::{MemoryCounters, TickBudgetMonitor};
pub use types::*;
