//! # chronicle-sim — World Driver for Chronicle
//!
//! Owns the pieces `chronicle-core` deliberately leaves outside: who the
//! agents are, what time it is, and which life events reach whose memory.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                  World                    │
//! │  AgentRegistry   SimClock   SequentialIds │
//! │        │             │            │       │
//! │        ▼             ▼            ▼       │
//! │   ┌──────────────────────────────────┐    │
//! │   │  MemoryStore (one per agent)      │    │
//! │   │         chronicle-core            │    │
//! │   └──────────────────────────────────┘    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `registry` — agent ids and display names
//! - `events` — life events and who remembers them
//! - `world` — population, hourly tick, queries
//! - `config` — `WorldConfig` (core sections + `[world]`)
//! - `telemetry` — tracing subscriber setup

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod events;
pub mod registry;
pub mod telemetry;
pub mod world;

pub use config::{WorldConfig, WorldSettings};
pub use events::LifeEvent;
pub use registry::AgentRegistry;
pub use world::{HourReport, World};
