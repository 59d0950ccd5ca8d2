//! World configuration: the core settings plus world-level knobs.
//!
//! ```toml
//! [memory]
//! short_term_capacity = 20
//!
//! [world]
//! seed = 42
//! start_time = "1900-01-01T06:00:00Z"
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use chronicle_core::{ChronicleConfig, ChronicleError, Result};

/// Everything a [`World`](crate::World) needs to start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldConfig {
    /// `[general]`, `[memory]` and `[telemetry]` sections.
    #[serde(flatten)]
    pub chronicle: ChronicleConfig,
    /// `[world]` section.
    #[serde(default)]
    pub world: WorldSettings,
}

/// World-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    /// Seed for every store's forgetting RNG. Unset means entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Simulated time at which the world begins.
    #[serde(default = "default_start_time")]
    pub start_time: DateTime<Utc>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: None,
            start_time: default_start_time(),
        }
    }
}

impl WorldConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// `Config` on malformed TOML or out-of-range values.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ChronicleError::Config(e.to_string()))?;
        config.chronicle.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`from_toml`](Self::from_toml).
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Same config with a fixed seed.
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.world.seed = Some(seed);
        self
    }
}

fn default_start_time() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).single().unwrap_or_default()
}
