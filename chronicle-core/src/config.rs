//! Configuration for the chronicle memory system.
//!
//! Maps directly to a `chronicle.toml` file. Every section and field is
//! optional; missing values fall back to the stock tuning.

use serde::{Deserialize, Serialize};

use crate::error::{ChronicleError, Result};

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChronicleConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Per-agent memory tiers and sweep timing.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Budgets and slow-operation logging.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl ChronicleConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ChronicleError::Config` if the TOML is invalid or a value is
    /// out of range.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ChronicleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    /// Returns `ChronicleError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.general.validate()?;
        self.memory.validate()?;
        self.telemetry.validate()
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log filter directive: trace, debug, info, warn, error (or a full
    /// `EnvFilter` string).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format: "pretty" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl GeneralConfig {
    fn validate(&self) -> Result<()> {
        match self.log_format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ChronicleError::Config(format!(
                "general.log_format must be \"pretty\" or \"json\", got {other:?}"
            ))),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// Per-agent memory tier capacities and sweep cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Short-term tier capacity (`S`).
    #[serde(default = "default_short_term_capacity")]
    pub short_term_capacity: usize,
    /// Long-term tier capacity (`L`).
    #[serde(default = "default_long_term_capacity")]
    pub long_term_capacity: usize,
    /// Simulated hours between consolidation sweeps.
    #[serde(default = "default_consolidation_interval")]
    pub consolidation_interval_hours: f32,
    /// Simulated hours between decay sweeps.
    #[serde(default = "default_decay_interval")]
    pub decay_interval_hours: f32,
    /// Decay applied to every record per decay sweep, in days.
    #[serde(default = "default_daily_decay_amount")]
    pub daily_decay_amount: f64,
    /// Decay rate given to records whose draft does not set one.
    #[serde(default = "default_decay_rate")]
    pub default_decay_rate: f32,
}

impl MemoryConfig {
    /// Check capacities and sweep settings.
    ///
    /// # Errors
    /// `Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.short_term_capacity == 0 {
            return Err(ChronicleError::Config(
                "memory.short_term_capacity must be at least 1".to_string(),
            ));
        }
        if self.long_term_capacity == 0 {
            return Err(ChronicleError::Config(
                "memory.long_term_capacity must be at least 1".to_string(),
            ));
        }
        positive("memory.consolidation_interval_hours", f64::from(self.consolidation_interval_hours))?;
        positive("memory.decay_interval_hours", f64::from(self.decay_interval_hours))?;
        non_negative("memory.daily_decay_amount", self.daily_decay_amount)?;
        non_negative("memory.default_decay_rate", f64::from(self.default_decay_rate))
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: default_short_term_capacity(),
            long_term_capacity: default_long_term_capacity(),
            consolidation_interval_hours: default_consolidation_interval(),
            decay_interval_hours: default_decay_interval(),
            daily_decay_amount: default_daily_decay_amount(),
            default_decay_rate: default_decay_rate(),
        }
    }
}

/// Performance budgets and observability thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Budget for one world tick across all agents, in milliseconds.
    #[serde(default = "default_tick_budget")]
    pub tick_budget_ms: f64,
    /// Log any single sweep slower than this (milliseconds).
    #[serde(default = "default_slow_ms")]
    pub log_slow_operations_ms: f64,
}

impl TelemetryConfig {
    fn validate(&self) -> Result<()> {
        positive("telemetry.tick_budget_ms", self.tick_budget_ms)?;
        non_negative("telemetry.log_slow_operations_ms", self.log_slow_operations_ms)
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            tick_budget_ms: default_tick_budget(),
            log_slow_operations_ms: default_slow_ms(),
        }
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChronicleError::Config(format!("{field} must be positive, got {value}")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChronicleError::Config(format!("{field} must not be negative, got {value}")))
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }
fn default_short_term_capacity() -> usize { 20 }
fn default_long_term_capacity() -> usize { 100 }
fn default_consolidation_interval() -> f32 { 6.0 }
fn default_decay_interval() -> f32 { 24.0 }
fn default_daily_decay_amount() -> f64 { 1.0 / 365.0 }
fn default_decay_rate() -> f32 { 0.1 }
fn default_tick_budget() -> f64 { 2.0 }
fn default_slow_ms() -> f64 { 5.0 }
