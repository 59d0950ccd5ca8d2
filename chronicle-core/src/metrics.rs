//! Runtime metrics for the memory system.
//!
//! Stores bump lock-free counters on their hot paths; the world driver times
//! each tick with a [`TickBudgetMonitor`]. Both can be read at any time and
//! exported for dashboards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::Mutex;

// ---------------------------------------------------------------------------
// Counters (lock-free)
// ---------------------------------------------------------------------------

/// Atomic counters shared by every store of a world (via `Arc`).
#[derive(Debug)]
pub struct MemoryCounters {
    /// Records accepted by `add`.
    pub records_added: AtomicU64,
    /// Drafts or arguments rejected before mutation.
    pub rejected_inputs: AtomicU64,
    /// Records pushed out of a full short-term tier on insertion.
    pub short_term_evictions: AtomicU64,
    /// Records promoted to long-term during consolidation.
    pub promotions: AtomicU64,
    /// Short-term records that failed their survival roll.
    pub forgotten: AtomicU64,
    /// Records dropped from a full long-term tier.
    pub long_term_evictions: AtomicU64,
    /// Consolidation sweeps run.
    pub consolidations: AtomicU64,
    /// Decay sweeps run.
    pub decay_sweeps: AtomicU64,
    /// Explicit or query-driven recalls.
    pub recalls: AtomicU64,
}

impl MemoryCounters {
    /// Create a new set of zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records_added: AtomicU64::new(0),
            rejected_inputs: AtomicU64::new(0),
            short_term_evictions: AtomicU64::new(0),
            promotions: AtomicU64::new(0),
            forgotten: AtomicU64::new(0),
            long_term_evictions: AtomicU64::new(0),
            consolidations: AtomicU64::new(0),
            decay_sweeps: AtomicU64::new(0),
            recalls: AtomicU64::new(0),
        }
    }

    pub(crate) fn add(counter: &AtomicU64, n: usize) {
        counter.fetch_add(u64::try_from(n).unwrap_or(u64::MAX), Ordering::Relaxed);
    }

    /// Snapshot all counters for export.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            records_added: self.records_added.load(Ordering::Relaxed),
            rejected_inputs: self.rejected_inputs.load(Ordering::Relaxed),
            short_term_evictions: self.short_term_evictions.load(Ordering::Relaxed),
            promotions: self.promotions.load(Ordering::Relaxed),
            forgotten: self.forgotten.load(Ordering::Relaxed),
            long_term_evictions: self.long_term_evictions.load(Ordering::Relaxed),
            consolidations: self.consolidations.load(Ordering::Relaxed),
            decay_sweeps: self.decay_sweeps.load(Ordering::Relaxed),
            recalls: self.recalls.load(Ordering::Relaxed),
        }
    }
}

impl Default for MemoryCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot of counter values at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Records accepted.
    pub records_added: u64,
    /// Inputs rejected.
    pub rejected_inputs: u64,
    /// Short-term overflow evictions.
    pub short_term_evictions: u64,
    /// Long-term promotions.
    pub promotions: u64,
    /// Records forgotten at consolidation.
    pub forgotten: u64,
    /// Long-term overflow evictions.
    pub long_term_evictions: u64,
    /// Consolidation sweeps.
    pub consolidations: u64,
    /// Decay sweeps.
    pub decay_sweeps: u64,
    /// Recalls.
    pub recalls: u64,
}

impl CounterSnapshot {
    /// Format as Prometheus-compatible text.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        let rows = [
            ("records_added", "Memory records accepted", self.records_added),
            ("rejected_inputs", "Inputs rejected before mutation", self.rejected_inputs),
            ("short_term_evictions", "Records pushed out of short-term", self.short_term_evictions),
            ("promotions", "Records promoted to long-term", self.promotions),
            ("forgotten", "Records forgotten during consolidation", self.forgotten),
            ("long_term_evictions", "Records dropped from long-term", self.long_term_evictions),
            ("consolidations", "Consolidation sweeps run", self.consolidations),
            ("decay_sweeps", "Decay sweeps run", self.decay_sweeps),
            ("recalls", "Memory recalls", self.recalls),
        ];
        let mut out = String::new();
        for (name, help, value) in rows {
            out.push_str(&format!(
                "# HELP chronicle_{name}_total {help}\n\
                 # TYPE chronicle_{name}_total counter\n\
                 chronicle_{name}_total {value}\n"
            ));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tick Budget Monitor
// ---------------------------------------------------------------------------

/// Tracks wall time spent per world tick.
///
/// ```rust
/// # use chronicle_core::metrics::TickBudgetMonitor;
/// let monitor = TickBudgetMonitor::new(2.0);
/// {
///     let _guard = monitor.begin_tick();
///     // ... tick every store ...
/// }
/// assert_eq!(monitor.tick_count(), 1);
/// ```
pub struct TickBudgetMonitor {
    budget_ms: f64,
    history: Mutex<TickHistory>,
}

struct TickHistory {
    /// Ring buffer of recent tick timings (milliseconds).
    timings: Vec<f64>,
    write_idx: usize,
    count: u64,
    last_over_budget: bool,
}

const HISTORY_LEN: usize = 256;

impl TickBudgetMonitor {
    /// Create a new monitor with the given budget (milliseconds).
    #[must_use]
    pub fn new(budget_ms: f64) -> Self {
        Self {
            budget_ms,
            history: Mutex::new(TickHistory {
                timings: vec![0.0; HISTORY_LEN],
                write_idx: 0,
                count: 0,
                last_over_budget: false,
            }),
        }
    }

    /// Begin timing a tick. The guard records elapsed time on drop.
    pub fn begin_tick(&self) -> TickGuard<'_> {
        TickGuard {
            monitor: self,
            start: Instant::now(),
        }
    }

    /// Record a tick timing manually (milliseconds).
    pub fn record(&self, ms: f64) {
        let mut h = self.history.lock();
        let idx = h.write_idx;
        h.timings[idx] = ms;
        h.write_idx = (idx + 1) % HISTORY_LEN;
        h.count += 1;
        h.last_over_budget = ms > self.budget_ms;
    }

    /// The last tick's timing (milliseconds), 0 before any tick.
    #[must_use]
    pub fn last_tick_ms(&self) -> f64 {
        let h = self.history.lock();
        if h.count == 0 {
            return 0.0;
        }
        h.timings[(h.write_idx + HISTORY_LEN - 1) % HISTORY_LEN]
    }

    /// Whether the last tick exceeded the budget.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.history.lock().last_over_budget
    }

    /// P50/P95/P99/max over the retained history.
    #[must_use]
    pub fn percentiles(&self) -> TickPercentiles {
        let h = self.history.lock();
        let n = usize::try_from(h.count).map_or(HISTORY_LEN, |c| c.min(HISTORY_LEN));
        if n == 0 {
            return TickPercentiles::default();
        }

        let mut sorted = h.timings[..n].to_vec();
        sorted.sort_by(f64::total_cmp);

        let at = |q: f64| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            let i = ((n as f64 * q) as usize).min(n - 1);
            sorted[i]
        };
        let over = sorted.iter().filter(|&&t| t > self.budget_ms).count();
        #[allow(clippy::cast_precision_loss)]
        let over_budget_ratio = over as f64 / n as f64;

        TickPercentiles {
            p50: at(0.50),
            p95: at(0.95),
            p99: at(0.99),
            max: sorted[n - 1],
            over_budget_ratio,
        }
    }

    /// Total number of ticks recorded.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.history.lock().count
    }

    /// The configured budget in milliseconds.
    #[must_use]
    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }
}

impl std::fmt::Debug for TickBudgetMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickBudgetMonitor")
            .field("budget_ms", &self.budget_ms)
            .field("ticks", &self.tick_count())
            .finish_non_exhaustive()
    }
}

/// Records elapsed time into its monitor when dropped.
pub struct TickGuard<'a> {
    monitor: &'a TickBudgetMonitor,
    start: Instant,
}

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.monitor.record(self.start.elapsed().as_secs_f64() * 1000.0);
    }
}

/// Percentile statistics for tick timings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickPercentiles {
    /// Median in milliseconds.
    pub p50: f64,
    /// 95th percentile in milliseconds.
    pub p95: f64,
    /// 99th percentile in milliseconds.
    pub p99: f64,
    /// Maximum observed timing.
    pub max: f64,
    /// Share of ticks over budget (0.0–1.0).
    pub over_budget_ratio: f64,
}

impl TickPercentiles {
    /// Format as a human-readable summary.
    #[must_use]
    pub fn summary(&self, budget_ms: f64) -> String {
        format!(
            "P50={:.2}ms  P95={:.2}ms  P99={:.2}ms  Max={:.2}ms  Budget={budget_ms:.1}ms  \
             Over-budget={:.1}%",
            self.p50,
            self.p95,
            self.p99,
            self.max,
            self.over_budget_ratio * 100.0,
        )
    }
}
