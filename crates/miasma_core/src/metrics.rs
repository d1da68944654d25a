//! Sweep statistics and structured logging.

use crate::engine::ElectricOutcome;
use miasma_data::Point;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// What one pass over the bubble did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    /// Active cells that ran a transition.
    pub visited: usize,
    /// Cells skipped because they were created during this pass.
    pub newborn_skipped: usize,
    /// Cells whose density had to be clamped back into range.
    pub repaired: usize,
    pub created: usize,
    pub removed: usize,
    pub explosions: usize,
    /// What each electric field did, in update order.
    pub arcs: Vec<(Point, ElectricOutcome)>,
    /// Active cells per type key after the pass.
    pub active: BTreeMap<&'static str, usize>,
}

impl SweepStats {
    #[must_use]
    pub fn total_active(&self) -> usize {
        self.active.values().sum()
    }
}

/// Accumulates sweep statistics over a run.
pub struct Metrics {
    sweeps: AtomicU64,
    visited: AtomicU64,
    repaired: AtomicU64,
    explosions: AtomicU64,
    summary_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Metrics {
    #[must_use]
    pub fn new(summary_interval: u64) -> Self {
        Self {
            sweeps: AtomicU64::new(0),
            visited: AtomicU64::new(0),
            repaired: AtomicU64::new(0),
            explosions: AtomicU64::new(0),
            summary_interval: summary_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a finished sweep, logging a summary every `summary_interval` sweeps.
    pub fn record_sweep(&self, stats: &SweepStats, duration: Duration) {
        let sweep = self.sweeps.fetch_add(1, Ordering::Relaxed) + 1;
        self.visited
            .fetch_add(stats.visited as u64, Ordering::Relaxed);
        self.repaired
            .fetch_add(stats.repaired as u64, Ordering::Relaxed);
        self.explosions
            .fetch_add(stats.explosions as u64, Ordering::Relaxed);

        if sweep % self.summary_interval == 0 {
            tracing::info!(
                sweep,
                active = stats.total_active(),
                visited = stats.visited,
                created = stats.created,
                removed = stats.removed,
                duration_us = duration.as_micros() as u64,
                "Field sweep"
            );
        }
    }

    #[must_use]
    pub fn sweeps(&self) -> u64 {
        self.sweeps.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cells_visited(&self) -> u64 {
        self.visited.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn repairs(&self) -> u64 {
        self.repaired.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn explosions(&self) -> u64 {
        self.explosions.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `miasma=info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("miasma=info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sweep_accumulates() {
        let metrics = Metrics::new(2);
        let stats = SweepStats {
            visited: 5,
            repaired: 1,
            explosions: 2,
            ..Default::default()
        };
        metrics.record_sweep(&stats, Duration::from_micros(10));
        metrics.record_sweep(&stats, Duration::from_micros(10));
        assert_eq!(metrics.sweeps(), 2);
        assert_eq!(metrics.cells_visited(), 10);
        assert_eq!(metrics.repairs(), 2);
        assert_eq!(metrics.explosions(), 4);
    }

    #[test]
    fn test_total_active() {
        let mut stats = SweepStats::default();
        stats.active.insert("fire", 3);
        stats.active.insert("smoke", 4);
        assert_eq!(stats.total_active(), 7);
    }
}
