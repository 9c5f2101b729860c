//! Sensor tick metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-sensor tick counters
#[derive(Debug, Default)]
pub struct SensorMetrics {
    /// Ticks that acquired the guard and ran the checker
    ticks_evaluated: AtomicU64,
    /// Ticks that hit guard contention
    ticks_contended: AtomicU64,
    /// Ticks that failed (checker error, translation error, missing ego)
    tick_failures: AtomicU64,
    /// Responses delivered to the callback
    responses_emitted: AtomicU64,
}

impl SensorMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks_evaluated(&self) -> u64 {
        self.ticks_evaluated.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_ticks_evaluated(&self) {
        self.ticks_evaluated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn ticks_contended(&self) -> u64 {
        self.ticks_contended.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_ticks_contended(&self) {
        self.ticks_contended.fetch_add(1, Ordering::Relaxed);
    }

    pub fn tick_failures(&self) -> u64 {
        self.tick_failures.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_tick_failures(&self) {
        self.tick_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn responses_emitted(&self) -> u64 {
        self.responses_emitted.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_responses_emitted(&self) {
        self.responses_emitted.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = SensorMetrics::new();
        assert_eq!(metrics.ticks_evaluated(), 0);
        assert_eq!(metrics.ticks_contended(), 0);
        assert_eq!(metrics.tick_failures(), 0);
        assert_eq!(metrics.responses_emitted(), 0);
    }

    #[test]
    fn test_increment() {
        let metrics = SensorMetrics::new();
        metrics.inc_ticks_evaluated();
        metrics.inc_ticks_evaluated();
        metrics.inc_responses_emitted();
        assert_eq!(metrics.ticks_evaluated(), 2);
        assert_eq!(metrics.responses_emitted(), 1);
    }
}
