//! Time-weighted statistics for a single run.

use crate::clock::SimulationClock;
use crate::servers::ServerPool;
use crate::summary::RunSummary;

/// Running totals; every field is non-decreasing during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsAccumulator {
    /// Integral of the busy-server count over simulated time.
    pub busy_time_area: f64,
    pub customers_served: u64,
    pub customers_lost: u64,
    /// Sum of generated interarrival gaps.
    pub cumulative_interarrival_sum: f64,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrates the busy-server count over the interval since the last update.
    ///
    /// Must run before the event at `clock.now()` is applied: server state is
    /// constant over the elapsed interval, so the step integral is exact.
    pub fn update_time_avg_stats(&mut self, clock: &mut SimulationClock, servers: &ServerPool) {
        let elapsed = clock.elapsed_since_update();
        self.busy_time_area += servers.busy_count() as f64 * elapsed;
        clock.mark_updated();
    }

    #[inline]
    pub fn record_interarrival(&mut self, gap: f64) {
        self.cumulative_interarrival_sum += gap;
    }

    #[inline]
    pub fn record_served(&mut self) {
        self.customers_served += 1;
    }

    #[inline]
    pub fn record_lost(&mut self) {
        self.customers_lost += 1;
    }

    /// Arrivals processed so far.
    pub fn arrivals(&self) -> u64 {
        self.customers_served + self.customers_lost
    }

    pub fn summarize(&self, duration: f64, server_count: usize) -> RunSummary {
        RunSummary {
            customers_served: self.customers_served,
            customers_lost: self.customers_lost,
            busy_time_area: self.busy_time_area,
            cumulative_interarrival_sum: self.cumulative_interarrival_sum,
            server_count,
            duration,
        }
    }
}
