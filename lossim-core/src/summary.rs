//! End-of-run summary handed to report writers.
//!
//! Ratios return `None` when their denominator is zero (no arrivals, or a run
//! that ended at time zero) instead of propagating NaN or infinity.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub customers_served: u64,
    pub customers_lost: u64,
    pub busy_time_area: f64,
    pub cumulative_interarrival_sum: f64,
    pub server_count: usize,
    /// Final clock value.
    pub duration: f64,
}

impl RunSummary {
    pub fn total_customers(&self) -> u64 {
        self.customers_served + self.customers_lost
    }

    /// lost / (lost + served)
    pub fn blocking_probability(&self) -> Option<f64> {
        match self.total_customers() {
            0 => None,
            total => Some(self.customers_lost as f64 / total as f64),
        }
    }

    /// busy_time_area / (duration * servers), clamped into `[0, 1]`.
    pub fn utilization(&self) -> Option<f64> {
        let capacity = self.duration * self.server_count as f64;
        if capacity > 0.0 {
            Some((self.busy_time_area / capacity).clamp(0.0, 1.0))
        } else {
            None
        }
    }

    /// Realized mean interarrival time.
    pub fn mean_interarrival(&self) -> Option<f64> {
        match self.total_customers() {
            0 => None,
            total => Some(self.cumulative_interarrival_sum / total as f64),
        }
    }

    /// Realized arrival rate, the reciprocal of the realized mean interarrival time.
    pub fn arrival_rate(&self) -> Option<f64> {
        self.mean_interarrival()
            .filter(|mean| *mean > 0.0)
            .map(|mean| 1.0 / mean)
    }
}
