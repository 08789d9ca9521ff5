//! ## lossim-core::variates
//! **Random variate sources for interarrival and service durations**
//!
//! ### Sources:
//! - `ExponentialVariates`: seeded `SmallRng`, inverse-CDF exponential transform.
//! - `StubVariates`: replays a prescribed sequence, for deterministic traces.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Largest value a uniform draw may take; 1.0 itself is excluded.
pub const UNIFORM_MAX: f64 = 1.0 - f64::EPSILON;

/// Capability handed to the simulator for every random draw.
pub trait VariateSource {
    /// Uniform variate in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Exponential variate with the given mean (`mean > 0`).
    fn exponential(&mut self, mean: f64) -> f64 {
        debug_assert!(mean > 0.0, "exponential mean must be positive");
        -mean * (1.0 - self.uniform()).ln()
    }
}

impl<V: VariateSource + ?Sized> VariateSource for Box<V> {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn exponential(&mut self, mean: f64) -> f64 {
        (**self).exponential(mean)
    }
}

impl<V: VariateSource + ?Sized> VariateSource for &mut V {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn exponential(&mut self, mean: f64) -> f64 {
        (**self).exponential(mean)
    }
}

/// Seeded variate generator.
#[derive(Debug, Clone)]
pub struct ExponentialVariates {
    seed: u64,
    rng: SmallRng,
}

impl ExponentialVariates {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeds from the wall clock.
    pub fn from_time() -> Self {
        Self::seeded(time_derived_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl VariateSource for ExponentialVariates {
    #[inline]
    fn uniform(&mut self) -> f64 {
        // draw / (range + 1) keeps the result strictly below 1.0
        self.rng.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// Seed derived from the current wall-clock time in nanoseconds.
pub fn time_derived_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// `exponential` returns the next value regardless of the requested mean;
/// `uniform` returns the next value clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct StubVariates {
    values: Vec<f64>,
    cursor: usize,
}

impl StubVariates {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn sequence(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "stub sequence must not be empty");
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::sequence(vec![value])
    }

    /// Number of values handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl VariateSource for StubVariates {
    fn uniform(&mut self) -> f64 {
        self.next_value().clamp(0.0, UNIFORM_MAX)
    }

    fn exponential(&mut self, _mean: f64) -> f64 {
        self.next_value()
    }
}
