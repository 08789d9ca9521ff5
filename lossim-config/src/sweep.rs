//! Parameter sweep settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SweepConfig {
    /// Number of runs in the sweep.
    #[serde(default = "default_iterations")]
    #[validate(range(min = 1))]
    pub iterations: usize,

    /// Added to the mean interarrival time after every run.
    #[serde(default = "default_step")]
    #[validate(range(exclusive_min = 0.0))]
    #[validate(custom(function = validation::validate_finite))]
    pub interarrival_step: f64,

    /// Worker threads; `0` uses one per available CPU.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_iterations() -> usize {
    90
}

fn default_step() -> f64 {
    1.0
}

fn default_workers() -> usize {
    1
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            interarrival_step: default_step(),
            workers: default_workers(),
        }
    }
}
