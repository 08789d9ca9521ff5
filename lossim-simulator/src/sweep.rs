//! Parameter sweep: repeated independent runs over increasing mean interarrival times.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::channel::unbounded;
use tracing::{debug, info};

use lossim_config::{SimulationParams, SweepConfig};
use lossim_core::summary::RunSummary;
use lossim_core::variates::{time_derived_seed, ExponentialVariates};
use lossim_core::SimulationError;

use crate::Simulator;

/// One run of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub iteration: usize,
    /// Configured mean interarrival time for this run.
    pub mean_interarrival: f64,
    pub seed: u64,
    pub summary: RunSummary,
    pub digest: String,
}

/// Runs `config.iterations` simulations; run `i` uses
/// `mean_interarrival + i * interarrival_step`.
///
/// With a base seed, run `i` is seeded with `seed + i`; otherwise each run draws a
/// wall-clock seed, recorded in its row. Rows come back in iteration order
/// regardless of the number of workers.
pub fn sweep(
    base: &SimulationParams,
    config: &SweepConfig,
) -> Result<Vec<SweepRow>, SimulationError> {
    let workers = resolve_workers(config.workers, config.iterations);
    info!(
        iterations = config.iterations,
        step = config.interarrival_step,
        workers,
        "starting sweep"
    );

    if workers <= 1 {
        (0..config.iterations)
            .map(|iteration| run_iteration(base, config, iteration))
            .collect()
    } else {
        run_parallel(base, config, workers)
    }
}

/// Parameters for run `iteration` of the sweep.
pub fn iteration_params(
    base: &SimulationParams,
    config: &SweepConfig,
    iteration: usize,
) -> SimulationParams {
    let seed = match base.seed {
        Some(seed) => seed.wrapping_add(iteration as u64),
        None => time_derived_seed().wrapping_add(iteration as u64),
    };
    SimulationParams {
        mean_interarrival: base.mean_interarrival
            + iteration as f64 * config.interarrival_step,
        seed: Some(seed),
        ..base.clone()
    }
}

fn run_iteration(
    base: &SimulationParams,
    config: &SweepConfig,
    iteration: usize,
) -> Result<SweepRow, SimulationError> {
    let params = iteration_params(base, config, iteration);
    let seed = params.seed.unwrap_or_default();
    let outcome = Simulator::new(&params, ExponentialVariates::seeded(seed))?.run();
    debug!(
        iteration,
        mean_interarrival = params.mean_interarrival,
        "sweep run finished"
    );

    Ok(SweepRow {
        iteration,
        mean_interarrival: params.mean_interarrival,
        seed,
        summary: outcome.summary,
        digest: outcome.digest,
    })
}

fn run_parallel(
    base: &SimulationParams,
    config: &SweepConfig,
    workers: usize,
) -> Result<Vec<SweepRow>, SimulationError> {
    let next = AtomicUsize::new(0);
    let (tx, rx) = unbounded();

    crossbeam::thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move |_| loop {
                let iteration = next.fetch_add(1, Ordering::Relaxed);
                if iteration >= config.iterations {
                    break;
                }
                if tx
                    .send((iteration, run_iteration(base, config, iteration)))
                    .is_err()
                {
                    break;
                }
            });
        }
    })
    .map_err(|_| SimulationError::Worker("sweep worker panicked".into()))?;
    drop(tx);

    let mut results: Vec<_> = rx.into_iter().collect();
    results.sort_by_key(|(iteration, _)| *iteration);
    results.into_iter().map(|(_, row)| row).collect()
}

fn resolve_workers(requested: usize, iterations: usize) -> usize {
    let workers = if requested == 0 {
        num_cpus::get()
    } else {
        requested
    };
    workers.clamp(1, iterations.max(1))
}
