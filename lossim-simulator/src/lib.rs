// lossim-simulator/src/lib.rs

/*!
# lossim Simulator

Next-event time-advance engine for a multi-server loss system: arrivals that find
every server busy are dropped, never queued.

## Key Components:
- **Scheduler:** picks the next event class from the event list and server pool.
- **Handlers:** arrival and departure state transitions.
- **Simulator:** owns one run's state and drives the timing/update/dispatch loop.
- **Sweep:** repeats runs over a range of mean interarrival times.

Every processed event is folded into a BLAKE3 digest so that two runs with the same
seed and parameters can be checked for identical traces.
*/

use blake3::Hasher;
use tracing::{info, trace};

use lossim_config::SimulationParams;
use lossim_core::clock::SimulationClock;
use lossim_core::events::{EventClass, EventList, EventRecord};
use lossim_core::servers::ServerPool;
use lossim_core::stats::StatisticsAccumulator;
use lossim_core::summary::RunSummary;
use lossim_core::variates::{ExponentialVariates, VariateSource};
use lossim_core::SimulationError;

pub mod handlers;
pub mod scheduler;
pub mod sweep;

#[cfg(test)]
mod invariants;

use handlers::{arrive, depart, RunState};

/// Lifecycle of a run. `Terminal` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminal,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub summary: RunSummary,
    /// Hex BLAKE3 digest of the processed event trace.
    pub digest: String,
    /// Events processed, the terminal event included.
    pub events: u64,
}

/// One run of the loss system. Construct a fresh instance per run.
pub struct Simulator<V = ExponentialVariates> {
    mean_interarrival: f64,
    mean_service: f64,
    clock: SimulationClock,
    events: EventList,
    servers: ServerPool,
    stats: StatisticsAccumulator,
    variates: V,
    phase: Phase,
    processed: u64,
    trace_hasher: Hasher,
}

impl Simulator<ExponentialVariates> {
    /// Creates a simulator seeded from `params.seed`, or from the wall clock.
    pub fn from_params(params: &SimulationParams) -> Result<Self, SimulationError> {
        let variates = match params.seed {
            Some(seed) => ExponentialVariates::seeded(seed),
            None => ExponentialVariates::from_time(),
        };
        info!(seed = variates.seed(), "seeded variate generator");
        Self::new(params, variates)
    }
}

impl<V: VariateSource> Simulator<V> {
    /// Sizes the event list and server pool and schedules the first arrival.
    ///
    /// Parameters are re-checked here so that an engine is never built from
    /// unvalidated input.
    pub fn new(params: &SimulationParams, mut variates: V) -> Result<Self, SimulationError> {
        check_params(params)?;

        let servers = ServerPool::new(params.servers)?;
        let first_arrival = variates.exponential(params.mean_interarrival);
        let events = EventList::new(params.servers, params.closing_time, first_arrival)?;

        Ok(Self {
            mean_interarrival: params.mean_interarrival,
            mean_service: params.mean_service,
            clock: SimulationClock::new(),
            events,
            servers,
            stats: StatisticsAccumulator::new(),
            variates,
            phase: Phase::Running,
            processed: 0,
            trace_hasher: Hasher::new(),
        })
    }

    /// Processes one event. Returns `None` once the run is terminal.
    pub fn step(&mut self) -> Option<EventRecord> {
        if self.phase == Phase::Terminal {
            return None;
        }

        let class = scheduler::timing(&mut self.clock, &self.events, &self.servers);
        self.stats
            .update_time_avg_stats(&mut self.clock, &self.servers);

        let time = self.clock.now();
        trace!(class = ?class, time, "event");
        self.processed += 1;
        self.trace_hasher.update(&(class.index() as u64).to_le_bytes());
        self.trace_hasher.update(&time.to_bits().to_le_bytes());

        match class {
            EventClass::End => self.phase = Phase::Terminal,
            EventClass::Arrival => {
                arrive(
                    RunState {
                        clock: &self.clock,
                        events: &mut self.events,
                        servers: &mut self.servers,
                        stats: &mut self.stats,
                        variates: &mut self.variates,
                    },
                    self.mean_interarrival,
                    self.mean_service,
                );
            }
            EventClass::Departure(server) => depart(&mut self.events, &mut self.servers, server),
        }

        Some(EventRecord { class, time })
    }

    /// Runs to the terminal event.
    pub fn run(&mut self) -> RunOutcome {
        while self.step().is_some() {}

        let outcome = self.outcome();
        info!(
            events = outcome.events,
            served = outcome.summary.customers_served,
            lost = outcome.summary.customers_lost,
            duration = outcome.summary.duration,
            "simulation complete"
        );
        outcome
    }

    pub fn outcome(&self) -> RunOutcome {
        RunOutcome {
            summary: self.summary(),
            digest: hex::encode(self.trace_hasher.finalize().as_bytes()),
            events: self.processed,
        }
    }

    pub fn summary(&self) -> RunSummary {
        self.stats.summarize(self.clock.now(), self.servers.len())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn event_list(&self) -> &EventList {
        &self.events
    }

    pub fn servers(&self) -> &ServerPool {
        &self.servers
    }

    pub fn stats(&self) -> &StatisticsAccumulator {
        &self.stats
    }
}

fn check_params(params: &SimulationParams) -> Result<(), SimulationError> {
    let positive = |value: f64| value.is_finite() && value > 0.0;
    if !positive(params.mean_interarrival) {
        return Err(SimulationError::InvalidParameter(format!(
            "mean interarrival time must be positive, got {}",
            params.mean_interarrival
        )));
    }
    if !positive(params.mean_service) {
        return Err(SimulationError::InvalidParameter(format!(
            "mean service time must be positive, got {}",
            params.mean_service
        )));
    }
    if !(params.closing_time.is_finite() && params.closing_time >= 0.0) {
        return Err(SimulationError::InvalidParameter(format!(
            "closing time must be finite and non-negative, got {}",
            params.closing_time
        )));
    }
    if params.servers == 0 {
        return Err(SimulationError::InvalidParameter(
            "at least one server is required".into(),
        ));
    }
    Ok(())
}
