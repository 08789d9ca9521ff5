//! # lossim-core
//!
//! Building blocks for a multi-server loss system driven by next-event time advance.
//!
//! ### Key Submodules:
//! - `variates`: uniform/exponential variate sources, seeded or stubbed
//! - `events`: the fixed-slot event list and event classes
//! - `servers`: busy/idle server pool with lowest-index allocation
//! - `stats`: time-weighted statistics accumulator
//! - `summary`: end-of-run summary with guarded ratios

pub mod clock;
pub mod error;
pub mod events;
pub mod servers;
pub mod stats;
pub mod summary;
pub mod variates;

pub mod prelude {
    pub use crate::clock::SimulationClock;
    pub use crate::error::SimulationError;
    pub use crate::events::{EventClass, EventList, EventRecord};
    pub use crate::servers::{ServerPool, ServerStatus};
    pub use crate::stats::StatisticsAccumulator;
    pub use crate::summary::RunSummary;
    pub use crate::variates::{ExponentialVariates, StubVariates, VariateSource};
}

pub use error::SimulationError;
