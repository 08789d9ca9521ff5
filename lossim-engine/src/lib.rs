//! # lossim-engine
//!
//! Process-level run modes shared by frontends: load parameters, drive the
//! simulator, and write the report or sweep CSV.

pub mod error;
pub mod export;
pub mod report;
pub mod runtime;

pub use error::EngineError;
pub use runtime::{load_config, run_single_mode, run_sweep_mode};

pub mod prelude {
    pub use crate::error::EngineError;
    pub use crate::export::SweepCsvWriter;
    pub use crate::report::write_report;
    pub use crate::runtime::{load_config, run_single_mode, run_sweep_mode};
}
