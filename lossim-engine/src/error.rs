use std::path::PathBuf;

use lossim_config::ConfigError;
use lossim_core::SimulationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Cannot open output {}: {source}", path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Trace digest mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },
}
