use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to allocate {what} for {requested} slots")]
    Allocation {
        what: &'static str,
        requested: usize,
    },

    #[error("Worker failure: {0}")]
    Worker(String),
}
