use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors returned by the network engine.
///
/// All variants are caller contract violations (mismatched shapes),
/// not transient failures. There is no retry or recovery path.
pub enum Error {
    /// Non-positive layer size given at network construction.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// Input vector length differs from a neuron's weight count.
    #[error("dimension mismatch: expected {expected} inputs, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize
    },

    /// Target vector length differs from the neuron count of a layer
    /// it is scored against.
    #[error("invalid training configuration: {0}")]
    InvalidTrainingConfiguration(String)
}
