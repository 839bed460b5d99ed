use thiserror::Error;

/// Errors that may appear while configuring the energy model
#[derive(Debug, Error)]
pub enum ForceFieldError {

    #[error("Invalid cutoff radius: {value}; use 0.0 to disable a non-bonded term")]
    /// Cutoff radii must be non-negative
    InvalidCutoff { value: f64 },
    #[error("The SASA estimator needs at least one probe point")]
    /// The Fibonacci sphere cannot be built from zero points
    NoProbePoints,
}
