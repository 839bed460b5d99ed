use thiserror::Error;

use tinyfold_geometry::GeometryError;

/// Errors that may appear while configuring or running the optimisers
#[derive(Debug, Error)]
pub enum OptimError {

    #[error("Invalid value for {name}: {value}")]
    /// A configuration value is outside its allowed range
    InvalidParameter { name: String, value: f64 },
    #[error(transparent)]
    /// A backbone rebuild failed during optimisation
    Geometry(#[from] GeometryError),
}

impl OptimError {
    /// Shorthand for an [`OptimError::InvalidParameter`] with a borrowed name.
    pub fn invalid(name: &str, value: f64) -> OptimError {
        OptimError::InvalidParameter { name: name.to_string(), value }
    }
}
