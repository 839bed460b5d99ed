use thiserror::Error;

use tinyfold_geometry::GeometryError;

/// Errors that may appear while generating conformer ensembles
#[derive(Debug, Error)]
pub enum SamplerError {

    #[error("Ensemble size must be at least 1")]
    /// Samplers cannot produce empty ensembles
    EmptyEnsemble,
    #[error("Unknown basin name: {name}")]
    /// A constraint map points to a basin that is not in the library
    UnknownBasin { name: String },
    #[error("No basin admits residue {aa} at position {res_index}")]
    /// Every basin excludes the residue, so no angles can be drawn for it
    NoBasinForResidue { res_index: usize, aa: char },
    #[error(transparent)]
    /// The sampled angles could not be turned into a structure
    Geometry(#[from] GeometryError),
}
