use thiserror::Error;

/// Errors that may appear while building or measuring protein geometry
#[derive(Debug, Error)]
pub enum GeometryError {

    #[error("The amino-acid sequence is empty")]
    /// A structure cannot be built from an empty sequence
    EmptySequence,
    #[error("Unknown amino acid letter: {letter}")]
    /// A sequence letter does not name any of the twenty standard amino acids
    UnknownAminoAcid { letter: char },
    #[error("Sequence of {n_residues} residues does not match {n_angles} (phi, psi) pairs")]
    /// The angle vector handed to the backbone builder has a wrong length
    AngleCountMismatch { n_residues: usize, n_angles: usize },
    #[error("Expected {expected} points for superposition, found {found}")]
    /// Two point sets of different sizes cannot be superposed
    SizeMismatch { expected: usize, found: usize },
    #[error("Non-finite coordinates produced for residue {res_index}")]
    /// Backbone reconstruction produced a NaN or infinite coordinate
    NonFiniteCoordinates { res_index: usize },
    #[error("Singular value decomposition failed during superposition")]
    /// The Kabsch superposition could not decompose the covariance matrix
    SuperpositionFailed,
}
