//! Conformer generation for the tinyfold package.
//!
//! ``tinyfold-sampling`` turns an amino-acid sequence into ensembles of candidate
//! backbone structures. Candidate `(phi, psi)` pairs are drawn from a fixed library
//! of seven Ramachandran [`Basin`]s (helix, sheet, polyproline II, turns, ...) and the
//! chains are built by the forward kinematics of ``tinyfold-geometry``. The random
//! stream is reproducible whenever a seed is set in the [`SamplerConfig`].
//!
//! ```
//! use tinyfold_sampling::{ConformationSampler, SamplerConfig};
//!
//! let config = SamplerConfig { samples_per_basin: 2, seed: Some(7), ..SamplerConfig::default() };
//! let mut sampler = ConformationSampler::new(config);
//! // --- 7 basins x 2 samples per basin
//! let ensemble = sampler.per_basin_ensemble("GAVL").unwrap();
//! assert_eq!(ensemble.len(), 14);
//! ```

#![allow(clippy::needless_return)]

mod basins;
mod ensemble;
mod errors;

pub use basins::{basin_by_name, Basin, BASINS};
pub use ensemble::{interpolate_conformations, ConformationSampler, SamplerConfig};
pub use errors::SamplerError;
