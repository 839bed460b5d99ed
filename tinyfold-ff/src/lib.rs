//! The tinyfold energy model.
//!
//! ``tinyfold-ff`` scores a backbone structure with a molecular-mechanics force field:
//! harmonic bonded terms over the explicit covalent topology, Lennard-Jones and screened
//! Coulomb non-bonded terms fed by a grid [`SpatialHash`], a Gaussian-mixture
//! [`RamachandranEnergy`] over the backbone dihedrals, a geometric hydrogen-bond
//! detector and a SASA-based solvation term.
//!
//! The total is exposed through [`ForceField`], which reports the per-term
//! [`EnergyBreakdown`] along with a clamped total:
//!
//! ```
//! use tinyfold_ff::{Energy, ForceField};
//! use tinyfold_geometry::{build_backbone, BackboneAngles};
//!
//! let chain = build_backbone("AKLVA", &vec![BackboneAngles::extended(); 5]).unwrap();
//! let ff = ForceField::new();
//! let report = ff.report(&chain);
//! assert!((report.breakdown.sum() - report.raw_total).abs() < 1e-9);
//! ```

#![allow(clippy::needless_return)]

pub mod params;
pub mod topology;

mod bonded;
mod errors;
mod ff;
mod hashgrid;
mod hbonds;
mod nonbonded;
mod rama_energy;
mod sasa;
mod secondary;
mod total;

pub use bonded::BondedEnergy;
pub use errors::ForceFieldError;
pub use ff::{Energy, EnergyBreakdown, EnergyReport};
pub use hashgrid::SpatialHash;
pub use hbonds::{find_hydrogen_bonds, HydrogenBond, HydrogenBondEnergy};
pub use nonbonded::NonBondedEnergy;
pub use rama_energy::RamachandranEnergy;
pub use sasa::{residue_sasa, SasaParams, SolvationEnergy};
pub use secondary::{assign_secondary_structure, secondary_structure_string};
pub use total::{ForceField, ENERGY_CLAMP};
