//! Geometric foundations of the tinyfold package.
//!
//! ``tinyfold-geometry`` provides the protein data model ([`Protein`], [`Residue`], [`Atom`]),
//! Cartesian and quaternion primitives, the forward-kinematics backbone builder and the
//! measurement routines built on top of them: Ramachandran angles, secondary-structure
//! classification and superposition-based RMSD.
//!
//! The crate's central contract ties [`build_backbone()`] to [`ramachandran()`]: angles
//! measured from a freshly built chain reproduce the input angles, which is what makes
//! dihedral-space optimisation possible downstream.
//!
//! ```
//! use tinyfold_geometry::{build_backbone, BackboneAngles};
//! let angles = vec![BackboneAngles::extended(); 5];
//! let chain = build_backbone("GASPV", &angles).unwrap();
//! assert_eq!(chain.count_atoms(), 20);
//! ```

#![allow(clippy::needless_return)]

pub mod backbone;

mod assertions;
mod errors;
mod matrix3;
mod model;
mod quaternion;
mod rama;
mod superpose;
mod vec3;

pub use backbone::{build_backbone, rebuild_backbone};
pub use errors::GeometryError;
pub use matrix3::Matrix3x3;
pub use model::{one_to_three, three_to_one, validate_sequence, Atom, Protein, Residue, AMINO_ACIDS};
pub use quaternion::Quaternion;
pub use rama::{classify_rama, ramachandran, BackboneAngles, SecondaryClass};
pub use superpose::{ca_rmsd, superposed_rmsd};
pub use vec3::{dihedral_angle4, planar_angle2, planar_angle3, wrap_angle, wrap_degrees, Vec3};
