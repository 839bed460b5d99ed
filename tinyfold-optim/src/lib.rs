//! Structure optimisation for the tinyfold package.
//!
//! The central routine is the [`DihedralLbfgs`] minimiser, which descends the energy
//! surface in `(phi, psi)` space: the state vector is the angle vector and coordinates
//! are reconstructed by forward kinematics on every evaluation, so bond lengths and
//! angles stay ideal by construction. Around it, the crate provides a
//! [`GentleRelaxer`] for taking severe strain out of Cartesian coordinates, a
//! Metropolis [`SimulatedAnnealer`] with a golden-ratio cooling schedule for escaping
//! local minima, and a [`ConstraintRefiner`] that polishes structures against
//! secondary-structure and burial biases.
//!
//! Every routine reports a [`StageReport`]; a stage that fails or runs out of budget
//! leaves its best-so-far structure in place for the next stage.

#![allow(clippy::needless_return)]

mod anneal;
mod errors;
mod lbfgs;
mod montecarlo;
mod refine;
mod relax;
mod report;

pub use anneal::{AnnealParams, CoolingSchedule, SimulatedAnnealer, BOLTZMANN};
pub use errors::OptimError;
pub use lbfgs::{DihedralLbfgs, LbfgsParams};
pub use montecarlo::{IsothermalMonteCarlo, IsothermalParams, MetropolisCriterion, SingleAtomMove};
pub use refine::{ConstraintRefiner, RefineParams};
pub use relax::{remove_clashes, GentleRelaxer, RelaxParams};
pub use report::{AcceptanceStatistics, StageReport};
