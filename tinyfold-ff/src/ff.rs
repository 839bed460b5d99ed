use std::fmt;
use std::fmt::{Display, Formatter};

use tinyfold_geometry::Protein;

/// Defines the way a structure's energy is evaluated by a single term of the model.
pub trait Energy {
    /// Evaluates the total energy of the given structure, in kcal/mol.
    fn energy(&self, protein: &Protein) -> f64;

    /// Evaluates the energy contributions involving a single residue.
    fn energy_by_residue(&self, protein: &Protein, res_index: usize) -> f64;

    /// Returns the name of this energy term, e.g. to label a column in a score table.
    fn name(&self) -> String;
}

/// Per-term decomposition of the total energy, all values in kcal/mol.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnergyBreakdown {
    pub bond: f64,
    pub angle: f64,
    pub dihedral: f64,
    pub vdw: f64,
    pub elec: f64,
    pub hbond: f64,
    pub solvation: f64,
}

impl EnergyBreakdown {
    /// Sums all terms of this breakdown.
    pub fn sum(&self) -> f64 {
        self.bond + self.angle + self.dihedral + self.vdw + self.elec + self.hbond + self.solvation
    }
}

impl Display for EnergyBreakdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bond: {:.2} angle: {:.2} dihedral: {:.2} vdw: {:.2} elec: {:.2} hbond: {:.2} solvation: {:.2}",
            self.bond, self.angle, self.dihedral, self.vdw, self.elec, self.hbond, self.solvation
        )
    }
}

/// Outcome of a full energy evaluation.
///
/// `total` is the value reported to callers, clamped into the stability window;
/// `raw_total` keeps the unclamped sum so that a clamped evaluation can be told
/// from a genuine one. `failed` marks evaluations that produced a non-finite
/// number somewhere and were replaced by the failure sentinel.
#[derive(Clone, Copy, Debug)]
pub struct EnergyReport {
    /// per-term decomposition of the energy
    pub breakdown: EnergyBreakdown,
    /// the clamped total, safe for reporting and for Metropolis tests
    pub total: f64,
    /// the raw, unclamped sum of all terms
    pub raw_total: f64,
    /// true when the evaluation hit a NaN or an infinity
    pub failed: bool,
}
