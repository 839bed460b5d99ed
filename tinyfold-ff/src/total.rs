use log::warn;

use tinyfold_geometry::{Protein, Vec3};

use crate::bonded::BondedEnergy;
use crate::errors::ForceFieldError;
use crate::ff::{Energy, EnergyBreakdown, EnergyReport};
use crate::hbonds::HydrogenBondEnergy;
use crate::nonbonded::NonBondedEnergy;
use crate::rama_energy::RamachandranEnergy;
use crate::sasa::{SasaParams, SolvationEnergy};

/// Reported energies are clamped into `[-ENERGY_CLAMP, ENERGY_CLAMP]` kcal/mol.
pub const ENERGY_CLAMP: f64 = 10_000.0;

/// The complete energy model: bonded, non-bonded, dihedral, hydrogen-bond and
/// solvation terms summed into one total.
///
/// [`report()`](ForceField::report) evaluates everything once and returns the
/// per-term breakdown together with the clamped total. A term that produces a
/// non-finite number marks the whole evaluation as failed and the total becomes
/// a large finite sentinel, so downstream Metropolis tests and minimisers never
/// see a NaN.
///
/// ```
/// # use tinyfold_ff::ForceField;
/// # use tinyfold_geometry::{build_backbone, BackboneAngles};
/// let chain = build_backbone("GATA", &vec![BackboneAngles::extended(); 4]).unwrap();
/// let ff = ForceField::new();
/// let report = ff.report(&chain);
/// assert!(!report.failed);
/// assert!(report.total.is_finite());
/// ```
pub struct ForceField {
    pub bonded: BondedEnergy,
    pub nonbonded: NonBondedEnergy,
    pub rama: RamachandranEnergy,
    pub hbonds: HydrogenBondEnergy,
    pub solvation: SolvationEnergy,
}

impl ForceField {
    /// Creates the model with the default cutoffs: 10 A vdW, 12 A electrostatics.
    pub fn new() -> ForceField {
        ForceField {
            bonded: BondedEnergy::new(),
            nonbonded: NonBondedEnergy::new(),
            rama: RamachandranEnergy::new(),
            hbonds: HydrogenBondEnergy::new(),
            solvation: SolvationEnergy::new(),
        }
    }

    /// Creates the model with explicit non-bonded cutoffs; zero disables a term.
    pub fn with_cutoffs(vdw_cutoff: f64, elec_cutoff: f64) -> Result<ForceField, ForceFieldError> {
        if vdw_cutoff < 0.0 {
            return Err(ForceFieldError::InvalidCutoff { value: vdw_cutoff });
        }
        if elec_cutoff < 0.0 {
            return Err(ForceFieldError::InvalidCutoff { value: elec_cutoff });
        }
        let mut ff = ForceField::new();
        ff.nonbonded = NonBondedEnergy::with_cutoffs(vdw_cutoff, elec_cutoff);
        return Ok(ff);
    }

    /// Replaces the SASA estimator settings.
    pub fn set_sasa_params(&mut self, params: SasaParams) -> Result<(), ForceFieldError> {
        if params.n_points == 0 {
            return Err(ForceFieldError::NoProbePoints);
        }
        self.solvation.params = params;
        return Ok(());
    }

    /// Evaluates every term once and assembles the full energy report.
    pub fn report(&self, protein: &Protein) -> EnergyReport {
        let (vdw, elec) = self.nonbonded.energies(protein);
        let breakdown = EnergyBreakdown {
            bond: self.bonded.bond_energy(protein),
            angle: self.bonded.angle_energy(protein),
            dihedral: self.rama.energy(protein),
            vdw,
            elec,
            hbond: self.hbonds.energy(protein),
            solvation: self.solvation.energy(protein),
        };

        let raw_total = breakdown.sum();
        if !raw_total.is_finite() {
            warn!("non-finite energy evaluated: {}", breakdown);
            return EnergyReport { breakdown, total: ENERGY_CLAMP, raw_total, failed: true };
        }
        let total = raw_total.clamp(-ENERGY_CLAMP, ENERGY_CLAMP);
        return EnergyReport { breakdown, total, raw_total, failed: false };
    }

    /// Cartesian forces on every atom: the negative gradient of the bonded bond terms.
    ///
    /// The remaining terms contribute to the energy only; dihedral-space optimisation
    /// differentiates the total by finite differences instead.
    pub fn cartesian_forces(&self, protein: &Protein) -> Vec<Vec3> {
        self.bonded.bond_forces(protein)
    }
}

impl Energy for ForceField {
    fn energy(&self, protein: &Protein) -> f64 {
        self.report(protein).total
    }

    fn energy_by_residue(&self, protein: &Protein, res_index: usize) -> f64 {
        return self.bonded.energy_by_residue(protein, res_index)
            + self.nonbonded.energy_by_residue(protein, res_index)
            + self.rama.energy_by_residue(protein, res_index)
            + self.hbonds.energy_by_residue(protein, res_index)
            + self.solvation.energy_by_residue(protein, res_index);
    }

    fn name(&self) -> String {
        String::from("ForceField")
    }
}
