use tinyfold_geometry::Protein;

use crate::ff::Energy;
use crate::hashgrid::SpatialHash;
use crate::params::{lj_params, partial_charge, COULOMB_CONSTANT};

/// Non-bonded pair interactions: Lennard-Jones 12-6 and screened Coulomb electrostatics.
///
/// Pairs closer than two residues apart along the sequence are excluded; their
/// geometry is already governed by the bonded terms. The van der Waals term is
/// truncated at `vdw_cutoff` with no shift; electrostatics uses the
/// distance-dependent dielectric `eps(r) = 4 r`, which turns Coulomb's law into
/// `83.015 q_i q_j / r^2`, truncated at `elec_cutoff`. Setting a cutoff to zero
/// disables the corresponding term.
///
/// Candidate pairs come from a [`SpatialHash`] with the cell edge set to the larger
/// cutoff, so the enumeration cost grows linearly with the atom count.
pub struct NonBondedEnergy {
    /// Lennard-Jones truncation radius in Angstroms; zero disables the term
    pub vdw_cutoff: f64,
    /// electrostatic truncation radius in Angstroms; zero disables the term
    pub elec_cutoff: f64,
    /// smallest sequence separation of an interacting pair
    pub min_residue_separation: i64,
}

impl NonBondedEnergy {
    /// Creates the evaluator with the default cutoffs: 10 A for vdW, 12 A for electrostatics.
    pub fn new() -> NonBondedEnergy {
        NonBondedEnergy { vdw_cutoff: 10.0, elec_cutoff: 12.0, min_residue_separation: 2 }
    }

    /// Creates the evaluator with explicit cutoff radii.
    pub fn with_cutoffs(vdw_cutoff: f64, elec_cutoff: f64) -> NonBondedEnergy {
        NonBondedEnergy { vdw_cutoff, elec_cutoff, min_residue_separation: 2 }
    }

    fn separated(&self, protein: &Protein, i: usize, j: usize) -> bool {
        let ri = protein.atoms()[i].res_index as i64;
        let rj = protein.atoms()[j].res_index as i64;
        return (ri - rj).abs() >= self.min_residue_separation;
    }

    fn lj_pair(&self, protein: &Protein, i: usize, j: usize, r2: f64) -> f64 {
        let (eps_i, sigma_i) = lj_params(&protein.atoms()[i].element);
        let (eps_j, sigma_j) = lj_params(&protein.atoms()[j].element);
        if eps_i == 0.0 || eps_j == 0.0 {
            return 0.0;
        }
        // --- Lorentz-Berthelot combination
        let eps = (eps_i * eps_j).sqrt();
        let sigma = 0.5 * (sigma_i + sigma_j);
        let s2 = sigma * sigma / r2;
        let s6 = s2 * s2 * s2;
        let s12 = s6 * s6;
        return 4.0 * eps * (s12 - s6);
    }

    fn elec_pair(&self, protein: &Protein, i: usize, j: usize, r2: f64) -> f64 {
        let qi = partial_charge(&protein.atoms()[i].name);
        let qj = partial_charge(&protein.atoms()[j].name);
        if qi == 0.0 || qj == 0.0 {
            return 0.0;
        }
        // --- distance-dependent dielectric eps(r) = 4 r
        return COULOMB_CONSTANT / 4.0 * qi * qj / r2;
    }

    /// Evaluates both non-bonded terms in a single pass, returning `(vdw, elec)`.
    pub fn energies(&self, protein: &Protein) -> (f64, f64) {
        let cutoff = self.vdw_cutoff.max(self.elec_cutoff);
        if cutoff <= 0.0 {
            return (0.0, 0.0);
        }
        let vdw_cut2 = self.vdw_cutoff * self.vdw_cutoff;
        let elec_cut2 = self.elec_cutoff * self.elec_cutoff;

        let positions: Vec<_> = protein.atoms().iter().map(|a| a.pos).collect();
        let hash = SpatialHash::new(&positions, cutoff);

        let mut vdw = 0.0;
        let mut elec = 0.0;
        for i in 0..positions.len() {
            for j in hash.neighbors(&positions[i]) {
                // --- each pair is visited once, in (i < j) order
                if j <= i || !self.separated(protein, i, j) {
                    continue;
                }
                let r2 = positions[i].distance_square_to(&positions[j]);
                if self.vdw_cutoff > 0.0 && r2 < vdw_cut2 {
                    vdw += self.lj_pair(protein, i, j, r2);
                }
                if self.elec_cutoff > 0.0 && r2 < elec_cut2 {
                    elec += self.elec_pair(protein, i, j, r2);
                }
            }
        }
        return (vdw, elec);
    }

    /// The Lennard-Jones component alone.
    pub fn vdw_energy(&self, protein: &Protein) -> f64 {
        self.energies(protein).0
    }

    /// The electrostatic component alone.
    pub fn elec_energy(&self, protein: &Protein) -> f64 {
        self.energies(protein).1
    }
}

impl Energy for NonBondedEnergy {
    fn energy(&self, protein: &Protein) -> f64 {
        let (vdw, elec) = self.energies(protein);
        return vdw + elec;
    }

    fn energy_by_residue(&self, protein: &Protein, res_index: usize) -> f64 {
        let cutoff = self.vdw_cutoff.max(self.elec_cutoff);
        if cutoff <= 0.0 {
            return 0.0;
        }
        let vdw_cut2 = self.vdw_cutoff * self.vdw_cutoff;
        let elec_cut2 = self.elec_cutoff * self.elec_cutoff;
        let positions: Vec<_> = protein.atoms().iter().map(|a| a.pos).collect();
        let hash = SpatialHash::new(&positions, cutoff);

        let mut en = 0.0;
        for i in 0..positions.len() {
            if protein.atoms()[i].res_index != res_index {
                continue;
            }
            for j in hash.neighbors(&positions[i]) {
                if j == i || !self.separated(protein, i, j) {
                    continue;
                }
                let r2 = positions[i].distance_square_to(&positions[j]);
                if self.vdw_cutoff > 0.0 && r2 < vdw_cut2 {
                    en += self.lj_pair(protein, i, j, r2);
                }
                if self.elec_cutoff > 0.0 && r2 < elec_cut2 {
                    en += self.elec_pair(protein, i, j, r2);
                }
            }
        }
        return en;
    }

    fn name(&self) -> String {
        String::from("NonBonded")
    }
}
