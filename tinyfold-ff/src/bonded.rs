use tinyfold_geometry::{planar_angle3, Protein, Vec3};

use crate::ff::Energy;
use crate::topology::{backbone_angles, backbone_bonds};

/// Harmonic energy of all explicit backbone bonds and planar angles.
///
/// Each bond contributes `k (r - r0)^2` and each angle `k (theta - theta0)^2`,
/// with the parameters taken from the backbone subset of ff14SB. This is the only
/// term of the model with analytical Cartesian derivatives, exposed through
/// [`bond_forces()`](BondedEnergy::bond_forces).
///
/// ```
/// # use tinyfold_ff::{BondedEnergy, Energy};
/// # use tinyfold_geometry::{build_backbone, BackboneAngles};
/// let chain = build_backbone("AAAA", &vec![BackboneAngles::extended(); 4]).unwrap();
/// let bonded = BondedEnergy::new();
/// // --- a freshly built chain sits at the equilibrium geometry
/// assert!(bonded.energy(&chain).abs() < 2.0);
/// ```
pub struct BondedEnergy;

impl BondedEnergy {
    pub fn new() -> BondedEnergy {
        BondedEnergy
    }

    /// Energy of the covalent bond terms alone.
    pub fn bond_energy(&self, protein: &Protein) -> f64 {
        let atoms = protein.atoms();
        let mut en = 0.0;
        for bond in backbone_bonds(protein) {
            let r = atoms[bond.i].pos.distance_to(&atoms[bond.j].pos);
            let d = r - bond.param.r0;
            en += bond.param.k * d * d;
        }
        return en;
    }

    /// Energy of the planar angle terms alone.
    pub fn angle_energy(&self, protein: &Protein) -> f64 {
        let atoms = protein.atoms();
        let mut en = 0.0;
        for angle in backbone_angles(protein) {
            let theta = planar_angle3(&atoms[angle.i].pos, &atoms[angle.j].pos, &atoms[angle.k].pos);
            let d = theta - angle.param.theta0;
            en += angle.param.k * d * d;
        }
        return en;
    }

    /// Cartesian forces of the bond terms: the negative gradient of the bond energy.
    ///
    /// One force vector per atom, in the canonical atom order. Angle and non-bonded
    /// terms do not contribute; dihedral-space optimisation gets its gradients by
    /// finite differences instead.
    pub fn bond_forces(&self, protein: &Protein) -> Vec<Vec3> {
        let atoms = protein.atoms();
        let mut forces = vec![Vec3::zero(); atoms.len()];
        for bond in backbone_bonds(protein) {
            let delta = Vec3::sub_s(&atoms[bond.j].pos, &atoms[bond.i].pos);
            let r = delta.length();
            if r < 1e-9 {
                continue;
            }
            // --- dE/dr = 2 k (r - r0); the force pulls the pair back to r0
            let magnitude = 2.0 * bond.param.k * (r - bond.param.r0) / r;
            let mut f = delta;
            f *= magnitude;
            forces[bond.i] += &f;
            f.opposite();
            forces[bond.j] += &f;
        }
        return forces;
    }
}

impl Energy for BondedEnergy {
    fn energy(&self, protein: &Protein) -> f64 {
        return self.bond_energy(protein) + self.angle_energy(protein);
    }

    fn energy_by_residue(&self, protein: &Protein, res_index: usize) -> f64 {
        let atoms = protein.atoms();
        let mut en = 0.0;
        for bond in backbone_bonds(protein) {
            if atoms[bond.i].res_index == res_index || atoms[bond.j].res_index == res_index {
                let r = atoms[bond.i].pos.distance_to(&atoms[bond.j].pos);
                let d = r - bond.param.r0;
                en += bond.param.k * d * d;
            }
        }
        for angle in backbone_angles(protein) {
            if atoms[angle.j].res_index == res_index {
                let theta = planar_angle3(&atoms[angle.i].pos, &atoms[angle.j].pos, &atoms[angle.k].pos);
                let d = theta - angle.param.theta0;
                en += angle.param.k * d * d;
            }
        }
        return en;
    }

    fn name(&self) -> String {
        String::from("Bonded")
    }
}
