use tinyfold_geometry::{planar_angle3, Protein, Vec3};

use crate::ff::Energy;

/// Distance window accepted for an explicit `H...O` contact, in Angstroms.
const H_O_RANGE: (f64, f64) = (1.5, 2.5);
/// Distance window accepted for the H-less `N...O` fallback, in Angstroms.
const N_O_RANGE: (f64, f64) = (2.5, 3.5);
/// Smallest accepted donor angle, in degrees.
const MIN_ANGLE_DEG: f64 = 120.0;
/// Smallest sequence separation of a donor-acceptor pair.
const MIN_SEPARATION: i64 = 2;

/// A single backbone hydrogen bond found by the geometric detector.
#[derive(Clone, Copy, Debug)]
pub struct HydrogenBond {
    /// residue index of the donor amide
    pub donor_res: usize,
    /// residue index of the accepting carbonyl
    pub acceptor_res: usize,
    /// distance from the (explicit or inferred) amide hydrogen to the acceptor oxygen
    pub h_o_distance: f64,
    /// donor nitrogen to acceptor oxygen distance
    pub n_o_distance: f64,
    /// the `N-H...O` angle in degrees
    pub angle_deg: f64,
    /// energy of this bond in kcal/mol, always negative
    pub energy: f64,
}

/// Returns the position of the amide hydrogen of a residue.
///
/// When the structure stores an explicit `H` its coordinates are used; otherwise a
/// pseudo-hydrogen is projected 1 A from the nitrogen along the `CA -> N` direction,
/// the standard H-less approximation for backbone amides.
fn amide_hydrogen(protein: &Protein, res_index: usize) -> Option<(Vec3, bool)> {
    if let Some(h) = protein.find_atom(res_index, "H") {
        return Some((h.pos, true));
    }
    let n = protein.backbone_atom(res_index, "N")?;
    let ca = protein.backbone_atom(res_index, "CA")?;
    let mut dir = Vec3::sub_s(&n.pos, &ca.pos);
    if dir.length() < 1e-9 {
        return None;
    }
    dir.normalize();
    let mut h = n.pos;
    h += &dir;
    return Some((h, false));
}

/// Energy of one hydrogen bond from its `N...O` distance and donor angle.
///
/// The Gaussian factor peaks at the ideal 2.9 A donor-acceptor distance. The angular
/// factor enters through the supplement of the `N-H...O` angle, so a perfectly linear
/// bond scores the full -5 kcal/mol and a bond at the 120 degree acceptance edge only
/// a quarter of it.
fn bond_energy(n_o_distance: f64, angle_deg: f64) -> f64 {
    let d = n_o_distance - 2.9;
    let radial = (-d * d / 0.2).exp();
    let supplement = std::f64::consts::PI - angle_deg.to_radians();
    let angular = (1.0 + supplement.cos()) / 2.0;
    return -5.0 * radial * angular;
}

/// Finds every backbone hydrogen bond of a structure by geometric criteria.
///
/// Donors are backbone amides (`N-H`), acceptors carbonyl oxygens (`C=O`), at least
/// two residues apart along the sequence. A pair is accepted when the `H...O` distance
/// falls in `[1.5, 2.5]` A (or `N...O` in `[2.5, 3.5]` A when no hydrogen is present)
/// and the `N-H...O` angle is at least 120 degrees.
pub fn find_hydrogen_bonds(protein: &Protein) -> Vec<HydrogenBond> {
    let mut bonds = Vec::new();
    let n_res = protein.count_residues();

    for donor in 0..n_res {
        let Some(n_atom) = protein.backbone_atom(donor, "N") else { continue };
        let Some((h_pos, explicit_h)) = amide_hydrogen(protein, donor) else { continue };

        for acceptor in 0..n_res {
            if (donor as i64 - acceptor as i64).abs() < MIN_SEPARATION {
                continue;
            }
            let Some(o_atom) = protein.backbone_atom(acceptor, "O") else { continue };

            let h_o = h_pos.distance_to(&o_atom.pos);
            let n_o = n_atom.pos.distance_to(&o_atom.pos);
            let in_range = if explicit_h {
                h_o >= H_O_RANGE.0 && h_o <= H_O_RANGE.1
            } else {
                n_o >= N_O_RANGE.0 && n_o <= N_O_RANGE.1
            };
            if !in_range {
                continue;
            }

            let angle_deg = planar_angle3(&n_atom.pos, &h_pos, &o_atom.pos).to_degrees();
            if angle_deg < MIN_ANGLE_DEG {
                continue;
            }

            bonds.push(HydrogenBond {
                donor_res: donor,
                acceptor_res: acceptor,
                h_o_distance: h_o,
                n_o_distance: n_o,
                angle_deg,
                energy: bond_energy(n_o, angle_deg),
            });
        }
    }
    return bonds;
}

/// Sum of the energies of all detected backbone hydrogen bonds.
pub struct HydrogenBondEnergy;

impl HydrogenBondEnergy {
    pub fn new() -> HydrogenBondEnergy {
        HydrogenBondEnergy
    }
}

impl Energy for HydrogenBondEnergy {
    fn energy(&self, protein: &Protein) -> f64 {
        find_hydrogen_bonds(protein).iter().map(|hb| hb.energy).sum()
    }

    fn energy_by_residue(&self, protein: &Protein, res_index: usize) -> f64 {
        find_hydrogen_bonds(protein)
            .iter()
            .filter(|hb| hb.donor_res == res_index || hb.acceptor_res == res_index)
            .map(|hb| hb.energy)
            .sum()
    }

    fn name(&self) -> String {
        String::from("HydrogenBonds")
    }
}
