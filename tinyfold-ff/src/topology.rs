//! Enumerates the explicit covalent bonds and planar angles of a protein backbone.

use tinyfold_geometry::Protein;

use crate::params::{AngleParam, BondParam, ANGLE_CA_C_N, ANGLE_CA_C_O, ANGLE_C_N_CA, ANGLE_N_CA_C,
                    BOND_CA_C, BOND_C_N, BOND_C_O, BOND_N_CA};

/// A covalent bond between two atoms, identified by their flat-list indices.
#[derive(Clone, Copy, Debug)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub param: BondParam,
}

/// A planar angle `i-j-k` with the vertex at `j`.
#[derive(Clone, Copy, Debug)]
pub struct Angle {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub param: AngleParam,
}

/// Lists every explicit backbone bond of a structure.
///
/// Per residue: `N-CA`, `CA-C` and `C=O`; additionally the peptide `C-N` bond
/// to the next residue. Bonds whose atoms are missing are skipped.
pub fn backbone_bonds(protein: &Protein) -> Vec<Bond> {
    let mut bonds = Vec::new();
    for res_index in 0..protein.count_residues() {
        let residue = protein.residue(res_index);
        if let (Some(n), Some(ca)) = (residue.n, residue.ca) {
            bonds.push(Bond { i: n, j: ca, param: BOND_N_CA });
        }
        if let (Some(ca), Some(c)) = (residue.ca, residue.c) {
            bonds.push(Bond { i: ca, j: c, param: BOND_CA_C });
        }
        if let (Some(c), Some(o)) = (residue.c, residue.o) {
            bonds.push(Bond { i: c, j: o, param: BOND_C_O });
        }
        if res_index + 1 < protein.count_residues() {
            let next = protein.residue(res_index + 1);
            if let (Some(c), Some(n_next)) = (residue.c, next.n) {
                bonds.push(Bond { i: c, j: n_next, param: BOND_C_N });
            }
        }
    }
    return bonds;
}

/// Lists every explicit backbone angle of a structure.
///
/// Per residue: `N-CA-C` and `CA-C=O`; across each peptide bond: `CA-C-N` and `C-N-CA`.
pub fn backbone_angles(protein: &Protein) -> Vec<Angle> {
    let mut angles = Vec::new();
    for res_index in 0..protein.count_residues() {
        let residue = protein.residue(res_index);
        if let (Some(n), Some(ca), Some(c)) = (residue.n, residue.ca, residue.c) {
            angles.push(Angle { i: n, j: ca, k: c, param: ANGLE_N_CA_C });
        }
        if let (Some(ca), Some(c), Some(o)) = (residue.ca, residue.c, residue.o) {
            angles.push(Angle { i: ca, j: c, k: o, param: ANGLE_CA_C_O });
        }
        if res_index + 1 < protein.count_residues() {
            let next = protein.residue(res_index + 1);
            if let (Some(ca), Some(c), Some(n_next)) = (residue.ca, residue.c, next.n) {
                angles.push(Angle { i: ca, j: c, k: n_next, param: ANGLE_CA_C_N });
            }
            if let (Some(c), Some(n_next), Some(ca_next)) = (residue.c, next.n, next.ca) {
                angles.push(Angle { i: c, j: n_next, k: ca_next, param: ANGLE_C_N_CA });
            }
        }
    }
    return angles;
}
