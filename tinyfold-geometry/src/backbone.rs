//! Builds backbone Cartesian coordinates from a sequence and a vector of `(phi, psi)` angles.
//!
//! The construction is incremental: every atom is restored from the positions of three
//! previously placed atoms plus its internal coordinates (bond length, planar angle,
//! torsion angle). Bond lengths and planar angles are fixed at the Engh-Huber values,
//! the peptide bond is planar trans, so the `(phi, psi)` pairs are the only degrees
//! of freedom of a built chain.

use crate::errors::GeometryError;
use crate::{planar_angle3, Atom, BackboneAngles, Matrix3x3, Protein, Vec3};

/// Engh-Huber length of the `N-CA` bond, in Angstroms.
pub const BOND_N_CA: f64 = 1.46;
/// Engh-Huber length of the `CA-C` bond, in Angstroms.
pub const BOND_CA_C: f64 = 1.52;
/// Engh-Huber length of the peptide `C-N` bond, in Angstroms.
pub const BOND_C_N: f64 = 1.33;
/// Engh-Huber length of the carbonyl `C=O` bond, in Angstroms.
pub const BOND_C_O: f64 = 1.23;

/// Engh-Huber `N-CA-C` planar angle, in radians.
pub const ANGLE_N_CA_C: f64 = 110.0 * std::f64::consts::PI / 180.0;
/// Engh-Huber `CA-C-N` planar angle, in radians.
pub const ANGLE_CA_C_N: f64 = 116.0 * std::f64::consts::PI / 180.0;
/// Engh-Huber `C-N-CA` planar angle, in radians.
pub const ANGLE_C_N_CA: f64 = 122.0 * std::f64::consts::PI / 180.0;
/// Engh-Huber `CA-C=O` planar angle, in radians.
pub const ANGLE_CA_C_O: f64 = 120.8 * std::f64::consts::PI / 180.0;

/// The trans peptide bond torsion: `omega = 180` degrees.
pub const OMEGA_TRANS: f64 = std::f64::consts::PI;

/// Restores the position of a fourth atom from three already placed ones.
///
/// The new atom is placed at the distance `bond` from `c`, forming the `b-c-d` planar
/// angle `planar` and the `a-b-c-d` torsion angle `dihedral`. This is the elementary
/// step of the natural extension reference frame (NeRF) reconstruction; by construction
/// `dihedral_angle4(a, b, c, d) == dihedral`.
///
/// ```
/// # use tinyfold_geometry::{backbone::place_atom, dihedral_angle4, Vec3};
/// let a = Vec3::new(0.0, 1.0, 0.0);
/// let b = Vec3::zero();
/// let c = Vec3::new(1.5, 0.0, 0.0);
/// let d = place_atom(&a, &b, &c, 1.5, 2.0, 1.0);
/// assert!((dihedral_angle4(&a, &b, &c, &d) - 1.0).abs() < 1e-9);
/// assert!((d.distance_to(&c) - 1.5).abs() < 1e-9);
/// ```
pub fn place_atom(a: &Vec3, b: &Vec3, c: &Vec3, bond: f64, planar: f64, dihedral: f64) -> Vec3 {
    let mut bc = Vec3::sub_s(c, b);
    bc.normalize();
    let mut n = Vec3::sub_s(b, a);
    n.normalize();
    n = Vec3::cross(&n, &bc);
    n.normalize();
    let m = Vec3::cross(&n, &bc);
    let frame = Matrix3x3::from_column_vectors(&bc, &m, &n);

    let supplement = std::f64::consts::PI - planar;
    let mut d = Vec3::new(
        bond * supplement.cos(),
        bond * supplement.sin() * dihedral.cos(),
        bond * supplement.sin() * dihedral.sin(),
    );
    frame.mul_vec_mut(&mut d);
    d += c;
    return d;
}

/// Substitutes undefined (NaN) angles with the extended-chain defaults.
fn effective_angles(angles: &BackboneAngles) -> (f64, f64) {
    let fallback = BackboneAngles::extended();
    let phi = if angles.has_phi() { angles.phi } else { fallback.phi };
    let psi = if angles.has_psi() { angles.psi } else { fallback.psi };
    return (phi, psi);
}

/// Builds a protein backbone from a sequence and one `(phi, psi)` pair per residue.
///
/// The first residue's `N`, `CA` and `C` land in a canonical reference frame: `N` at
/// the origin, `CA` on the X axis, `C` in the XY plane. Every following residue is
/// joined by a planar trans peptide bond; `psi(i-1)` places `N(i)`, `phi(i)` places
/// `C(i)` and `psi(i)` orients the carbonyl oxygen, which points anti to the next
/// amide nitrogen. NaN angles at the termini are replaced by extended-chain defaults.
///
/// The measured angles of a built chain reproduce the input:
/// ```
/// # use tinyfold_geometry::{build_backbone, ramachandran, BackboneAngles};
/// let angles = vec![
///     BackboneAngles::new(f64::NAN, -0.8),
///     BackboneAngles::new(-1.1, -0.7),
///     BackboneAngles::new(-1.0, f64::NAN),
/// ];
/// let protein = build_backbone("GAG", &angles).unwrap();
/// let measured = ramachandran(&protein);
/// assert!((measured[1].phi + 1.1).abs() < 1e-6);
/// assert!((measured[1].psi + 0.7).abs() < 1e-6);
/// assert!(measured[0].phi.is_nan());
/// assert!(measured[2].psi.is_nan());
/// ```
pub fn build_backbone(sequence: &str, angles: &[BackboneAngles]) -> Result<Protein, GeometryError> {
    let mut protein = Protein::new(sequence)?;
    let n_res = protein.count_residues();
    if angles.len() != n_res {
        return Err(GeometryError::AngleCountMismatch { n_residues: n_res, n_angles: angles.len() });
    }

    // --- canonical frame for the first residue
    let mut n_pos = Vec3::zero();
    let mut ca_pos = Vec3::new(BOND_N_CA, 0.0, 0.0);
    let stub = std::f64::consts::PI - ANGLE_N_CA_C;
    let mut c_pos = Vec3::new(ca_pos.x + BOND_CA_C * stub.cos(), BOND_CA_C * stub.sin(), 0.0);

    let mut serial = 1;
    for i in 0..n_res {
        let (phi, psi) = effective_angles(&angles[i]);
        if i > 0 {
            let (_, psi_prev) = effective_angles(&angles[i - 1]);
            let n_next = place_atom(&n_pos, &ca_pos, &c_pos, BOND_C_N, ANGLE_CA_C_N, psi_prev);
            let ca_next = place_atom(&ca_pos, &c_pos, &n_next, BOND_N_CA, ANGLE_C_N_CA, OMEGA_TRANS);
            let c_next = place_atom(&c_pos, &n_next, &ca_next, BOND_CA_C, ANGLE_N_CA_C, phi);
            n_pos = n_next;
            ca_pos = ca_next;
            c_pos = c_next;
        }
        let o_pos = place_atom(&n_pos, &ca_pos, &c_pos, BOND_C_O, ANGLE_CA_C_O, psi + std::f64::consts::PI);

        for (name, pos) in [("N", &n_pos), ("CA", &ca_pos), ("C", &c_pos), ("O", &o_pos)] {
            if !pos.is_finite() {
                return Err(GeometryError::NonFiniteCoordinates { res_index: i });
            }
            protein.push_atom(Atom::new(serial, name, i, *pos));
            serial += 1;
        }
    }

    return Ok(protein);
}

/// Rebuilds a protein's backbone in place from a fresh vector of `(phi, psi)` angles.
///
/// A new structure is constructed with [`build_backbone()`] and its coordinates are
/// copied onto the existing atoms, matched by residue index and atom name. The copy
/// is never done by flat atom index, so extra atoms (e.g. an explicit amide hydrogen)
/// or a different intra-residue ordering do not corrupt the result.
pub fn rebuild_backbone(protein: &mut Protein, angles: &[BackboneAngles]) -> Result<(), GeometryError> {
    let fresh = build_backbone(protein.sequence(), angles)?;
    protein.copy_backbone_positions(&fresh);
    return Ok(());
}

/// Measures the peptide-bond length between two adjacent residues, `C(i)-N(i+1)`.
///
/// Returns `None` when either atom is missing.
pub fn peptide_bond_length(protein: &Protein, res_index: usize) -> Option<f64> {
    let c = protein.backbone_atom(res_index, "C")?;
    let n = protein.backbone_atom(res_index + 1, "N")?;
    return Some(c.pos.distance_to(&n.pos));
}

/// Measures the `N-CA-C` planar angle of a residue, in radians.
pub fn n_ca_c_angle(protein: &Protein, res_index: usize) -> Option<f64> {
    let n = protein.backbone_atom(res_index, "N")?;
    let ca = protein.backbone_atom(res_index, "CA")?;
    let c = protein.backbone_atom(res_index, "C")?;
    return Some(planar_angle3(&n.pos, &ca.pos, &c.pos));
}
