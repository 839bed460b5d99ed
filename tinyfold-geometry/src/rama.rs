use std::fmt;
use std::fmt::{Display, Formatter};

use crate::{dihedral_angle4, wrap_degrees, Protein};

/// The `(phi, psi)` backbone dihedral pair of a single residue, in radians.
///
/// `phi` is undefined for the first residue of a chain and `psi` for the last one;
/// undefined angles are stored as NaN and contribute neither gradient nor penalty
/// anywhere in the scoring machinery.
#[derive(Clone, Copy, Debug)]
pub struct BackboneAngles {
    pub phi: f64,
    pub psi: f64,
}

impl BackboneAngles {
    /// Creates a new `(phi, psi)` pair; the angles are given in radians.
    pub fn new(phi: f64, psi: f64) -> BackboneAngles {
        BackboneAngles { phi, psi }
    }

    /// The extended-chain conformation: `phi = -120`, `psi = 120` degrees.
    ///
    /// Used as a fallback wherever an angle is undefined, e.g. at chain termini.
    pub fn extended() -> BackboneAngles {
        BackboneAngles { phi: (-120.0_f64).to_radians(), psi: 120.0_f64.to_radians() }
    }

    /// Says whether `phi` holds a defined value.
    pub fn has_phi(&self) -> bool {
        !self.phi.is_nan()
    }

    /// Says whether `psi` holds a defined value.
    pub fn has_psi(&self) -> bool {
        !self.psi.is_nan()
    }
}

/// Measures the `(phi, psi)` angles of every residue directly from Cartesian coordinates.
///
/// `phi(i)` is the `C(i-1)-N(i)-CA(i)-C(i)` torsion and `psi(i)` the
/// `N(i)-CA(i)-C(i)-N(i+1)` torsion. Angles whose defining atoms are missing,
/// which includes `phi` of the first and `psi` of the last residue, come out as NaN.
pub fn ramachandran(protein: &Protein) -> Vec<BackboneAngles> {
    let n = protein.count_residues();
    let mut angles = Vec::with_capacity(n);

    for i in 0..n {
        let n_i = protein.backbone_atom(i, "N");
        let ca_i = protein.backbone_atom(i, "CA");
        let c_i = protein.backbone_atom(i, "C");

        let phi = match (i.checked_sub(1).and_then(|h| protein.backbone_atom(h, "C")), n_i, ca_i, c_i) {
            (Some(c_prev), Some(n), Some(ca), Some(c)) => {
                dihedral_angle4(&c_prev.pos, &n.pos, &ca.pos, &c.pos)
            }
            _ => f64::NAN,
        };
        let n_next = if i + 1 < n { protein.backbone_atom(i + 1, "N") } else { None };
        let psi = match (n_i, ca_i, c_i, n_next) {
            (Some(n_a), Some(ca), Some(c), Some(n_nx)) => {
                dihedral_angle4(&n_a.pos, &ca.pos, &c.pos, &n_nx.pos)
            }
            _ => f64::NAN,
        };
        angles.push(BackboneAngles::new(phi, psi));
    }

    return angles;
}

/// Secondary-structure class assigned to a `(phi, psi)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecondaryClass {
    AlphaHelix,
    BetaSheet,
    Ppii,
    LeftHelix,
    Other,
}

impl Display for SecondaryClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let code = match self {
            SecondaryClass::AlphaHelix => "H",
            SecondaryClass::BetaSheet => "E",
            SecondaryClass::Ppii => "P",
            SecondaryClass::LeftHelix => "L",
            SecondaryClass::Other => "-",
        };
        write!(f, "{}", code)
    }
}

/// Classifies a `(phi, psi)` pair, given in degrees, into a secondary-structure class.
///
/// Distances from the class centres are measured circularly, i.e. with the +-180 degree
/// wraparound. The classes are tested in the fixed order: alpha helix, beta sheet,
/// polyproline II, left-handed helix; the first match wins.
///
/// ```
/// # use tinyfold_geometry::{classify_rama, SecondaryClass};
/// assert_eq!(classify_rama(-60.0, -45.0), SecondaryClass::AlphaHelix);
/// assert_eq!(classify_rama(-120.0, 130.0), SecondaryClass::BetaSheet);
/// assert_eq!(classify_rama(57.0, 47.0), SecondaryClass::LeftHelix);
/// assert_eq!(classify_rama(0.0, 0.0), SecondaryClass::Other);
/// ```
pub fn classify_rama(phi_deg: f64, psi_deg: f64) -> SecondaryClass {
    if phi_deg.is_nan() || psi_deg.is_nan() {
        return SecondaryClass::Other;
    }
    let near = |value: f64, center: f64, window: f64| wrap_degrees(value - center).abs() <= window;

    if near(phi_deg, -60.0, 30.0) && near(psi_deg, -45.0, 30.0) {
        return SecondaryClass::AlphaHelix;
    }
    if near(phi_deg, -120.0, 40.0) && near(psi_deg, 120.0, 50.0) {
        return SecondaryClass::BetaSheet;
    }
    if near(phi_deg, -75.0, 30.0) && near(psi_deg, 145.0, 30.0) {
        return SecondaryClass::Ppii;
    }
    if near(phi_deg, 60.0, 25.0) && near(psi_deg, 45.0, 25.0) {
        return SecondaryClass::LeftHelix;
    }
    return SecondaryClass::Other;
}
