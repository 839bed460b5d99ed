//! Parameter tables of the energy model: the backbone subset of AMBER ff14SB,
//! Bondi-derived Lennard-Jones parameters, Kyte-Doolittle hydrophobicities and
//! Chou-Fasman secondary-structure propensities.

/// Harmonic parameters of a single covalent bond: `E = k (r - r0)^2`.
#[derive(Clone, Copy, Debug)]
pub struct BondParam {
    /// force constant in kcal/mol/A^2
    pub k: f64,
    /// equilibrium length in Angstroms
    pub r0: f64,
}

/// Harmonic parameters of a single planar angle: `E = k (theta - theta0)^2`.
#[derive(Clone, Copy, Debug)]
pub struct AngleParam {
    /// force constant in kcal/mol/rad^2
    pub k: f64,
    /// equilibrium angle in radians
    pub theta0: f64,
}

/// ff14SB parameters of the intra-residue `N-CA` bond.
pub const BOND_N_CA: BondParam = BondParam { k: 337.0, r0: 1.46 };
/// ff14SB parameters of the intra-residue `CA-C` bond.
pub const BOND_CA_C: BondParam = BondParam { k: 317.0, r0: 1.52 };
/// ff14SB parameters of the carbonyl `C=O` bond.
pub const BOND_C_O: BondParam = BondParam { k: 570.0, r0: 1.23 };
/// ff14SB parameters of the peptide `C-N` bond joining adjacent residues.
pub const BOND_C_N: BondParam = BondParam { k: 490.0, r0: 1.33 };

/// ff14SB parameters of the `N-CA-C` angle.
pub const ANGLE_N_CA_C: AngleParam = AngleParam { k: 63.0, theta0: 110.0 * std::f64::consts::PI / 180.0 };
/// ff14SB parameters of the `CA-C-N` angle across the peptide bond.
pub const ANGLE_CA_C_N: AngleParam = AngleParam { k: 70.0, theta0: 116.0 * std::f64::consts::PI / 180.0 };
/// ff14SB parameters of the `C-N-CA` angle across the peptide bond.
pub const ANGLE_C_N_CA: AngleParam = AngleParam { k: 50.0, theta0: 122.0 * std::f64::consts::PI / 180.0 };
/// ff14SB parameters of the `CA-C=O` angle.
pub const ANGLE_CA_C_O: AngleParam = AngleParam { k: 80.0, theta0: 120.8 * std::f64::consts::PI / 180.0 };

/// The Coulomb conversion factor, kcal*A/(mol*e^2).
pub const COULOMB_CONSTANT: f64 = 332.06;

/// ff14SB partial charge of a backbone atom, in elementary charges.
///
/// Atoms outside the backbone contribute no charge to the electrostatic term.
///
/// ```
/// # use tinyfold_ff::params::partial_charge;
/// assert!((partial_charge("N") + 0.4157).abs() < 1e-9);
/// assert_eq!(partial_charge("CB"), 0.0);
/// ```
pub fn partial_charge(atom_name: &str) -> f64 {
    match atom_name {
        "N" => -0.4157,
        "H" => 0.2719,
        "CA" => 0.0337,
        "C" => 0.5973,
        "O" => -0.5679,
        _ => 0.0,
    }
}

/// Lennard-Jones well depth and collision diameter for a chemical element.
///
/// The `sigma` values derive from the Bondi van der Waals radii
/// (`sigma = 2 R / 2^(1/6)`); the well depths follow the AMBER convention.
pub fn lj_params(element: &str) -> (f64, f64) {
    match element {
        "C" => (0.0860, 3.029),
        "N" => (0.1700, 2.762),
        "O" => (0.2100, 2.708),
        "H" => (0.0157, 2.138),
        "S" => (0.2500, 3.207),
        _ => (0.0, 0.0),
    }
}

/// Kyte-Doolittle hydrophobicity of an amino acid given by its one-letter code.
///
/// Positive values mark hydrophobic residues, negative ones hydrophilic.
///
/// ```
/// # use tinyfold_ff::params::kyte_doolittle;
/// assert!(kyte_doolittle('I') > 4.0);
/// assert!(kyte_doolittle('R') < -4.0);
/// ```
pub fn kyte_doolittle(aa: char) -> f64 {
    match aa.to_ascii_uppercase() {
        'I' => 4.5,
        'V' => 4.2,
        'L' => 3.8,
        'F' => 2.8,
        'C' => 2.5,
        'M' => 1.9,
        'A' => 1.8,
        'G' => -0.4,
        'T' => -0.7,
        'S' => -0.8,
        'W' => -0.9,
        'Y' => -1.3,
        'P' => -1.6,
        'H' => -3.2,
        'E' => -3.5,
        'Q' => -3.5,
        'D' => -3.5,
        'N' => -3.5,
        'K' => -3.9,
        'R' => -4.5,
        _ => 0.0,
    }
}

/// Chou-Fasman propensities of an amino acid: `(helix, sheet, turn)`.
pub fn chou_fasman(aa: char) -> (f64, f64, f64) {
    match aa.to_ascii_uppercase() {
        'A' => (1.42, 0.83, 0.66),
        'R' => (0.98, 0.93, 0.95),
        'N' => (0.67, 0.89, 1.56),
        'D' => (1.01, 0.54, 1.46),
        'C' => (0.70, 1.19, 1.19),
        'Q' => (1.11, 1.10, 0.98),
        'E' => (1.51, 0.37, 0.74),
        'G' => (0.57, 0.75, 1.56),
        'H' => (1.00, 0.87, 0.95),
        'I' => (1.08, 1.60, 0.47),
        'L' => (1.21, 1.30, 0.59),
        'K' => (1.16, 0.74, 1.01),
        'M' => (1.45, 1.05, 0.60),
        'F' => (1.13, 1.38, 0.60),
        'P' => (0.57, 0.55, 1.52),
        'S' => (0.77, 0.75, 1.43),
        'T' => (0.83, 1.19, 0.96),
        'W' => (1.08, 1.37, 0.96),
        'Y' => (0.69, 1.47, 1.14),
        'V' => (1.06, 1.70, 0.50),
        _ => (1.0, 1.0, 1.0),
    }
}
