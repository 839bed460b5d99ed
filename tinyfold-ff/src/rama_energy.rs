use tinyfold_geometry::{ramachandran, wrap_degrees, Protein};

use crate::ff::Energy;

/// A single Gaussian well of the dihedral potential, in degrees.
struct RamaWell {
    phi_c: f64,
    psi_c: f64,
    sigma_phi: f64,
    sigma_psi: f64,
}

static GENERAL_WELLS: [RamaWell; 4] = [
    RamaWell { phi_c: -60.0, psi_c: -45.0, sigma_phi: 20.0, sigma_psi: 20.0 },    // alpha
    RamaWell { phi_c: -120.0, psi_c: 120.0, sigma_phi: 30.0, sigma_psi: 30.0 },   // beta
    RamaWell { phi_c: 60.0, psi_c: 45.0, sigma_phi: 25.0, sigma_psi: 25.0 },      // left-handed
    RamaWell { phi_c: -75.0, psi_c: 145.0, sigma_phi: 25.0, sigma_psi: 25.0 },    // PPII
];

// --- glycine reaches the same wells but with 1.5x broader variances
static GLYCINE_WELLS: [RamaWell; 4] = [
    RamaWell { phi_c: -60.0, psi_c: -45.0, sigma_phi: 30.0, sigma_psi: 30.0 },
    RamaWell { phi_c: -120.0, psi_c: 120.0, sigma_phi: 45.0, sigma_psi: 45.0 },
    RamaWell { phi_c: 60.0, psi_c: 45.0, sigma_phi: 37.5, sigma_psi: 37.5 },
    RamaWell { phi_c: -75.0, psi_c: 145.0, sigma_phi: 37.5, sigma_psi: 37.5 },
];

// --- the proline ring pins phi near -60: only helix-like and PPII-like wells remain
static PROLINE_WELLS: [RamaWell; 2] = [
    RamaWell { phi_c: -60.0, psi_c: -45.0, sigma_phi: 15.0, sigma_psi: 20.0 },
    RamaWell { phi_c: -60.0, psi_c: 145.0, sigma_phi: 15.0, sigma_psi: 25.0 },
];

/// overall scale of the dihedral penalty, in kcal/mol, for (general, glycine, proline)
const SCALE_GENERAL: f64 = 15.0;
const SCALE_GLYCINE: f64 = 5.0;
const SCALE_PROLINE: f64 = 20.0;

fn wells_for(aa: char) -> (&'static [RamaWell], f64) {
    match aa.to_ascii_uppercase() {
        'G' => (&GLYCINE_WELLS, SCALE_GLYCINE),
        'P' => (&PROLINE_WELLS, SCALE_PROLINE),
        _ => (&GENERAL_WELLS, SCALE_GENERAL),
    }
}

/// Ramachandran dihedral potential: a Gaussian-mixture well landscape over `(phi, psi)`.
///
/// Every residue pays `scale * min_k (1 - G_k(phi, psi))`, where `G_k` is a separable
/// Gaussian centred on the k-th allowed basin and the `(phi, psi)` distances are taken
/// with the +-180 degree wraparound. A conformation sitting exactly in a basin centre
/// costs nothing; one far from every basin pays the full per-residue scale. Glycine
/// runs on broader wells at a third of the general scale, proline on two narrow wells
/// pinned at `phi = -60` degrees.
///
/// ```
/// # use tinyfold_ff::RamachandranEnergy;
/// // --- an ideal helix residue sits at the bottom of the alpha well
/// let at_center = RamachandranEnergy::energy_for('A', (-60.0_f64).to_radians(), (-45.0_f64).to_radians());
/// assert!(at_center < 1e-9);
/// // --- a forbidden conformation pays nearly the whole scale
/// let forbidden = RamachandranEnergy::energy_for('A', (170.0_f64).to_radians(), (-100.0_f64).to_radians());
/// assert!(forbidden > 10.0);
/// ```
pub struct RamachandranEnergy;

impl RamachandranEnergy {
    pub fn new() -> RamachandranEnergy {
        RamachandranEnergy
    }

    /// Dihedral energy of a single residue; undefined (NaN) angles cost nothing.
    pub fn energy_for(aa: char, phi: f64, psi: f64) -> f64 {
        if phi.is_nan() || psi.is_nan() {
            return 0.0;
        }
        let phi_deg = phi.to_degrees();
        let psi_deg = psi.to_degrees();
        let (wells, scale) = wells_for(aa);

        let mut best = f64::MAX;
        for well in wells {
            let d_phi = wrap_degrees(phi_deg - well.phi_c) / well.sigma_phi;
            let d_psi = wrap_degrees(psi_deg - well.psi_c) / well.sigma_psi;
            let g = (-0.5 * (d_phi * d_phi + d_psi * d_psi)).exp();
            let cost = 1.0 - g;
            if cost < best {
                best = cost;
            }
        }
        return scale * best;
    }
}

impl Energy for RamachandranEnergy {
    fn energy(&self, protein: &Protein) -> f64 {
        let angles = ramachandran(protein);
        let mut en = 0.0;
        for (i, a) in angles.iter().enumerate() {
            en += RamachandranEnergy::energy_for(protein.aa1(i), a.phi, a.psi);
        }
        return en;
    }

    fn energy_by_residue(&self, protein: &Protein, res_index: usize) -> f64 {
        let angles = ramachandran(protein);
        let a = &angles[res_index];
        return RamachandranEnergy::energy_for(protein.aa1(res_index), a.phi, a.psi);
    }

    fn name(&self) -> String {
        String::from("Ramachandran")
    }
}
