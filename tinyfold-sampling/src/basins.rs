use rand::Rng;
use rand_distr::{Distribution, Normal};

use tinyfold_geometry::{wrap_degrees, BackboneAngles};

/// One allowed region of the Ramachandran map, with its sampling parameters.
///
/// Angles are drawn from a separable Gaussian centred on `(phi_c, psi_c)` and wrapped
/// into `[-180, 180)` degrees. `population` weighs the basin during mixed sampling;
/// `restriction` optionally limits the basin to a set of amino acids.
#[derive(Clone, Copy, Debug)]
pub struct Basin {
    /// short name of this basin, used by constraint maps
    pub name: &'static str,
    /// centre of the basin, phi, in degrees
    pub phi_c: f64,
    /// centre of the basin, psi, in degrees
    pub psi_c: f64,
    /// width of the basin along phi, in degrees
    pub sigma_phi: f64,
    /// width of the basin along psi, in degrees
    pub sigma_psi: f64,
    /// prior probability of this basin in a random coil
    pub population: f64,
    /// one-letter codes of the only residues allowed in this basin, if any
    pub restriction: Option<&'static [char]>,
}

/// The fixed library of seven Ramachandran basins.
pub static BASINS: [Basin; 7] = [
    Basin { name: "alpha", phi_c: -60.0, psi_c: -45.0, sigma_phi: 20.0, sigma_psi: 20.0,
            population: 0.35, restriction: None },
    Basin { name: "beta", phi_c: -120.0, psi_c: 120.0, sigma_phi: 30.0, sigma_psi: 30.0,
            population: 0.25, restriction: None },
    Basin { name: "left", phi_c: 60.0, psi_c: 45.0, sigma_phi: 25.0, sigma_psi: 25.0,
            population: 0.05, restriction: Some(&['G']) },
    Basin { name: "ppii", phi_c: -75.0, psi_c: 145.0, sigma_phi: 25.0, sigma_psi: 25.0,
            population: 0.15, restriction: None },
    Basin { name: "bridge", phi_c: -90.0, psi_c: 0.0, sigma_phi: 30.0, sigma_psi: 40.0,
            population: 0.10, restriction: None },
    Basin { name: "turn1", phi_c: -60.0, psi_c: -30.0, sigma_phi: 20.0, sigma_psi: 30.0,
            population: 0.05, restriction: None },
    Basin { name: "turn2", phi_c: 80.0, psi_c: 0.0, sigma_phi: 25.0, sigma_psi: 30.0,
            population: 0.03, restriction: Some(&['G', 'N', 'D']) },
];

/// Finds a basin in the library by its name.
///
/// ```
/// # use tinyfold_sampling::basin_by_name;
/// assert_eq!(basin_by_name("alpha").unwrap().phi_c, -60.0);
/// assert!(basin_by_name("omega").is_none());
/// ```
pub fn basin_by_name(name: &str) -> Option<&'static Basin> {
    BASINS.iter().find(|b| b.name == name)
}

impl Basin {
    /// Says whether a residue, given by its one-letter code, may occupy this basin.
    pub fn admits(&self, aa: char) -> bool {
        match self.restriction {
            None => true,
            Some(allowed) => allowed.contains(&aa.to_ascii_uppercase()),
        }
    }

    /// Draws one `(phi, psi)` pair from this basin, in radians.
    ///
    /// The Gaussian draw happens in degrees and is wrapped into `[-180, 180)` before
    /// conversion. With zero widths the draw degenerates to the basin centre exactly.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BackboneAngles {
        // --- widths are compile-time constants, the distributions cannot fail
        let phi_dist = Normal::new(self.phi_c, self.sigma_phi).unwrap();
        let psi_dist = Normal::new(self.psi_c, self.sigma_psi).unwrap();
        let phi = wrap_degrees(phi_dist.sample(rng)).to_radians();
        let psi = wrap_degrees(psi_dist.sample(rng)).to_radians();
        return BackboneAngles::new(phi, psi);
    }
}
