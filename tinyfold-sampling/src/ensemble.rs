use std::collections::HashMap;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tinyfold_geometry::{build_backbone, ramachandran, validate_sequence, BackboneAngles, Protein,
                        Quaternion};

use crate::basins::{basin_by_name, Basin, BASINS};
use crate::errors::SamplerError;

/// Settings of the conformer ensemble generators.
#[derive(Clone, Debug)]
pub struct SamplerConfig {
    /// how many whole-sequence samples to draw from each basin during per-basin exploration
    pub samples_per_basin: usize,
    /// force glycines into the left-handed basin during mixed sampling
    pub force_glycine_left: bool,
    /// force prolines into the polyproline-II basin during mixed sampling
    pub force_proline_ppii: bool,
    /// per-basin multiplier applied on top of the library populations, keyed by basin name
    pub basin_bias: HashMap<String, f64>,
    /// seed of the random generator; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> SamplerConfig {
        SamplerConfig {
            samples_per_basin: 8,
            force_glycine_left: true,
            force_proline_ppii: true,
            basin_bias: HashMap::new(),
            seed: None,
        }
    }
}

/// Generates ensembles of backbone conformations by sampling the Ramachandran basins.
///
/// Three generators are available: [`per_basin_ensemble()`](ConformationSampler::per_basin_ensemble)
/// builds uniform structures (all-helix, all-sheet, ...), [`mixed_ensemble()`](ConformationSampler::mixed_ensemble)
/// draws every residue independently with population weighting, and
/// [`constrained_ensemble()`](ConformationSampler::constrained_ensemble) pins chosen
/// residues to named basins. All generators return fully built structures.
///
/// ```
/// # use tinyfold_sampling::{ConformationSampler, SamplerConfig};
/// let config = SamplerConfig { seed: Some(42), ..SamplerConfig::default() };
/// let mut sampler = ConformationSampler::new(config);
/// let ensemble = sampler.mixed_ensemble("GAVLK", 10).unwrap();
/// assert_eq!(ensemble.len(), 10);
/// assert!(ensemble.iter().all(|p| p.count_atoms() == 20));
/// ```
pub struct ConformationSampler {
    config: SamplerConfig,
    rng: SmallRng,
}

impl ConformationSampler {
    /// Creates a sampler; the generator is seeded from the configuration when a seed is set.
    pub fn new(config: SamplerConfig) -> ConformationSampler {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        ConformationSampler { config, rng }
    }

    /// The effective selection weight of a basin for a given residue.
    fn basin_weight(&self, basin: &Basin, aa: char) -> f64 {
        if !basin.admits(aa) {
            return 0.0;
        }
        let bias = self.config.basin_bias.get(basin.name).copied().unwrap_or(1.0);
        return basin.population * bias;
    }

    /// Chooses a basin for one residue by population-weighted roulette.
    fn choose_basin(&mut self, res_index: usize, aa: char) -> Result<&'static Basin, SamplerError> {
        if self.config.force_glycine_left && aa.eq_ignore_ascii_case(&'G') {
            return Ok(basin_by_name("left").unwrap());
        }
        if self.config.force_proline_ppii && aa.eq_ignore_ascii_case(&'P') {
            return Ok(basin_by_name("ppii").unwrap());
        }

        let weights: Vec<f64> = BASINS.iter().map(|b| self.basin_weight(b, aa)).collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(SamplerError::NoBasinForResidue { res_index, aa });
        }
        let mut ticket = self.rng.gen_range(0.0..total);
        for (basin, weight) in BASINS.iter().zip(weights.iter()) {
            ticket -= weight;
            if ticket <= 0.0 {
                return Ok(basin);
            }
        }
        return Ok(&BASINS[BASINS.len() - 1]);
    }

    /// Per-basin exploration: whole-sequence samples with every residue in one basin.
    ///
    /// For each of the seven library basins, `samples_per_basin` structures are built
    /// in which every residue draws from that basin, yielding uniform helices, sheets
    /// and so on as optimisation starting points.
    pub fn per_basin_ensemble(&mut self, sequence: &str) -> Result<Vec<Protein>, SamplerError> {
        validate_sequence(sequence)?;
        if self.config.samples_per_basin == 0 {
            return Err(SamplerError::EmptyEnsemble);
        }
        let mut ensemble = Vec::with_capacity(BASINS.len() * self.config.samples_per_basin);
        for basin in &BASINS {
            for _ in 0..self.config.samples_per_basin {
                let angles: Vec<BackboneAngles> =
                    sequence.chars().map(|_| basin.sample(&mut self.rng)).collect();
                ensemble.push(build_backbone(sequence, &angles)?);
            }
        }
        debug!("per-basin ensemble: {} structures of {} residues", ensemble.len(), sequence.len());
        return Ok(ensemble);
    }

    /// Mixed-basin sampling: every residue independently selects its basin.
    ///
    /// Basins are weighted by `population * bias`; glycines and prolines are forced
    /// into their dedicated basins when the corresponding flags are set.
    pub fn mixed_ensemble(&mut self, sequence: &str, n_samples: usize) -> Result<Vec<Protein>, SamplerError> {
        validate_sequence(sequence)?;
        if n_samples == 0 {
            return Err(SamplerError::EmptyEnsemble);
        }
        let mut ensemble = Vec::with_capacity(n_samples);
        for _ in 0..n_samples {
            let mut angles = Vec::with_capacity(sequence.len());
            for (res_index, aa) in sequence.chars().enumerate() {
                let basin = self.choose_basin(res_index, aa)?;
                angles.push(basin.sample(&mut self.rng));
            }
            ensemble.push(build_backbone(sequence, &angles)?);
        }
        return Ok(ensemble);
    }

    /// Constraint-guided sampling: selected residues draw only from their named basin.
    ///
    /// `constraints` maps residue indices to basin names; unconstrained residues fall
    /// back to mixed sampling. An unknown basin name is a caller error.
    pub fn constrained_ensemble(
        &mut self,
        sequence: &str,
        constraints: &HashMap<usize, String>,
        n_samples: usize,
    ) -> Result<Vec<Protein>, SamplerError> {
        validate_sequence(sequence)?;
        if n_samples == 0 {
            return Err(SamplerError::EmptyEnsemble);
        }
        // --- resolve the names once, before any drawing starts
        let mut pinned: HashMap<usize, &'static Basin> = HashMap::new();
        for (res_index, name) in constraints {
            let basin = basin_by_name(name)
                .ok_or_else(|| SamplerError::UnknownBasin { name: name.clone() })?;
            pinned.insert(*res_index, basin);
        }

        let mut ensemble = Vec::with_capacity(n_samples);
        for _ in 0..n_samples {
            let mut angles = Vec::with_capacity(sequence.len());
            for (res_index, aa) in sequence.chars().enumerate() {
                let basin = match pinned.get(&res_index) {
                    Some(basin) => *basin,
                    None => self.choose_basin(res_index, aa)?,
                };
                angles.push(basin.sample(&mut self.rng));
            }
            ensemble.push(build_backbone(sequence, &angles)?);
        }
        return Ok(ensemble);
    }
}

/// Interpolates between two conformations of the same sequence on the quaternion sphere.
///
/// Each residue's `(phi, psi)` pair is mapped to a unit quaternion, the two quaternions
/// are slerped at parameter `t` and the result is mapped back to angles; the chain is
/// then rebuilt from the interpolated angles. At `t = 0` the result matches `a`, at
/// `t = 1` it matches `b`, and intermediate values sweep a smooth path between them.
pub fn interpolate_conformations(a: &Protein, b: &Protein, t: f64) -> Result<Protein, SamplerError> {
    let angles_a = ramachandran(a);
    let angles_b = ramachandran(b);

    let mut blended = Vec::with_capacity(angles_a.len());
    for (pair_a, pair_b) in angles_a.iter().zip(angles_b.iter()) {
        if !pair_a.has_phi() || !pair_a.has_psi() || !pair_b.has_phi() || !pair_b.has_psi() {
            // --- keep terminal angles undefined; the builder substitutes its defaults
            blended.push(BackboneAngles::new(
                if pair_a.has_phi() && pair_b.has_phi() { (1.0 - t) * pair_a.phi + t * pair_b.phi } else { f64::NAN },
                if pair_a.has_psi() && pair_b.has_psi() { (1.0 - t) * pair_a.psi + t * pair_b.psi } else { f64::NAN },
            ));
            continue;
        }
        let qa = Quaternion::from_backbone_angles(pair_a.phi, pair_a.psi);
        let qb = Quaternion::from_backbone_angles(pair_b.phi, pair_b.psi);
        let (phi, psi) = Quaternion::slerp(&qa, &qb, t).to_backbone_angles();
        blended.push(BackboneAngles::new(phi, psi));
    }

    return Ok(build_backbone(a.sequence(), &blended)?);
}
