use std::time::Instant;

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use tinyfold_ff::params::{chou_fasman, kyte_doolittle};
use tinyfold_ff::{residue_sasa, Energy, ForceField, SasaParams};
use tinyfold_geometry::{classify_rama, ramachandran, rebuild_backbone, wrap_angle, Protein,
                        SecondaryClass};

use crate::errors::OptimError;
use crate::report::StageReport;

/// Settings of the constraint-guided refiner.
#[derive(Clone, Debug)]
pub struct RefineParams {
    /// number of refinement sweeps over the chain
    pub steps: usize,
    /// weight of the Chou-Fasman propensity bias
    pub weight_propensity: f64,
    /// weight of the hydrophobic-burial bias
    pub weight_burial: f64,
    /// weight of the soft Ramachandran bias
    pub weight_rama: f64,
    /// width of the Gaussian angle proposals, degrees
    pub proposal_sigma_deg: f64,
    /// seed of the random stream; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for RefineParams {
    fn default() -> RefineParams {
        RefineParams {
            steps: 100,
            weight_propensity: 1.0,
            weight_burial: 1.0,
            weight_rama: 1.0,
            proposal_sigma_deg: 5.0,
            seed: None,
        }
    }
}

impl RefineParams {
    fn validate(&self) -> Result<(), OptimError> {
        if self.steps < 1 {
            return Err(OptimError::invalid("steps", self.steps as f64));
        }
        if self.proposal_sigma_deg <= 0.0 {
            return Err(OptimError::invalid("proposal_sigma_deg", self.proposal_sigma_deg));
        }
        if self.weight_propensity < 0.0 {
            return Err(OptimError::invalid("weight_propensity", self.weight_propensity));
        }
        if self.weight_burial < 0.0 {
            return Err(OptimError::invalid("weight_burial", self.weight_burial));
        }
        if self.weight_rama < 0.0 {
            return Err(OptimError::invalid("weight_rama", self.weight_rama));
        }
        return Ok(());
    }
}

/// Greedy descent over the combined force-field and structural-bias score.
///
/// Three auxiliary energies steer the refinement on top of the physical total:
/// a Chou-Fasman term that rewards residues sitting in the secondary structure they
/// statistically prefer, a burial term that charges hydrophobic residues for exposed
/// surface, and a soft Ramachandran term (-0.5 for any allowed basin, +2.0 outside
/// all of them). Each sweep proposes one small Gaussian angle change per residue and
/// keeps it only when the combined score goes down.
pub struct ConstraintRefiner {
    params: RefineParams,
    rng: SmallRng,
}

impl ConstraintRefiner {
    /// Creates a refiner after validating the configuration.
    pub fn new(params: RefineParams) -> Result<ConstraintRefiner, OptimError> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        return Ok(ConstraintRefiner { params, rng });
    }

    /// Creates a refiner with the default settings.
    pub fn with_defaults() -> ConstraintRefiner {
        // --- the default configuration always validates
        Self::new(RefineParams::default()).unwrap()
    }

    /// The structural-bias score of a full structure.
    pub fn bias_score(&self, protein: &Protein) -> f64 {
        let angles = ramachandran(protein);
        let areas = residue_sasa(protein, &SasaParams::default());
        let full_area = {
            let p = SasaParams::default();
            let r = p.ca_radius + p.probe_radius;
            4.0 * std::f64::consts::PI * r * r
        };

        let mut score = 0.0;
        for (i, pair) in angles.iter().enumerate() {
            let aa = protein.aa1(i);
            if !pair.has_phi() || !pair.has_psi() {
                continue;
            }
            let class = classify_rama(pair.phi.to_degrees(), pair.psi.to_degrees());

            // --- Chou-Fasman: reward conformations the residue statistically prefers
            let (p_helix, p_sheet, p_turn) = chou_fasman(aa);
            let propensity = match class {
                SecondaryClass::AlphaHelix | SecondaryClass::LeftHelix => p_helix,
                SecondaryClass::BetaSheet | SecondaryClass::Ppii => p_sheet,
                SecondaryClass::Other => p_turn,
            };
            score -= self.params.weight_propensity * (propensity - 1.0);

            // --- hydrophobic burial: exposed surface is expensive for greasy residues
            let kd = kyte_doolittle(aa);
            if kd > 0.0 {
                score += self.params.weight_burial * kd * areas[i] / full_area;
            }

            // --- soft Ramachandran: a small bonus inside any basin, a penalty outside
            let rama_bias = if class == SecondaryClass::Other { 2.0 } else { -0.5 };
            score += self.params.weight_rama * rama_bias;
        }
        return score;
    }

    /// Refines the structure in place and reports the outcome.
    pub fn refine(&mut self, protein: &mut Protein, ff: &ForceField) -> Result<StageReport, OptimError> {
        let started = Instant::now();
        let initial_energy = ff.energy(protein);
        let mut combined = initial_energy + self.bias_score(protein);

        let proposal = Normal::new(0.0, self.params.proposal_sigma_deg.to_radians()).unwrap();
        let n_res = protein.count_residues();
        let mut accepted = 0;
        let mut sweeps = 0;

        for _ in 0..self.params.steps {
            sweeps += 1;
            for res_index in 0..n_res {
                let angles = ramachandran(protein);
                let pair = angles[res_index];
                if !pair.has_phi() && !pair.has_psi() {
                    continue;
                }

                let mut trial = angles.clone();
                if pair.has_phi() {
                    trial[res_index].phi = wrap_angle(pair.phi + proposal.sample(&mut self.rng));
                }
                if pair.has_psi() {
                    trial[res_index].psi = wrap_angle(pair.psi + proposal.sample(&mut self.rng));
                }

                let mut candidate = protein.clone();
                rebuild_backbone(&mut candidate, &trial)?;
                let candidate_score = ff.energy(&candidate) + self.bias_score(&candidate);
                if candidate_score < combined && candidate.all_finite() {
                    combined = candidate_score;
                    *protein = candidate;
                    accepted += 1;
                }
            }
        }

        let final_energy = ff.energy(protein);
        debug!("refinement accepted {} of {} proposals", accepted, sweeps * n_res);

        return Ok(StageReport {
            stage: String::from("constraint-refinement"),
            converged: true,
            reason: format!("{} proposals accepted", accepted),
            iterations: sweeps,
            initial_energy,
            final_energy,
            wall_seconds: started.elapsed().as_secs_f64(),
        });
    }
}
