use std::collections::HashMap;

use itertools::Itertools;
use log::info;
use thiserror::Error;

use tinyfold_ff::params::chou_fasman;
use tinyfold_ff::{secondary_structure_string, Energy, EnergyReport, ForceField, ForceFieldError};
use tinyfold_geometry::{ca_rmsd, validate_sequence, GeometryError, Protein};
use tinyfold_optim::{AnnealParams, ConstraintRefiner, DihedralLbfgs, GentleRelaxer, LbfgsParams,
                     OptimError, RefineParams, RelaxParams, SimulatedAnnealer, StageReport};
use tinyfold_sampling::{ConformationSampler, SamplerConfig, SamplerError};

use crate::summary::FoldingSummary;

/// Errors that may appear while running the folding pipeline
#[derive(Debug, Error)]
pub enum FoldError {

    #[error(transparent)]
    /// The input sequence could not be turned into structures
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    /// Conformer generation failed
    Sampler(#[from] SamplerError),
    #[error(transparent)]
    /// An optimisation stage was misconfigured or failed
    Optim(#[from] OptimError),
    #[error(transparent)]
    /// The energy model was misconfigured
    ForceField(#[from] ForceFieldError),
}

/// Settings of the folding pipeline: one block per stage, in cascade order.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// conformer generation settings
    pub sampler: SamplerConfig,
    /// number of mixed-basin samples added on top of the per-basin exploration
    pub mixed_samples: usize,
    /// number of additional samples constrained by Chou-Fasman propensities
    pub constrained_samples: usize,
    /// gentle Cartesian relaxation settings
    pub relax: RelaxParams,
    /// dihedral L-BFGS settings
    pub lbfgs: LbfgsParams,
    /// simulated annealing settings
    pub anneal: AnnealParams,
    /// constraint-guided refinement settings
    pub refine: RefineParams,
    /// annealing only runs when L-BFGS failed to converge and improved the energy
    /// by less than this many kcal/mol
    pub anneal_below_improvement: f64,
}

impl Default for PipelineConfig {
    fn default() -> PipelineConfig {
        PipelineConfig {
            sampler: SamplerConfig::default(),
            mixed_samples: 40,
            constrained_samples: 10,
            relax: RelaxParams::default(),
            lbfgs: LbfgsParams::default(),
            anneal: AnnealParams::default(),
            refine: RefineParams::default(),
            anneal_below_improvement: 10.0,
        }
    }
}

/// Everything a folding run produces.
#[derive(Debug)]
pub struct FoldingResult {
    /// the best structure of the run
    pub protein: Protein,
    /// full energy report of the final structure
    pub energy: EnergyReport,
    /// CA-RMSD of the selected candidate against the reference, when one was given
    pub initial_rmsd: Option<f64>,
    /// CA-RMSD of the final structure against the reference, when one was given
    pub final_rmsd: Option<f64>,
    /// per-stage diagnostics, in execution order
    pub stages: Vec<StageReport>,
}

impl FoldingResult {
    /// Says whether the final structure landed within a given RMSD of the reference.
    ///
    /// Always `false` when no reference was supplied.
    pub fn within_rmsd(&self, threshold: f64) -> bool {
        match self.final_rmsd {
            Some(rmsd) => rmsd <= threshold,
            None => false,
        }
    }

    /// Condenses this result into the flat record handed to report writers.
    pub fn summary(&self) -> FoldingSummary {
        FoldingSummary::from_result(self)
    }
}

/// Derives sampling constraints from the Chou-Fasman propensities of a sequence.
///
/// Residues with a pronounced helix preference are pinned to the alpha basin,
/// pronounced sheet formers to the beta basin; everything else is left free.
/// The map plugs directly into
/// [`ConformationSampler::constrained_ensemble()`](tinyfold_sampling::ConformationSampler::constrained_ensemble).
///
/// ```
/// # use tinyfold::propensity_constraints;
/// let constraints = propensity_constraints("EEEEVVVV");
/// // glutamate is a strong helix former, valine a strong sheet former
/// assert_eq!(constraints.get(&0).map(String::as_str), Some("alpha"));
/// assert_eq!(constraints.get(&5).map(String::as_str), Some("beta"));
/// ```
pub fn propensity_constraints(sequence: &str) -> HashMap<usize, String> {
    let mut constraints = HashMap::new();
    for (res_index, aa) in sequence.chars().enumerate() {
        let (p_helix, p_sheet, _) = chou_fasman(aa);
        if p_helix >= 1.3 && p_helix > p_sheet {
            constraints.insert(res_index, String::from("alpha"));
        } else if p_sheet >= 1.3 && p_sheet > p_helix {
            constraints.insert(res_index, String::from("beta"));
        }
    }
    return constraints;
}

/// The three-phase folding pipeline: sample, select, optimise.
///
/// Phase A generates a conformer ensemble (per-basin exploration plus mixed-basin
/// sampling). The best candidate is selected by CA-RMSD against the reference when one
/// is available, by total energy otherwise. Phase C runs the optimiser cascade on the
/// selected candidate: gentle relaxation, dihedral L-BFGS, simulated annealing (only
/// when L-BFGS stalled without converging) and constraint-guided refinement. A failed
/// stage keeps its best-so-far structure, so the pipeline always returns something
/// scoreable; per-stage diagnostics are collected in the result.
///
/// ```no_run
/// use tinyfold::FoldingPipeline;
/// let pipeline = FoldingPipeline::with_defaults();
/// let result = pipeline.run("NLYIQWLKDGGPSSGRPPPS", None).unwrap();
/// println!("final energy: {:.1} kcal/mol", result.energy.total);
/// ```
pub struct FoldingPipeline {
    config: PipelineConfig,
    ff: ForceField,
}

impl FoldingPipeline {
    /// Creates a pipeline with a validated configuration and the default energy model.
    pub fn new(config: PipelineConfig) -> FoldingPipeline {
        FoldingPipeline { config, ff: ForceField::new() }
    }

    /// Creates a pipeline with the default configuration.
    pub fn with_defaults() -> FoldingPipeline {
        FoldingPipeline::new(PipelineConfig::default())
    }

    /// Read access to the energy model used for scoring.
    pub fn force_field(&self) -> &ForceField {
        &self.ff
    }

    /// Phase A: generates the ensemble and selects the most promising candidate.
    fn select_candidate(&self, sequence: &str, reference: Option<&Protein>)
                        -> Result<(Protein, Option<f64>), FoldError> {
        let mut sampler = ConformationSampler::new(self.config.sampler.clone());
        let mut ensemble = sampler.per_basin_ensemble(sequence)?;
        ensemble.extend(sampler.mixed_ensemble(sequence, self.config.mixed_samples)?);
        if self.config.constrained_samples > 0 {
            let constraints = propensity_constraints(sequence);
            ensemble.extend(sampler.constrained_ensemble(
                sequence, &constraints, self.config.constrained_samples)?);
        }
        info!("phase A: {} candidates generated", ensemble.len());

        let chosen = match reference {
            Some(reference) => {
                let mut scores = Vec::with_capacity(ensemble.len());
                for candidate in &ensemble {
                    scores.push(ca_rmsd(candidate, reference)?);
                }
                scores
                    .iter()
                    .copied()
                    .position_min_by(|a, b| a.total_cmp(b))
                    .unwrap_or(0)
            }
            None => ensemble
                .iter()
                .map(|candidate| self.ff.energy(candidate))
                .position_min_by(|a, b| a.total_cmp(b))
                .unwrap_or(0),
        };

        let candidate = ensemble.swap_remove(chosen);
        let rmsd = match reference {
            Some(reference) => Some(ca_rmsd(&candidate, reference)?),
            None => None,
        };
        return Ok((candidate, rmsd));
    }

    /// Runs the full pipeline on a sequence.
    ///
    /// The reference structure, when given, is used twice: to select the best
    /// phase-A candidate and to score the final structure. Empty sequences and
    /// non-standard amino acids are rejected up front.
    pub fn run(&self, sequence: &str, reference: Option<&Protein>) -> Result<FoldingResult, FoldError> {
        validate_sequence(sequence)?;

        let (mut protein, initial_rmsd) = self.select_candidate(sequence, reference)?;
        let mut stages = Vec::new();

        // --- phase C: the optimiser cascade; each stage hands its best state on
        let relaxer = GentleRelaxer::new(self.config.relax.clone())?;
        stages.push(relaxer.relax(&mut protein, &self.ff)?);

        let lbfgs = DihedralLbfgs::new(self.config.lbfgs.clone())?;
        let lbfgs_report = lbfgs.minimize(&mut protein, &self.ff)?;
        let needs_annealing = !lbfgs_report.converged
            && lbfgs_report.energy_drop() < self.config.anneal_below_improvement;
        stages.push(lbfgs_report);

        if needs_annealing {
            let mut annealer = SimulatedAnnealer::new(self.config.anneal.clone())?;
            stages.push(annealer.anneal(&mut protein, &self.ff)?);
        }

        let mut refiner = ConstraintRefiner::new(self.config.refine.clone())?;
        stages.push(refiner.refine(&mut protein, &self.ff)?);

        let energy = self.ff.report(&protein);
        let final_rmsd = match reference {
            Some(reference) => Some(ca_rmsd(&protein, reference)?),
            None => None,
        };
        for stage in &stages {
            info!("{}", stage);
        }
        info!("secondary structure: {}", secondary_structure_string(&protein));

        return Ok(FoldingResult { protein, energy, initial_rmsd, final_rmsd, stages });
    }
}
