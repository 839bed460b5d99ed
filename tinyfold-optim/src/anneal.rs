use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use tinyfold_ff::{Energy, ForceField};
use tinyfold_geometry::Protein;

use crate::errors::OptimError;
use crate::lbfgs::{DihedralLbfgs, LbfgsParams};
use crate::montecarlo::{MetropolisCriterion, SingleAtomMove};
use crate::report::{AcceptanceStatistics, StageReport};

/// Boltzmann constant in kcal/(mol K).
pub const BOLTZMANN: f64 = 0.001987;

/// The golden ratio, base of the preferred cooling schedule.
const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Temperature schedules available to the annealer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoolingSchedule {
    /// `T(t) = T0 (Tf/T0)^t`
    Exponential,
    /// straight-line interpolation from `T0` to `Tf`
    Linear,
    /// per-step multiplication by a constant factor
    Geometric,
    /// golden-ratio decay towards the final temperature
    GoldenRatio,
}

impl CoolingSchedule {
    /// Temperature after `step` of `n_steps`, cooling from `t0` to `tf`.
    pub fn temperature(&self, step: usize, n_steps: usize, t0: f64, tf: f64) -> f64 {
        let progress = step as f64 / n_steps.max(1) as f64;
        match self {
            CoolingSchedule::Exponential => t0 * (tf / t0).powf(progress),
            CoolingSchedule::Linear => t0 + (tf - t0) * progress,
            CoolingSchedule::Geometric => {
                let factor = (tf / t0).powf(1.0 / n_steps.max(1) as f64);
                t0 * factor.powi(step as i32)
            }
            CoolingSchedule::GoldenRatio => {
                // --- T(t) = T0 phi^(-t/tau) + Tf (1 - phi^(-t/tau)), tau = N / ln(phi)
                let tau = n_steps.max(1) as f64 / GOLDEN_RATIO.ln();
                let decay = GOLDEN_RATIO.powf(-(step as f64) / tau);
                t0 * decay + tf * (1.0 - decay)
            }
        }
    }
}

/// Settings of the simulated annealer.
#[derive(Clone, Debug)]
pub struct AnnealParams {
    /// starting temperature, K
    pub initial_temperature: f64,
    /// final temperature, K
    pub final_temperature: f64,
    /// number of Monte Carlo steps
    pub steps: usize,
    /// Gaussian proposal scale at the first step, A
    pub initial_displacement: f64,
    /// Gaussian proposal scale at the last step, A
    pub final_displacement: f64,
    /// temperature schedule
    pub schedule: CoolingSchedule,
    /// run a short dihedral minimisation every `polish_every` steps once the
    /// temperature falls below `polish_below`; disabled when `polish_below` is zero
    pub polish_below: f64,
    /// period of the polish sub-step
    pub polish_every: usize,
    /// seed of the random stream; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for AnnealParams {
    fn default() -> AnnealParams {
        AnnealParams {
            initial_temperature: 300.0,
            final_temperature: 10.0,
            steps: 2000,
            initial_displacement: 2.0,
            final_displacement: 0.1,
            schedule: CoolingSchedule::GoldenRatio,
            polish_below: 0.0,
            polish_every: 100,
            seed: None,
        }
    }
}

impl AnnealParams {
    fn validate(&self) -> Result<(), OptimError> {
        if self.initial_temperature <= 0.0 {
            return Err(OptimError::invalid("initial_temperature", self.initial_temperature));
        }
        if self.final_temperature <= 0.0 || self.final_temperature > self.initial_temperature {
            return Err(OptimError::invalid("final_temperature", self.final_temperature));
        }
        if self.steps < 1 {
            return Err(OptimError::invalid("steps", self.steps as f64));
        }
        if self.initial_displacement <= 0.0 || self.final_displacement <= 0.0 {
            return Err(OptimError::invalid("initial_displacement", self.initial_displacement));
        }
        if self.polish_every < 1 {
            return Err(OptimError::invalid("polish_every", self.polish_every as f64));
        }
        return Ok(());
    }
}

/// Metropolis Monte Carlo annealing over the full atom-coordinate set.
///
/// Proposals displace one randomly chosen atom by a Gaussian kick whose scale decays
/// linearly over the run; acceptance follows the Metropolis criterion at the current
/// temperature of the chosen cooling schedule. The best structure ever visited is
/// tracked and restored at the end, so the stage returns the best state rather than
/// the last one. When polishing is enabled, a short dihedral minimisation runs at
/// regular intervals in the cold part of the schedule.
pub struct SimulatedAnnealer {
    params: AnnealParams,
    rng: SmallRng,
    /// statistics of the most recent run
    pub statistics: AcceptanceStatistics,
}

impl SimulatedAnnealer {
    /// Creates an annealer after validating the configuration.
    pub fn new(params: AnnealParams) -> Result<SimulatedAnnealer, OptimError> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        return Ok(SimulatedAnnealer { params, rng, statistics: AcceptanceStatistics::default() });
    }

    /// Anneals the structure in place and reports the outcome.
    pub fn anneal(&mut self, protein: &mut Protein, ff: &ForceField) -> Result<StageReport, OptimError> {
        let started = Instant::now();
        self.statistics = AcceptanceStatistics::default();

        let initial_energy = ff.energy(protein);
        let mut e = initial_energy;
        let mut best = protein.clone();
        let mut best_e = e;
        if protein.count_atoms() == 0 {
            return Err(OptimError::invalid("atom count", 0.0));
        }
        let mut criterion = MetropolisCriterion::new(self.params.initial_temperature);

        let mut reason = String::from("schedule completed");
        let mut failed = false;
        let mut steps_done = 0;

        for step in 1..=self.params.steps {
            steps_done = step;
            let progress = step as f64 / self.params.steps as f64;
            let temperature = self.params.schedule.temperature(
                step, self.params.steps, self.params.initial_temperature, self.params.final_temperature);
            let scale = self.params.initial_displacement
                + (self.params.final_displacement - self.params.initial_displacement) * progress;

            // --- propose: one atom, one Gaussian kick of the current scale
            criterion.temperature = temperature;
            let mover = SingleAtomMove::new(scale);
            let (target, saved) = mover.perturb(&mut self.rng, protein);

            let e_new = ff.energy(protein);
            if !e_new.is_finite() {
                warn!("annealing produced a non-finite energy at step {}", step);
                SingleAtomMove::undo(protein, target, saved);
                reason = String::from("non-finite energy");
                failed = true;
                break;
            }

            if criterion.check(&mut self.rng, e, e_new) {
                self.statistics.n_accepted += 1;
                e = e_new;
                if e < best_e {
                    best_e = e;
                    best = protein.clone();
                }
            } else {
                self.statistics.n_rejected += 1;
                SingleAtomMove::undo(protein, target, saved);
            }

            // --- polish sub-step in the cold part of the schedule
            if self.params.polish_below > 0.0
                && temperature < self.params.polish_below
                && step % self.params.polish_every == 0
            {
                let polish = DihedralLbfgs::new(LbfgsParams {
                    max_iterations: 20,
                    ..LbfgsParams::default()
                })?;
                let report = polish.minimize(protein, ff)?;
                debug!("polish at step {}: {}", step, report);
                e = ff.energy(protein);
                if e < best_e {
                    best_e = e;
                    best = protein.clone();
                }
            }
        }

        // --- return the best structure seen, not the last one
        *protein = best;
        let rate = self.statistics.acceptance_rate();
        info!(
            "annealing: {:.2} -> {:.2} kcal/mol, acceptance rate {:.2}",
            initial_energy, best_e, rate
        );

        return Ok(StageReport {
            stage: String::from("simulated-annealing"),
            converged: !failed,
            reason: format!("{}; acceptance rate {:.2}", reason, rate),
            iterations: steps_done,
            initial_energy,
            final_energy: best_e,
            wall_seconds: started.elapsed().as_secs_f64(),
        });
    }
}
