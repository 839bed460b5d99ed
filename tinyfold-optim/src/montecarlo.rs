//! Monte Carlo building blocks shared by the stochastic optimisers.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use tinyfold_ff::{Energy, ForceField};
use tinyfold_geometry::{Protein, Vec3};

use crate::anneal::BOLTZMANN;
use crate::errors::OptimError;
use crate::report::AcceptanceStatistics;

/// Classical Metropolis acceptance criterion at a physical temperature.
///
/// A proposal that lowers the energy is always accepted; one that raises it survives
/// with probability `exp(-dE / (kB T))`, the Boltzmann factor at the criterion's
/// current temperature. Annealing protocols vary `temperature` between checks.
#[derive(Clone, Copy, Debug)]
pub struct MetropolisCriterion {
    /// current temperature, K
    pub temperature: f64,
}

impl MetropolisCriterion {
    /// Creates a criterion for a given temperature in Kelvin.
    pub fn new(temperature: f64) -> MetropolisCriterion {
        MetropolisCriterion { temperature }
    }

    /// Decides whether a move from `energy_before` to `energy_after` is accepted.
    pub fn check<R: Rng + ?Sized>(&self, rng: &mut R, energy_before: f64, energy_after: f64) -> bool {
        if energy_after <= energy_before {
            return true;
        }
        let delta = energy_after - energy_before;
        return rng.gen_range(0.0..1.0) < (-delta / (BOLTZMANN * self.temperature)).exp();
    }
}

/// Displaces one randomly chosen atom by a Gaussian kick.
///
/// The undo information (atom index and its previous position) is returned so the
/// caller can roll a rejected proposal back.
#[derive(Clone, Copy, Debug)]
pub struct SingleAtomMove {
    /// standard deviation of the Gaussian kick, A
    pub max_range: f64,
}

impl SingleAtomMove {
    pub fn new(max_range: f64) -> SingleAtomMove {
        SingleAtomMove { max_range }
    }

    /// Applies one random kick and returns `(atom_index, previous_position)`.
    pub fn perturb<R: Rng + ?Sized>(&self, rng: &mut R, protein: &mut Protein) -> (usize, Vec3) {
        let kick = Normal::new(0.0, 1.0).unwrap();
        let target = rng.gen_range(0..protein.count_atoms());
        let previous = protein.atoms()[target].pos;
        let pos = &mut protein.atoms_mut()[target].pos;
        pos.x += self.max_range * kick.sample(rng);
        pos.y += self.max_range * kick.sample(rng);
        pos.z += self.max_range * kick.sample(rng);
        return (target, previous);
    }

    /// Rolls back a proposal made by [`perturb()`](SingleAtomMove::perturb).
    pub fn undo(protein: &mut Protein, atom_index: usize, previous: Vec3) {
        protein.atoms_mut()[atom_index].pos = previous;
    }
}

/// Settings of the isothermal Monte Carlo sampler.
#[derive(Clone, Debug)]
pub struct IsothermalParams {
    /// simulation temperature, K
    pub temperature: f64,
    /// starting kick range of the atom mover, A
    pub move_range: f64,
    /// acceptance rate the adaptation steers towards
    pub target_acceptance: f64,
    /// multiplicative range update applied after every sweep
    pub adaptation_factor: f64,
    /// seed of the random stream; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for IsothermalParams {
    fn default() -> IsothermalParams {
        IsothermalParams {
            temperature: 300.0,
            move_range: 0.5,
            target_acceptance: 0.4,
            adaptation_factor: 0.95,
            seed: None,
        }
    }
}

impl IsothermalParams {
    fn validate(&self) -> Result<(), OptimError> {
        if self.temperature <= 0.0 {
            return Err(OptimError::invalid("temperature", self.temperature));
        }
        if self.move_range <= 0.0 {
            return Err(OptimError::invalid("move_range", self.move_range));
        }
        if !(0.0..=1.0).contains(&self.target_acceptance) {
            return Err(OptimError::invalid("target_acceptance", self.target_acceptance));
        }
        if self.adaptation_factor <= 0.0 || self.adaptation_factor >= 1.0 {
            return Err(OptimError::invalid("adaptation_factor", self.adaptation_factor));
        }
        return Ok(());
    }
}

/// Fixed-temperature Metropolis sampling with an adaptive move range.
///
/// One sweep proposes as many single-atom kicks as there are atoms. After every sweep
/// the mover's range is nudged so that the recent acceptance rate tracks the target:
/// shrunk when too few proposals survive, grown when too many do, within a factor of
/// four of the starting range.
pub struct IsothermalMonteCarlo {
    criterion: MetropolisCriterion,
    mover: SingleAtomMove,
    range_bounds: (f64, f64),
    params: IsothermalParams,
    rng: SmallRng,
    /// statistics accumulated over all sweeps of this sampler
    pub statistics: AcceptanceStatistics,
}

impl IsothermalMonteCarlo {
    /// Creates a sampler after validating the configuration.
    pub fn new(params: IsothermalParams) -> Result<IsothermalMonteCarlo, OptimError> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        return Ok(IsothermalMonteCarlo {
            criterion: MetropolisCriterion::new(params.temperature),
            mover: SingleAtomMove::new(params.move_range),
            range_bounds: (params.move_range * 0.25, params.move_range * 4.0),
            params,
            rng,
            statistics: AcceptanceStatistics::default(),
        });
    }

    /// The current kick range of the underlying mover.
    pub fn move_range(&self) -> f64 {
        self.mover.max_range
    }

    /// Runs `n_sweeps` sweeps over the structure; returns the final energy.
    pub fn make_sweeps(&mut self, n_sweeps: usize, protein: &mut Protein, ff: &ForceField)
                       -> Result<f64, OptimError> {
        if protein.count_atoms() == 0 {
            return Err(OptimError::invalid("atom count", 0.0));
        }
        let mut e = ff.energy(protein);

        for _ in 0..n_sweeps {
            let before_sweep = self.statistics;
            for _ in 0..protein.count_atoms() {
                let (atom_index, previous) = self.mover.perturb(&mut self.rng, protein);
                let e_new = ff.energy(protein);
                if e_new.is_finite() && self.criterion.check(&mut self.rng, e, e_new) {
                    self.statistics.n_accepted += 1;
                    e = e_new;
                } else {
                    self.statistics.n_rejected += 1;
                    SingleAtomMove::undo(protein, atom_index, previous);
                }
            }

            // --- steer the kick range towards the target acceptance rate
            let accepted = self.statistics.n_accepted - before_sweep.n_accepted;
            let rejected = self.statistics.n_rejected - before_sweep.n_rejected;
            let rate = accepted as f64 / (accepted + rejected).max(1) as f64;
            let mut range = self.mover.max_range;
            if rate < self.params.target_acceptance - 0.05 {
                range *= self.params.adaptation_factor;
            } else if rate > self.params.target_acceptance + 0.05 {
                range /= self.params.adaptation_factor;
            }
            self.mover.max_range = range.clamp(self.range_bounds.0, self.range_bounds.1);
            debug!("sweep done: rate {:.2}, range {:.3} A, energy {:.2}", rate, self.mover.max_range, e);
        }
        return Ok(e);
    }
}
