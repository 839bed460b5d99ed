use std::time::Instant;

use log::{debug, warn};

use tinyfold_ff::{Energy, ForceField};
use tinyfold_geometry::{Protein, Vec3};

use crate::errors::OptimError;
use crate::report::StageReport;

/// Settings of the gentle Cartesian relaxer.
#[derive(Clone, Debug)]
pub struct RelaxParams {
    /// hard step budget
    pub max_steps: usize,
    /// scale factor between force and displacement, A^2 mol/kcal
    pub step_size: f64,
    /// largest displacement any atom may take in one step, A
    pub max_displacement: f64,
    /// a step that multiplies the energy by more than this aborts the stage
    pub explosion_factor: f64,
    /// convergence threshold on the energy change between steps, kcal/mol
    pub energy_tolerance: f64,
}

impl Default for RelaxParams {
    fn default() -> RelaxParams {
        RelaxParams {
            max_steps: 1500,
            step_size: 0.001,
            max_displacement: 0.1,
            explosion_factor: 2.0,
            energy_tolerance: 1e-4,
        }
    }
}

impl RelaxParams {
    fn validate(&self) -> Result<(), OptimError> {
        if self.max_steps < 1 {
            return Err(OptimError::invalid("max_steps", self.max_steps as f64));
        }
        if self.step_size <= 0.0 {
            return Err(OptimError::invalid("step_size", self.step_size));
        }
        if self.max_displacement <= 0.0 {
            return Err(OptimError::invalid("max_displacement", self.max_displacement));
        }
        if self.explosion_factor <= 1.0 {
            return Err(OptimError::invalid("explosion_factor", self.explosion_factor));
        }
        return Ok(());
    }
}

/// Steepest-descent relaxation along the analytical bond forces.
///
/// Every step moves each atom along its bond-force direction, with the displacement
/// capped per atom, which makes the scheme safe on badly clashed starting points where
/// the raw forces are enormous. The stage exists to take the worst strain out of a
/// structure before dihedral optimisation; it never improves packing, only geometry.
pub struct GentleRelaxer {
    params: RelaxParams,
}

impl GentleRelaxer {
    /// Creates a relaxer after validating the configuration.
    pub fn new(params: RelaxParams) -> Result<GentleRelaxer, OptimError> {
        params.validate()?;
        return Ok(GentleRelaxer { params });
    }

    /// Creates a relaxer with the default settings.
    pub fn with_defaults() -> GentleRelaxer {
        GentleRelaxer { params: RelaxParams::default() }
    }

    /// Relaxes the structure in place and reports the outcome.
    ///
    /// Tracks the best coordinates seen and restores them before returning, so an
    /// exploding trajectory cannot leave the structure worse than it started.
    pub fn relax(&self, protein: &mut Protein, ff: &ForceField) -> Result<StageReport, OptimError> {
        let started = Instant::now();
        let initial_energy = ff.energy(protein);
        let mut e_prev = initial_energy;
        let mut best = protein.clone();
        let mut best_e = e_prev;

        let mut steps = 0;
        let mut converged = false;
        let mut reason = String::from("maximum steps reached");

        for step in 1..=self.params.max_steps {
            steps = step;

            let forces = ff.cartesian_forces(protein);
            for (atom, force) in protein.atoms_mut().iter_mut().zip(forces.iter()) {
                let magnitude = force.length();
                if magnitude < 1e-12 {
                    continue;
                }
                let distance = (self.params.step_size * magnitude).min(self.params.max_displacement);
                let mut displacement = force.clone();
                displacement *= distance / magnitude;
                atom.pos += &displacement;
            }

            let e = ff.energy(protein);
            if !e.is_finite() || !protein.all_finite() {
                warn!("relaxation produced a non-finite state at step {}", step);
                reason = String::from("non-finite energy");
                break;
            }
            // --- explosion guard: growth beyond the factor aborts once the start-up
            //     transient is over
            if step > 5 && e > self.params.explosion_factor * e_prev.abs() {
                warn!("relaxation energy exploded at step {}: {:.1} -> {:.1}", step, e_prev, e);
                reason = String::from("energy explosion");
                break;
            }

            let delta = e_prev - e;
            e_prev = e;
            if e < best_e {
                best_e = e;
                best.copy_backbone_positions(protein);
            }
            if delta.abs() < self.params.energy_tolerance {
                converged = true;
                reason = format!("energy change {:.2e} below tolerance", delta.abs());
                break;
            }
        }

        // --- hand the best state seen to the next stage
        protein.copy_backbone_positions(&best);
        debug!("gentle relaxation: {} -> {} kcal/mol in {} steps", initial_energy, best_e, steps);

        return Ok(StageReport {
            stage: String::from("gentle-relaxation"),
            converged,
            reason,
            iterations: steps,
            initial_energy,
            final_energy: best_e,
            wall_seconds: started.elapsed().as_secs_f64(),
        });
    }
}

/// Pushes severely clashing atom pairs apart in one deterministic sweep.
///
/// Non-bonded pairs (at least two residues apart) closer than `min_distance` are moved
/// symmetrically along their separation vector until they sit at `target_distance`.
/// Returns the number of pairs adjusted.
pub fn remove_clashes(protein: &mut Protein, min_distance: f64, target_distance: f64) -> usize {
    let n_atoms = protein.count_atoms();
    let mut adjusted = 0;

    for i in 0..n_atoms {
        for j in (i + 1)..n_atoms {
            let (res_i, res_j) = (protein.atoms()[i].res_index, protein.atoms()[j].res_index);
            if (res_i as i64 - res_j as i64).abs() < 2 {
                continue;
            }
            let pos_i = protein.atoms()[i].pos;
            let pos_j = protein.atoms()[j].pos;
            let d = pos_i.distance_to(&pos_j);
            if d >= min_distance || d < 1e-9 {
                continue;
            }

            let push = (target_distance - d) / 2.0;
            let mut dir = Vec3::sub_s(&pos_j, &pos_i);
            dir.normalize();
            let mut shift = dir.clone();
            shift *= push;
            protein.atoms_mut()[j].pos += &shift;
            shift.opposite();
            protein.atoms_mut()[i].pos += &shift;
            adjusted += 1;
        }
    }
    return adjusted;
}
