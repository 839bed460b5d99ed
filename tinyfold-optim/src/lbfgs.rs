//! Limited-memory quasi-Newton minimisation in dihedral space.
//!
//! The state vector holds the `(phi, psi)` pairs of every residue; Cartesian
//! coordinates are rebuilt from scratch on every energy evaluation, so the fixed
//! bond lengths and angles cannot be violated no matter what step the minimiser
//! takes. Gradients come from forward finite differences over the angles.

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, warn};

use tinyfold_ff::{Energy, ForceField};
use tinyfold_geometry::{ramachandran, rebuild_backbone, wrap_angle, BackboneAngles, Protein};

use crate::errors::OptimError;
use crate::report::StageReport;

/// Settings of the dihedral L-BFGS minimiser.
#[derive(Clone, Debug)]
pub struct LbfgsParams {
    /// hard iteration budget
    pub max_iterations: usize,
    /// the energy criterion only applies after this many iterations
    pub min_iterations: usize,
    /// number of `(s, y)` correction pairs kept for the inverse-Hessian estimate
    pub memory: usize,
    /// convergence threshold on the gradient norm, kcal/mol/rad
    pub gradient_tolerance: f64,
    /// convergence threshold on the energy change between iterations, kcal/mol
    pub energy_tolerance: f64,
    /// forward-difference step for the numerical gradient, radians
    pub fd_step: f64,
    /// step length tried first by the backtracking line search
    pub initial_step: f64,
    /// smallest line-search step before the fallback gradient step kicks in
    pub min_step: f64,
    /// sufficient-decrease constant of the Armijo condition
    pub armijo_c1: f64,
    /// a single-step energy drop beyond this is treated as a numerical accident
    pub suspicious_drop: f64,
}

impl Default for LbfgsParams {
    fn default() -> LbfgsParams {
        LbfgsParams {
            max_iterations: 250,
            min_iterations: 10,
            memory: 10,
            gradient_tolerance: 0.01,
            energy_tolerance: 0.1,
            fd_step: 1e-3,
            initial_step: 1.0,
            min_step: 1e-6,
            armijo_c1: 1e-4,
            suspicious_drop: 100.0,
        }
    }
}

impl LbfgsParams {
    fn validate(&self) -> Result<(), OptimError> {
        if self.max_iterations < 1 {
            return Err(OptimError::invalid("max_iterations", self.max_iterations as f64));
        }
        if self.memory < 1 {
            return Err(OptimError::invalid("memory", self.memory as f64));
        }
        if self.gradient_tolerance <= 0.0 {
            return Err(OptimError::invalid("gradient_tolerance", self.gradient_tolerance));
        }
        if self.energy_tolerance <= 0.0 {
            return Err(OptimError::invalid("energy_tolerance", self.energy_tolerance));
        }
        if self.fd_step <= 0.0 {
            return Err(OptimError::invalid("fd_step", self.fd_step));
        }
        if self.initial_step <= 0.0 {
            return Err(OptimError::invalid("initial_step", self.initial_step));
        }
        if self.min_step <= 0.0 || self.min_step > self.initial_step {
            return Err(OptimError::invalid("min_step", self.min_step));
        }
        return Ok(());
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Evaluates the force-field total as a function of the dihedral vector.
///
/// Owns a scratch structure that is rebuilt on every call; the optimised protein
/// itself is only touched once, at the very end of the minimisation.
struct DihedralObjective<'a> {
    scratch: Protein,
    ff: &'a ForceField,
}

impl<'a> DihedralObjective<'a> {
    fn angles_of(x: &[f64]) -> Vec<BackboneAngles> {
        x.chunks_exact(2).map(|pair| BackboneAngles::new(pair[0], pair[1])).collect()
    }

    fn energy(&mut self, x: &[f64]) -> Result<f64, OptimError> {
        let angles = Self::angles_of(x);
        rebuild_backbone(&mut self.scratch, &angles)?;
        return Ok(self.ff.energy(&self.scratch));
    }

    /// Forward-difference gradient; components of undefined angles stay zero.
    fn gradient(&mut self, x: &mut [f64], e0: f64, fd_step: f64, defined: &[bool])
                -> Result<Vec<f64>, OptimError> {
        let mut g = vec![0.0; x.len()];
        for k in 0..x.len() {
            if !defined[k] {
                continue;
            }
            let saved = x[k];
            x[k] = saved + fd_step;
            let e = self.energy(x)?;
            x[k] = saved;
            g[k] = (e - e0) / fd_step;
        }
        return Ok(g);
    }
}

/// The two-loop recursion: applies the limited-memory inverse-Hessian estimate to `g`
/// and returns the (negated) search direction.
fn two_loop(g: &[f64], memory: &VecDeque<(Vec<f64>, Vec<f64>, f64)>) -> Vec<f64> {
    let mut q = g.to_vec();
    let mut alphas = vec![0.0; memory.len()];

    for (slot, (s, y, rho)) in memory.iter().enumerate().rev() {
        let alpha = rho * dot(s, &q);
        for i in 0..q.len() {
            q[i] -= alpha * y[i];
        }
        alphas[slot] = alpha;
    }

    // --- initial inverse-Hessian scaling from the most recent pair
    let gamma = match memory.back() {
        Some((s, y, _)) => {
            let scale = dot(s, y) / dot(y, y);
            if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
        }
        None => 1.0,
    };
    for v in q.iter_mut() {
        *v *= gamma;
    }

    for (slot, (s, y, rho)) in memory.iter().enumerate() {
        let beta = rho * dot(y, &q);
        for i in 0..q.len() {
            q[i] += (alphas[slot] - beta) * s[i];
        }
    }

    for v in q.iter_mut() {
        *v = -*v;
    }
    return q;
}

/// L-BFGS minimiser over the `(phi, psi)` vector of a structure.
///
/// The two-loop recursion with a short history of `(s, y)` pairs estimates the inverse
/// Hessian; a backtracking line search enforces the Armijo sufficient-decrease
/// condition. Undefined terminal angles carry no gradient and never move. Because
/// every trial point is turned into coordinates by the forward kinematics, bond
/// lengths and angles stay ideal throughout and the pathologies of Cartesian
/// minimisation (atoms flying apart under stiff bond terms) cannot occur.
pub struct DihedralLbfgs {
    params: LbfgsParams,
}

impl DihedralLbfgs {
    /// Creates a minimiser after validating the configuration.
    pub fn new(params: LbfgsParams) -> Result<DihedralLbfgs, OptimError> {
        params.validate()?;
        return Ok(DihedralLbfgs { params });
    }

    /// Creates a minimiser with the default settings.
    pub fn with_defaults() -> DihedralLbfgs {
        DihedralLbfgs { params: LbfgsParams::default() }
    }

    /// Minimises the structure in place and reports the outcome.
    ///
    /// The structure's angles are measured, optimised, and the backbone is rebuilt
    /// from the best vector seen. If the input coordinates were not themselves built
    /// from ideal geometry, the initial rebuild projects them onto it, which is
    /// reflected in the reported initial energy.
    pub fn minimize(&self, protein: &mut Protein, ff: &ForceField) -> Result<StageReport, OptimError> {
        let started = Instant::now();
        let measured = ramachandran(protein);

        // --- flatten to the state vector, substituting defaults for undefined angles
        let extended = BackboneAngles::extended();
        let mut x = Vec::with_capacity(2 * measured.len());
        let mut defined = Vec::with_capacity(2 * measured.len());
        for pair in &measured {
            x.push(if pair.has_phi() { pair.phi } else { extended.phi });
            defined.push(pair.has_phi());
            x.push(if pair.has_psi() { pair.psi } else { extended.psi });
            defined.push(pair.has_psi());
        }

        let mut objective = DihedralObjective { scratch: protein.clone(), ff };
        let initial_energy = objective.energy(&x)?;
        let mut e = initial_energy;
        let mut g = objective.gradient(&mut x, e, self.params.fd_step, &defined)?;

        let mut memory: VecDeque<(Vec<f64>, Vec<f64>, f64)> = VecDeque::new();
        let mut best_x = x.clone();
        let mut best_e = e;
        let mut iterations = 0;
        let mut converged = false;
        let mut reason = String::from("maximum iterations reached");

        for iter in 1..=self.params.max_iterations {
            iterations = iter;

            let g_norm = norm(&g);
            if g_norm < self.params.gradient_tolerance {
                converged = true;
                reason = format!("gradient norm {:.2e} below tolerance", g_norm);
                break;
            }

            let mut direction = two_loop(&g, &memory);
            let mut slope = dot(&g, &direction);
            if slope >= 0.0 {
                // --- the estimate went uphill; fall back to steepest descent
                memory.clear();
                direction = g.iter().map(|v| -v).collect();
                slope = -dot(&g, &g);
            }

            // --- backtracking line search with the Armijo condition
            let mut alpha = self.params.initial_step;
            let mut x_new;
            let mut e_new;
            loop {
                x_new = x.clone();
                for k in 0..x_new.len() {
                    if defined[k] {
                        x_new[k] = wrap_angle(x_new[k] + alpha * direction[k]);
                    }
                }
                e_new = objective.energy(&x_new)?;
                if e_new <= e + self.params.armijo_c1 * alpha * slope {
                    break;
                }
                alpha *= 0.5;
                if alpha < self.params.min_step {
                    // --- the search collapsed; take one fixed short step downhill
                    let scale = self.params.fd_step / g_norm.max(1e-12);
                    x_new = x.clone();
                    for k in 0..x_new.len() {
                        if defined[k] {
                            x_new[k] = wrap_angle(x_new[k] - scale * g[k]);
                        }
                    }
                    e_new = objective.energy(&x_new)?;
                    break;
                }
            }

            if !e_new.is_finite() {
                warn!("non-finite energy at iteration {}; keeping the best state so far", iter);
                reason = String::from("non-finite energy");
                break;
            }
            if e - e_new > self.params.suspicious_drop {
                warn!("energy fell by {:.1} kcal/mol in one step; aborting as suspicious", e - e_new);
                reason = String::from("suspicious energy drop");
                break;
            }
            if e_new >= e {
                // --- no acceptable step from here; stay put and retry from a
                //     fresh steepest-descent direction next iteration
                memory.clear();
                continue;
            }

            let g_new = objective.gradient(&mut x_new, e_new, self.params.fd_step, &defined)?;

            // --- record the correction pair; step differences wrap like the angles do
            let mut s = vec![0.0; x.len()];
            for k in 0..x.len() {
                if defined[k] {
                    s[k] = wrap_angle(x_new[k] - x[k]);
                }
            }
            let y: Vec<f64> = g_new.iter().zip(g.iter()).map(|(a, b)| a - b).collect();
            let sy = dot(&s, &y);
            if sy > 1e-10 {
                memory.push_back((s, y, 1.0 / sy));
                if memory.len() > self.params.memory {
                    memory.pop_front();
                }
            }

            let delta_e = e - e_new;
            x = x_new;
            e = e_new;
            g = g_new;
            if e < best_e {
                best_e = e;
                best_x = x.clone();
            }

            if iter >= self.params.min_iterations && delta_e.abs() < self.params.energy_tolerance {
                converged = true;
                reason = format!("energy change {:.2e} below tolerance", delta_e.abs());
                break;
            }
        }

        // --- write the best state back, restoring NaN for the undefined angles
        let mut final_angles = Vec::with_capacity(best_x.len() / 2);
        for (i, pair) in best_x.chunks_exact(2).enumerate() {
            final_angles.push(BackboneAngles::new(
                if defined[2 * i] { pair[0] } else { f64::NAN },
                if defined[2 * i + 1] { pair[1] } else { f64::NAN },
            ));
        }
        rebuild_backbone(protein, &final_angles)?;
        debug!("dihedral L-BFGS: {} -> {} kcal/mol in {} iterations", initial_energy, best_e, iterations);

        return Ok(StageReport {
            stage: String::from("dihedral-lbfgs"),
            converged,
            reason,
            iterations,
            initial_energy,
            final_energy: best_e,
            wall_seconds: started.elapsed().as_secs_f64(),
        });
    }
}
