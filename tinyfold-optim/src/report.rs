use std::fmt;
use std::fmt::{Display, Formatter};

/// Diagnostics of one optimisation stage.
///
/// Every routine of this crate reports its outcome in this shape: whether the stage
/// met its own convergence criterion, a human-readable reason, the iteration count
/// and the energies bracketing the run. A failed or non-converged stage still leaves
/// its best-so-far structure in place, so the following stage can pick it up.
#[derive(Clone, Debug)]
pub struct StageReport {
    /// name of the stage, e.g. `"dihedral-lbfgs"`
    pub stage: String,
    /// whether the stage met its convergence criterion
    pub converged: bool,
    /// why the stage stopped
    pub reason: String,
    /// number of iterations (or steps) performed
    pub iterations: usize,
    /// total energy when the stage started, kcal/mol
    pub initial_energy: f64,
    /// total energy when the stage finished, kcal/mol
    pub final_energy: f64,
    /// wall-clock duration of the stage, seconds
    pub wall_seconds: f64,
}

impl StageReport {
    /// Energy improvement achieved by this stage, positive when the energy went down.
    pub fn energy_drop(&self) -> f64 {
        self.initial_energy - self.final_energy
    }
}

impl Display for StageReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} after {} iterations, {:.2} -> {:.2} kcal/mol in {:.3} s ({})",
            self.stage,
            if self.converged { "converged" } else { "not converged" },
            self.iterations, self.initial_energy, self.final_energy, self.wall_seconds, self.reason
        )
    }
}

/// Counts accepted and rejected Monte Carlo proposals.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptanceStatistics {
    /// number of accepted proposals
    pub n_accepted: u32,
    /// number of rejected proposals
    pub n_rejected: u32,
}

impl AcceptanceStatistics {
    /// Fraction of proposals that were accepted; zero when nothing was proposed.
    pub fn acceptance_rate(&self) -> f64 {
        let total = self.n_accepted + self.n_rejected;
        if total == 0 {
            return 0.0;
        }
        return self.n_accepted as f64 / total as f64;
    }
}
