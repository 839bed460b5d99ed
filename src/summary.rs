use std::fmt;
use std::fmt::{Display, Formatter};

use tinyfold_ff::EnergyBreakdown;

use crate::pipeline::FoldingResult;

/// Diagnostics of one pipeline stage in the flat form used by report writers.
#[derive(Clone, Debug)]
pub struct StageSummary {
    /// name of the stage
    pub stage: String,
    /// whether the stage met its convergence criterion
    pub converged: bool,
    /// energy when the stage finished, kcal/mol
    pub energy: f64,
    /// number of iterations performed
    pub iterations: usize,
    /// wall-clock duration, seconds
    pub wall_seconds: f64,
}

/// The flat record a report writer serialises after a folding run.
///
/// External validators fill in `tm_score` and `gdt_ts` after comparing against the
/// experimental structure; they stay `None` inside the core. The RMSD success flags
/// follow the conventional 5, 4 and 3 Angstrom thresholds and are `false` whenever
/// no reference structure was available.
#[derive(Clone, Debug)]
pub struct FoldingSummary {
    /// the folded amino-acid sequence
    pub sequence: String,
    /// number of residues in the sequence
    pub n_residues: usize,
    /// CA-RMSD of the selected phase-A candidate, when a reference was given
    pub initial_rmsd: Option<f64>,
    /// CA-RMSD of the final structure, when a reference was given
    pub final_rmsd: Option<f64>,
    /// final energy, clamped, kcal/mol
    pub final_energy: f64,
    /// per-term decomposition of the final energy
    pub breakdown: EnergyBreakdown,
    /// one entry per executed stage, in order
    pub stages: Vec<StageSummary>,
    /// TM-score against the experimental structure, filled in by an external validator
    pub tm_score: Option<f64>,
    /// GDT_TS against the experimental structure, filled in by an external validator
    pub gdt_ts: Option<f64>,
    /// final RMSD at most 5 Angstroms
    pub under_5_angstrom: bool,
    /// final RMSD at most 4 Angstroms
    pub under_4_angstrom: bool,
    /// final RMSD at most 3 Angstroms
    pub under_3_angstrom: bool,
}

impl FoldingSummary {
    /// Condenses a [`FoldingResult`] into the flat report record.
    pub fn from_result(result: &FoldingResult) -> FoldingSummary {
        let stages = result
            .stages
            .iter()
            .map(|stage| StageSummary {
                stage: stage.stage.clone(),
                converged: stage.converged,
                energy: stage.final_energy,
                iterations: stage.iterations,
                wall_seconds: stage.wall_seconds,
            })
            .collect();

        return FoldingSummary {
            sequence: result.protein.sequence().to_string(),
            n_residues: result.protein.count_residues(),
            initial_rmsd: result.initial_rmsd,
            final_rmsd: result.final_rmsd,
            final_energy: result.energy.total,
            breakdown: result.energy.breakdown,
            stages,
            tm_score: None,
            gdt_ts: None,
            under_5_angstrom: result.within_rmsd(5.0),
            under_4_angstrom: result.within_rmsd(4.0),
            under_3_angstrom: result.within_rmsd(3.0),
        };
    }

    /// Total wall time across all stages, seconds.
    pub fn total_wall_seconds(&self) -> f64 {
        self.stages.iter().map(|s| s.wall_seconds).sum()
    }
}

impl Display for FoldingSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "sequence: {} ({} residues)", self.sequence, self.n_residues)?;
        match (self.initial_rmsd, self.final_rmsd) {
            (Some(start), Some(end)) => writeln!(f, "rmsd: {:.2} -> {:.2} A", start, end)?,
            _ => writeln!(f, "rmsd: no reference")?,
        }
        writeln!(f, "energy: {:.2} kcal/mol ({})", self.final_energy, self.breakdown)?;
        for stage in &self.stages {
            writeln!(
                f,
                "  {}: {:.2} kcal/mol after {} iterations in {:.3} s{}",
                stage.stage, stage.energy, stage.iterations, stage.wall_seconds,
                if stage.converged { "" } else { " (not converged)" }
            )?;
        }
        write!(f, "total wall time: {:.3} s", self.total_wall_seconds())
    }
}
