//! Predicts a protein's backbone structure from its amino-acid sequence.
//!
//! ``tinyfold`` wires the member crates into a three-phase pipeline:
//!
//! 1. **Sampling** (``tinyfold-sampling``) draws candidate conformations from the
//!    allowed Ramachandran basins and builds them with the forward kinematics of
//!    ``tinyfold-geometry``.
//! 2. **Scoring** (``tinyfold-ff``) ranks candidates with a molecular-mechanics
//!    energy model: bonded terms, Lennard-Jones, screened electrostatics, a dihedral
//!    potential, hydrogen bonds and SASA-based solvation.
//! 3. **Optimisation** (``tinyfold-optim``) descends to a nearby minimum in dihedral
//!    space, with simulated annealing and constraint-guided refinement as backup.
//!
//! The [`FoldingPipeline`] is the single entry point; it returns the best structure
//! together with its energy breakdown, RMSD against an optional reference and
//! per-stage diagnostics.
//!
//! ```no_run
//! use tinyfold::FoldingPipeline;
//!
//! let pipeline = FoldingPipeline::with_defaults();
//! let result = pipeline.run("NLYIQWLKDGGPSSGRPPPS", None).unwrap();
//! assert!(result.protein.all_finite());
//! for stage in &result.stages {
//!     println!("{}", stage);
//! }
//! ```

#![allow(clippy::needless_return)]

mod pipeline;
mod summary;

pub use pipeline::{propensity_constraints, FoldError, FoldingPipeline, FoldingResult, PipelineConfig};
pub use summary::{FoldingSummary, StageSummary};

pub use tinyfold_ff::{Energy, EnergyBreakdown, EnergyReport, ForceField};
pub use tinyfold_geometry::{build_backbone, ca_rmsd, ramachandran, BackboneAngles, Protein};
pub use tinyfold_optim::{AnnealParams, LbfgsParams, RefineParams, RelaxParams, StageReport};
pub use tinyfold_sampling::{ConformationSampler, SamplerConfig};
