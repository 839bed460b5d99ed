#[cfg(test)]
mod refine_tests {
    use tinyfold_ff::ForceField;
    use tinyfold_geometry::backbone::peptide_bond_length;
    use tinyfold_geometry::{build_backbone, BackboneAngles, Protein};
    use tinyfold_optim::{ConstraintRefiner, RefineParams};

    fn chain(n: usize, phi_deg: f64, psi_deg: f64) -> Protein {
        let angles = vec![BackboneAngles::new(phi_deg.to_radians(), psi_deg.to_radians()); n];
        let sequence: String = std::iter::repeat('A').take(n).collect();
        build_backbone(&sequence, &angles).unwrap()
    }

    #[test]
    fn bad_configurations_are_rejected() {
        assert!(ConstraintRefiner::new(RefineParams { steps: 0, ..RefineParams::default() }).is_err());
        assert!(ConstraintRefiner::new(RefineParams {
            proposal_sigma_deg: 0.0,
            ..RefineParams::default()
        })
        .is_err());
        assert!(ConstraintRefiner::new(RefineParams {
            weight_rama: -1.0,
            ..RefineParams::default()
        })
        .is_err());
    }

    #[test]
    fn allowed_conformations_score_below_disallowed_ones() {
        let refiner = ConstraintRefiner::with_defaults();
        // --- alanine prefers the helix; a basin conformation must beat a forbidden one
        let helix = chain(8, -60.0, -45.0);
        let forbidden = chain(8, -150.0, -120.0);
        assert!(refiner.bias_score(&helix) < refiner.bias_score(&forbidden));
    }

    #[test]
    fn refinement_keeps_the_geometry_ideal() {
        let mut protein = chain(5, -80.0, -20.0);
        let ff = ForceField::new();
        let mut refiner = ConstraintRefiner::new(RefineParams {
            steps: 10,
            seed: Some(7),
            ..RefineParams::default()
        })
        .unwrap();

        let report = refiner.refine(&mut protein, &ff).unwrap();
        assert!(report.converged);
        assert_eq!(report.iterations, 10);
        assert!(protein.all_finite());
        for i in 0..4 {
            let d = peptide_bond_length(&protein, i).unwrap();
            assert!((d - 1.33).abs() < 0.01, "peptide bond {} drifted to {}", i, d);
        }
    }

    #[test]
    fn refinement_is_reproducible_for_a_fixed_seed() {
        let ff = ForceField::new();
        let run = |seed: u64| {
            let mut protein = chain(4, -100.0, 150.0);
            let mut refiner = ConstraintRefiner::new(RefineParams {
                steps: 5,
                seed: Some(seed),
                ..RefineParams::default()
            })
            .unwrap();
            refiner.refine(&mut protein, &ff).unwrap();
            protein
        };

        let first = run(21);
        let second = run(21);
        for (a, b) in first.atoms().iter().zip(second.atoms().iter()) {
            assert_eq!(a.pos, b.pos);
        }
    }
}
