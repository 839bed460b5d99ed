#[cfg(test)]
mod force_field_tests {
    use tinyfold_ff::{Energy, ForceField};
    use tinyfold_geometry::{assert_delta, build_backbone, BackboneAngles, Matrix3x3, Protein, Vec3};

    fn helical_chain(n: usize) -> Protein {
        let angles = vec![BackboneAngles::new((-60.0_f64).to_radians(), (-45.0_f64).to_radians()); n];
        let sequence: String = std::iter::repeat('A').take(n).collect();
        build_backbone(&sequence, &angles).unwrap()
    }

    #[test]
    fn breakdown_sums_to_the_raw_total() {
        let chain = helical_chain(10);
        let report = ForceField::new().report(&chain);
        assert!(!report.failed);
        assert_delta!(report.breakdown.sum(), report.raw_total, 1e-9);
        assert!(report.total.is_finite());
    }

    #[test]
    fn energy_is_invariant_under_rigid_motion() {
        let chain = helical_chain(12);
        let before = ForceField::new().report(&chain).raw_total;

        // --- rotate by 30 degrees about Z, then translate
        let (sin, cos) = (30.0_f64.to_radians()).sin_cos();
        let rotation = Matrix3x3::from_array([cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0]);
        let shift = Vec3::new(8.0, -3.0, 12.5);
        let mut moved = chain.clone();
        for atom in moved.atoms_mut() {
            rotation.mul_vec_mut(&mut atom.pos);
            atom.pos += &shift;
        }

        let after = ForceField::new().report(&moved).raw_total;
        assert_delta!(before, after, 1e-3);
    }

    #[test]
    fn zero_cutoffs_remove_the_nonbonded_terms() {
        let chain = helical_chain(8);
        let ff = ForceField::with_cutoffs(0.0, 0.0).unwrap();
        let report = ff.report(&chain);

        assert_eq!(report.breakdown.vdw, 0.0);
        assert_eq!(report.breakdown.elec, 0.0);
        let without_nonbonded = report.breakdown.bond + report.breakdown.angle
            + report.breakdown.dihedral + report.breakdown.hbond + report.breakdown.solvation;
        assert_delta!(report.raw_total, without_nonbonded, 1e-6);
    }

    #[test]
    fn negative_cutoffs_are_rejected() {
        assert!(ForceField::with_cutoffs(-1.0, 12.0).is_err());
        assert!(ForceField::with_cutoffs(10.0, -0.5).is_err());
    }

    #[test]
    fn non_finite_coordinates_raise_the_failure_flag() {
        let mut chain = helical_chain(6);
        chain.atoms_mut()[3].pos.x = f64::NAN;

        let report = ForceField::new().report(&chain);
        assert!(report.failed);
        assert!(report.total.is_finite());
    }

    #[test]
    fn severe_clashes_are_clamped_for_reporting() {
        let mut chain = helical_chain(8);
        // --- collapse half the atoms onto nearly the same point
        for atom in chain.atoms_mut().iter_mut().filter(|a| a.res_index >= 4) {
            let jitter = atom.serial as f64 * 1e-4;
            atom.pos = Vec3::new(jitter, 0.0, 0.0);
        }
        let report = ForceField::new().report(&chain);
        assert!(report.raw_total > report.total || report.raw_total <= 10_000.0);
        assert!(report.total <= 10_000.0);
        assert!(report.total.is_finite());
    }

    #[test]
    fn helix_scores_below_a_clashing_conformation() {
        let helix = helical_chain(10);
        let mut clashed = helix.clone();
        for atom in clashed.atoms_mut().iter_mut().filter(|a| a.res_index >= 5) {
            let jitter = atom.serial as f64 * 1e-3;
            atom.pos = Vec3::new(jitter, jitter, 0.0);
        }
        let ff = ForceField::new();
        assert!(ff.energy(&helix) < ff.energy(&clashed));
    }
}
