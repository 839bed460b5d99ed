#[cfg(test)]
mod backbone_tests {
    use tinyfold_geometry::backbone::{peptide_bond_length, n_ca_c_angle, BOND_C_N};
    use tinyfold_geometry::{assert_delta, build_backbone, ramachandran, rebuild_backbone,
                            BackboneAngles, GeometryError};

    fn helical_angles(n: usize) -> Vec<BackboneAngles> {
        let mut angles = vec![BackboneAngles::new((-60.0_f64).to_radians(), (-45.0_f64).to_radians()); n];
        angles[0].phi = f64::NAN;
        angles[n - 1].psi = f64::NAN;
        return angles;
    }

    #[test]
    fn built_chain_has_correct_peptide_bonds() {
        let chain = build_backbone("AAAAAAAAAA", &helical_angles(10)).unwrap();

        assert_eq!(chain.count_atoms(), 40);
        assert!(chain.all_finite());
        assert!(chain.max_distance_from_origin() < 1000.0);
        for i in 0..9 {
            let d = peptide_bond_length(&chain, i).unwrap();
            assert!(d > 0.8 && d < 1.8, "peptide bond {} out of range: {}", i, d);
            assert_delta!(d, BOND_C_N, 1e-6);
        }
    }

    #[test]
    fn measured_angles_reproduce_input() {
        let mut angles = Vec::new();
        for i in 0..8 {
            let phi = (-150.0 + 20.0 * i as f64).to_radians();
            let psi = (160.0 - 35.0 * i as f64).to_radians();
            angles.push(BackboneAngles::new(phi, psi));
        }
        angles[0].phi = f64::NAN;
        angles[7].psi = f64::NAN;

        let chain = build_backbone("AGPWSTVL", &angles).unwrap();
        let measured = ramachandran(&chain);

        assert!(measured[0].phi.is_nan());
        assert!(measured[7].psi.is_nan());
        for i in 0..8 {
            if angles[i].has_phi() {
                assert_delta!(measured[i].phi, angles[i].phi, 1e-6);
            }
            if angles[i].has_psi() {
                assert_delta!(measured[i].psi, angles[i].psi, 1e-6);
            }
        }
    }

    #[test]
    fn rebuild_preserves_fixed_geometry() {
        let chain = build_backbone("AAAAA", &helical_angles(5)).unwrap();
        let measured = ramachandran(&chain);

        let mut rebuilt = chain.clone();
        rebuild_backbone(&mut rebuilt, &measured).unwrap();

        for i in 0..5 {
            let angle = n_ca_c_angle(&rebuilt, i).unwrap().to_degrees();
            assert!((angle - 110.0).abs() < 1.0, "N-CA-C angle {} drifted: {}", i, angle);
        }
        for i in 0..4 {
            let d = peptide_bond_length(&rebuilt, i).unwrap();
            assert!((d - BOND_C_N).abs() < 0.01, "peptide bond {} drifted: {}", i, d);
        }
        // --- coordinates must match the original to floating-point noise
        for (a, b) in chain.atoms().iter().zip(rebuilt.atoms().iter()) {
            assert!(a.pos.distance_to(&b.pos) < 1e-6);
        }
    }

    #[test]
    fn build_is_referentially_transparent() {
        let first = build_backbone("NLYIQWLKDG", &helical_angles(10)).unwrap();
        let second = build_backbone("NLYIQWLKDG", &helical_angles(10)).unwrap();
        for (a, b) in first.atoms().iter().zip(second.atoms().iter()) {
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn single_residue_builds_fine() {
        let angles = vec![BackboneAngles::new(f64::NAN, f64::NAN)];
        let chain = build_backbone("W", &angles).unwrap();

        assert_eq!(chain.count_atoms(), 4);
        assert!(chain.all_finite());
        let measured = ramachandran(&chain);
        assert_eq!(measured.len(), 1);
        assert!(measured[0].phi.is_nan());
        assert!(measured[0].psi.is_nan());
    }

    #[test]
    fn centre_of_mass_sits_inside_the_bounding_box() {
        let chain = build_backbone("AAAA", &helical_angles(4)).unwrap();
        let com = chain.center_of_mass();
        assert!(com.is_finite());

        for axis in 0..3 {
            let lo = chain.atoms().iter().map(|a| a.pos[axis]).fold(f64::MAX, f64::min);
            let hi = chain.atoms().iter().map(|a| a.pos[axis]).fold(f64::MIN, f64::max);
            assert!(com[axis] >= lo && com[axis] <= hi, "axis {} out of box", axis);
        }
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let err = build_backbone("", &[]);
        assert!(matches!(err, Err(GeometryError::EmptySequence)));

        let err = build_backbone("AXA", &helical_angles(3));
        assert!(matches!(err, Err(GeometryError::UnknownAminoAcid { letter: 'X' })));

        let err = build_backbone("AAA", &helical_angles(5));
        assert!(matches!(err, Err(GeometryError::AngleCountMismatch { .. })));
    }
}
