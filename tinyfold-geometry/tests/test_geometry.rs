#[cfg(test)]
mod vec3_tests {
    use tinyfold_geometry::{assert_delta, dihedral_angle4, planar_angle3, wrap_angle, wrap_degrees, Vec3};

    #[test]
    fn dihedral_of_a_cube_edge() {
        // --- four vertices of a unit cube give a -90 degree torsion
        let e = Vec3::new(0.0, 0.0, 1.0);
        let a = Vec3::zero();
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(1.0, 1.0, 0.0);
        assert_delta!(dihedral_angle4(&e, &a, &b, &c).to_degrees(), -90.0, 1e-9);
    }

    #[test]
    fn planar_angle_of_a_square() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::zero();
        let c = Vec3::new(0.0, 1.0, 0.0);
        assert_delta!(planar_angle3(&a, &b, &c).to_degrees(), 90.0, 1e-9);
    }

    #[test]
    fn angles_wrap_into_expected_ranges() {
        assert_delta!(wrap_angle(3.5 * std::f64::consts::PI), -0.5 * std::f64::consts::PI, 1e-9);
        assert_delta!(wrap_degrees(350.0), -10.0, 1e-9);
        assert_delta!(wrap_degrees(-190.0), 170.0, 1e-9);
    }
}

#[cfg(test)]
mod quaternion_tests {
    use tinyfold_geometry::{assert_delta, Quaternion};

    #[test]
    fn backbone_angles_round_trip() {
        for (phi, psi) in [(-1.05, -0.78), (-2.1, 2.1), (0.3, -3.0), (2.9, 0.1)] {
            let q = Quaternion::from_backbone_angles(phi, psi);
            let (phi_back, psi_back) = q.to_backbone_angles();
            assert_delta!(phi_back, phi, 1e-9);
            assert_delta!(psi_back, psi, 1e-9);
        }
    }

    #[test]
    fn slerp_hits_both_endpoints() {
        let a = Quaternion::from_backbone_angles(-1.0, -0.5);
        let b = Quaternion::from_backbone_angles(-2.0, 2.0);

        let at_start = Quaternion::slerp(&a, &b, 0.0);
        let at_end = Quaternion::slerp(&a, &b, 1.0);
        assert_delta!(Quaternion::dot(&at_start, &a).abs(), 1.0, 1e-9);
        assert_delta!(Quaternion::dot(&at_end, &b).abs(), 1.0, 1e-9);
    }

    #[test]
    fn slerp_stays_on_the_unit_sphere() {
        let a = Quaternion::from_backbone_angles(-1.2, 2.4);
        let b = Quaternion::from_backbone_angles(1.0, -2.8);
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            let q = Quaternion::slerp(&a, &b, t);
            assert_delta!(q.norm_squared(), 1.0, 1e-9);
        }
    }

    #[test]
    fn slerp_of_nearly_parallel_quaternions() {
        let a = Quaternion::from_backbone_angles(-1.0, 1.0);
        let b = Quaternion::from_backbone_angles(-1.0 + 1e-9, 1.0);
        let q = Quaternion::slerp(&a, &b, 0.5);
        assert_delta!(q.norm_squared(), 1.0, 1e-12);
    }
}

#[cfg(test)]
mod superpose_tests {
    use tinyfold_geometry::{build_backbone, ca_rmsd, superposed_rmsd, BackboneAngles, Vec3};

    #[test]
    fn rmsd_is_invariant_to_rigid_motion() {
        let angles = vec![BackboneAngles::extended(); 6];
        let chain = build_backbone("AAAAAA", &angles).unwrap();

        let mut moved = chain.clone();
        for atom in moved.atoms_mut() {
            // --- translate far away; the superposition must undo this exactly
            atom.pos += &Vec3::new(15.0, -7.0, 3.0);
        }
        let rmsd = ca_rmsd(&moved, &chain).unwrap();
        assert!(rmsd < 1e-9, "rmsd after translation: {}", rmsd);
    }

    #[test]
    fn rmsd_detects_a_displaced_point() {
        let a = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0),
                     Vec3::new(0.0, 0.0, 2.0)];
        let mut b = a.clone();
        b[3].z = 4.0;
        let rmsd = superposed_rmsd(&a, &b).unwrap();
        assert!(rmsd > 0.5, "rmsd too small: {}", rmsd);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let a = vec![Vec3::zero(); 3];
        let b = vec![Vec3::zero(); 4];
        assert!(superposed_rmsd(&a, &b).is_err());
    }
}
