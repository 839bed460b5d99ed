#[cfg(test)]
mod basin_tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tinyfold_sampling::{basin_by_name, Basin, BASINS};
    use tinyfold_geometry::assert_delta;

    #[test]
    fn library_populations_are_sane() {
        let total: f64 = BASINS.iter().map(|b| b.population).sum();
        assert!(total > 0.9 && total <= 1.001, "populations sum to {}", total);
        assert!(basin_by_name("alpha").is_some());
        assert!(basin_by_name("turn2").is_some());
    }

    #[test]
    fn restrictions_guard_special_basins() {
        let left = basin_by_name("left").unwrap();
        assert!(left.admits('G'));
        assert!(!left.admits('A'));

        let turn2 = basin_by_name("turn2").unwrap();
        assert!(turn2.admits('N') && turn2.admits('D') && turn2.admits('G'));
        assert!(!turn2.admits('W'));
    }

    #[test]
    fn zero_width_basin_yields_the_centre_exactly() {
        let degenerate = Basin {
            name: "pin", phi_c: -60.0, psi_c: -45.0, sigma_phi: 0.0, sigma_psi: 0.0,
            population: 1.0, restriction: None,
        };
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..10 {
            let angles = degenerate.sample(&mut rng);
            assert_delta!(angles.phi.to_degrees(), -60.0, 1e-12);
            assert_delta!(angles.psi.to_degrees(), -45.0, 1e-12);
        }
    }

    #[test]
    fn samples_stay_in_the_wrapped_range() {
        let beta = basin_by_name("beta").unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..500 {
            let angles = beta.sample(&mut rng);
            assert!(angles.phi >= -std::f64::consts::PI && angles.phi < std::f64::consts::PI);
            assert!(angles.psi >= -std::f64::consts::PI && angles.psi < std::f64::consts::PI);
        }
    }
}

#[cfg(test)]
mod ensemble_tests {
    use std::collections::HashMap;

    use tinyfold_sampling::{interpolate_conformations, ConformationSampler, SamplerConfig, SamplerError};
    use tinyfold_geometry::{classify_rama, ramachandran, SecondaryClass};

    fn seeded(seed: u64) -> ConformationSampler {
        ConformationSampler::new(SamplerConfig { seed: Some(seed), ..SamplerConfig::default() })
    }

    #[test]
    fn ensembles_are_reproducible_for_a_fixed_seed() {
        let first = seeded(11).mixed_ensemble("NLYIQWLKDG", 5).unwrap();
        let second = seeded(11).mixed_ensemble("NLYIQWLKDG", 5).unwrap();
        for (a, b) in first.iter().zip(second.iter()) {
            for (atom_a, atom_b) in a.atoms().iter().zip(b.atoms().iter()) {
                assert_eq!(atom_a.pos, atom_b.pos);
            }
        }
    }

    #[test]
    fn every_sampled_structure_is_finite() {
        let ensemble = seeded(5).mixed_ensemble("NLYIQWLKDGGPSSGRPPPS", 20).unwrap();
        for protein in &ensemble {
            assert!(protein.all_finite());
            assert!(protein.max_distance_from_origin() < 1000.0);
        }
    }

    #[test]
    fn glycines_prefer_the_left_handed_basin() {
        let ensemble = seeded(17).mixed_ensemble("GGGGGGGGGG", 30).unwrap();

        let mut left = 0;
        let mut total = 0;
        for protein in &ensemble {
            for pair in ramachandran(protein) {
                if !pair.has_phi() || !pair.has_psi() {
                    continue;
                }
                total += 1;
                if classify_rama(pair.phi.to_degrees(), pair.psi.to_degrees()) == SecondaryClass::LeftHelix {
                    left += 1;
                }
            }
        }
        // --- forced glycine sampling keeps well above the one-in-four expectation
        assert!(left as f64 >= 0.25 * total as f64, "{} of {} in the left basin", left, total);
    }

    #[test]
    fn interior_prolines_stay_near_the_ppii_phi() {
        let ensemble = seeded(23).mixed_ensemble("AAPPPPPPAA", 40).unwrap();

        let mut near = 0;
        let mut total = 0;
        for protein in &ensemble {
            let angles = ramachandran(protein);
            for res_index in 2..8 {
                let phi = angles[res_index].phi.to_degrees();
                total += 1;
                if (phi + 60.0).abs() <= 40.0 {
                    near += 1;
                }
            }
        }
        assert!(near as f64 >= 0.6 * total as f64, "{} of {} prolines near phi = -60", near, total);
    }

    #[test]
    fn constraints_pin_residues_to_their_basin() {
        let mut constraints = HashMap::new();
        constraints.insert(2_usize, String::from("alpha"));
        constraints.insert(3_usize, String::from("alpha"));

        let ensemble = seeded(31)
            .constrained_ensemble("AAAAAA", &constraints, 25)
            .unwrap();
        let mut hits = 0;
        let mut total = 0;
        for protein in &ensemble {
            let angles = ramachandran(protein);
            for res_index in [2_usize, 3] {
                total += 1;
                let phi = angles[res_index].phi.to_degrees();
                let psi = angles[res_index].psi.to_degrees();
                // --- constrained draws stay within four sigma of the alpha centre
                if (phi + 60.0).abs() <= 80.0 && (psi + 45.0).abs() <= 80.0 {
                    hits += 1;
                }
            }
        }
        assert!(hits as f64 >= 0.95 * total as f64, "{} of {} inside the alpha basin", hits, total);
    }

    #[test]
    fn unknown_basin_names_are_rejected() {
        let mut constraints = HashMap::new();
        constraints.insert(0_usize, String::from("spiral"));
        let result = seeded(1).constrained_ensemble("AAA", &constraints, 3);
        assert!(matches!(result, Err(SamplerError::UnknownBasin { .. })));
    }

    #[test]
    fn empty_ensembles_are_rejected() {
        assert!(matches!(seeded(1).mixed_ensemble("AAA", 0), Err(SamplerError::EmptyEnsemble)));
    }

    #[test]
    fn interpolation_connects_two_conformations() {
        let mut sampler = seeded(41);
        let ensemble = sampler.per_basin_ensemble("AAAAA").unwrap();
        let (a, b) = (&ensemble[0], &ensemble[ensemble.len() - 1]);

        let at_start = interpolate_conformations(a, b, 0.0).unwrap();
        let angles_a = ramachandran(a);
        let angles_start = ramachandran(&at_start);
        for (pa, ps) in angles_a.iter().zip(angles_start.iter()) {
            if pa.has_phi() && ps.has_phi() {
                assert!((pa.phi - ps.phi).abs() < 1e-6);
            }
        }

        let halfway = interpolate_conformations(a, b, 0.5).unwrap();
        assert!(halfway.all_finite());
    }
}
