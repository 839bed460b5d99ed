#[cfg(test)]
mod sasa_tests {
    use tinyfold_ff::{residue_sasa, SasaParams};
    use tinyfold_geometry::{assert_delta, Atom, Protein, Vec3};

    fn ca_chain(positions: &[Vec3]) -> Protein {
        let sequence: String = std::iter::repeat('A').take(positions.len()).collect();
        let mut protein = Protein::new(&sequence).unwrap();
        for (i, pos) in positions.iter().enumerate() {
            protein.push_atom(Atom::new(i as i32 + 1, "CA", i, *pos));
        }
        return protein;
    }

    #[test]
    fn isolated_residue_is_fully_exposed() {
        let protein = ca_chain(&[Vec3::zero()]);
        let params = SasaParams::default();
        let areas = residue_sasa(&protein, &params);

        let radius = params.ca_radius + params.probe_radius;
        let full = 4.0 * std::f64::consts::PI * radius * radius;
        assert_eq!(areas.len(), 1);
        assert_delta!(areas[0], full, 1e-9);
    }

    #[test]
    fn middle_of_a_chain_is_partly_buried() {
        let spacing = 3.8;
        let positions: Vec<Vec3> = (0..5).map(|i| Vec3::new(spacing * i as f64, 0.0, 0.0)).collect();
        let protein = ca_chain(&positions);
        let areas = residue_sasa(&protein, &SasaParams::default());

        // --- the middle residue is occluded from both sides, the termini from one
        assert!(areas[2] < areas[0]);
        assert!(areas[2] < areas[4]);
        let radius = 2.0 + 1.4;
        let full = 4.0 * std::f64::consts::PI * radius * radius;
        assert!(areas[2] < full);
        assert!(areas[0] > 0.0);
    }

    #[test]
    fn crowding_buries_the_central_residue() {
        // --- a central residue caged by six close neighbours
        let d = 3.0;
        let positions = vec![
            Vec3::zero(),
            Vec3::new(d, 0.0, 0.0), Vec3::new(-d, 0.0, 0.0),
            Vec3::new(0.0, d, 0.0), Vec3::new(0.0, -d, 0.0),
            Vec3::new(0.0, 0.0, d), Vec3::new(0.0, 0.0, -d),
        ];
        let protein = ca_chain(&positions);
        let areas = residue_sasa(&protein, &SasaParams::default());

        let radius = 2.0 + 1.4;
        let full = 4.0 * std::f64::consts::PI * radius * radius;
        assert!(areas[0] < 0.5 * full, "central residue too exposed: {}", areas[0]);
    }
}
