#[cfg(test)]
mod hbond_tests {
    use tinyfold_ff::{find_hydrogen_bonds, Energy, HydrogenBondEnergy};
    use tinyfold_geometry::{assert_delta, build_backbone, Atom, BackboneAngles, Protein, Vec3};

    /// A donor amide (residue 0) facing an acceptor carbonyl (residue 2) head-on,
    /// with the ideal 2.9 A nitrogen-oxygen separation.
    fn ideal_pair() -> Protein {
        let mut protein = Protein::new("AAA").unwrap();
        // --- donor backbone: CA behind N so the amide hydrogen points towards the acceptor
        protein.push_atom(Atom::new(1, "N", 0, Vec3::zero()));
        protein.push_atom(Atom::new(2, "CA", 0, Vec3::new(1.46, 0.0, 0.0)));
        // --- acceptor carbonyl along the -X axis
        protein.push_atom(Atom::new(3, "O", 2, Vec3::new(-2.9, 0.0, 0.0)));
        protein.push_atom(Atom::new(4, "C", 2, Vec3::new(-4.13, 0.0, 0.0)));
        return protein;
    }

    #[test]
    fn ideal_geometry_scores_the_full_well() {
        let protein = ideal_pair();
        let bonds = find_hydrogen_bonds(&protein);

        assert_eq!(bonds.len(), 1);
        let hb = &bonds[0];
        assert_eq!(hb.donor_res, 0);
        assert_eq!(hb.acceptor_res, 2);
        assert_delta!(hb.n_o_distance, 2.9, 1e-9);
        assert_delta!(hb.angle_deg, 180.0, 1e-6);
        // --- ideal distance and linear angle give the full -5 kcal/mol
        assert_delta!(hb.energy, -5.0, 1e-9);

        let term = HydrogenBondEnergy::new();
        assert_delta!(term.energy(&protein), -5.0, 1e-9);
    }

    #[test]
    fn explicit_hydrogen_takes_precedence() {
        let mut protein = ideal_pair();
        // --- an explicit amide hydrogen on the donor, 1.9 A from the oxygen
        protein.push_atom(Atom::new(5, "H", 0, Vec3::new(-1.0, 0.0, 0.0)));

        let bonds = find_hydrogen_bonds(&protein);
        assert_eq!(bonds.len(), 1);
        assert_delta!(bonds[0].h_o_distance, 1.9, 1e-9);
    }

    #[test]
    fn sequence_neighbours_cannot_bond() {
        let mut protein = Protein::new("AAA").unwrap();
        protein.push_atom(Atom::new(1, "N", 0, Vec3::zero()));
        protein.push_atom(Atom::new(2, "CA", 0, Vec3::new(1.46, 0.0, 0.0)));
        // --- the same ideal geometry, but only one residue apart
        protein.push_atom(Atom::new(3, "O", 1, Vec3::new(-2.9, 0.0, 0.0)));

        assert!(find_hydrogen_bonds(&protein).is_empty());
    }

    #[test]
    fn distance_window_is_enforced() {
        for (distance, expected) in [(2.0, 0), (2.9, 1), (3.4, 1), (4.0, 0)] {
            let mut protein = Protein::new("AAA").unwrap();
            protein.push_atom(Atom::new(1, "N", 0, Vec3::zero()));
            protein.push_atom(Atom::new(2, "CA", 0, Vec3::new(1.46, 0.0, 0.0)));
            protein.push_atom(Atom::new(3, "O", 2, Vec3::new(-distance, 0.0, 0.0)));
            assert_eq!(
                find_hydrogen_bonds(&protein).len(),
                expected,
                "unexpected bond count at {} A", distance
            );
        }
    }

    #[test]
    fn bent_donors_are_rejected() {
        let mut protein = Protein::new("AAA").unwrap();
        protein.push_atom(Atom::new(1, "N", 0, Vec3::zero()));
        protein.push_atom(Atom::new(2, "CA", 0, Vec3::new(1.46, 0.0, 0.0)));
        // --- the oxygen sits sideways: the N-H...O angle collapses towards 70 degrees
        protein.push_atom(Atom::new(3, "O", 2, Vec3::new(0.0, 3.0, 0.0)));

        assert!(find_hydrogen_bonds(&protein).is_empty());
    }

    #[test]
    fn extended_chain_has_no_internal_bonds() {
        let chain = build_backbone("AAAAAAAA", &vec![BackboneAngles::extended(); 8]).unwrap();
        assert!(find_hydrogen_bonds(&chain).is_empty());
    }
}
