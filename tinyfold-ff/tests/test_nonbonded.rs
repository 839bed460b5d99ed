#[cfg(test)]
mod nonbonded_tests {
    use tinyfold_ff::params::{lj_params, partial_charge, COULOMB_CONSTANT};
    use tinyfold_ff::{Energy, NonBondedEnergy};
    use tinyfold_geometry::{assert_delta, Atom, Protein, Vec3};

    /// Two alpha carbons separated by `distance` along X, two residues apart in sequence.
    fn ca_pair(distance: f64) -> Protein {
        let mut protein = Protein::new("AAA").unwrap();
        protein.push_atom(Atom::new(1, "CA", 0, Vec3::zero()));
        protein.push_atom(Atom::new(2, "CA", 2, Vec3::new(distance, 0.0, 0.0)));
        return protein;
    }

    #[test]
    fn lennard_jones_matches_the_formula() {
        let r = 4.0;
        let protein = ca_pair(r);
        let nb = NonBondedEnergy::new();
        let (vdw, _) = nb.energies(&protein);

        let (eps, sigma) = lj_params("C");
        let s6 = (sigma / r).powi(6);
        let expected = 4.0 * eps * (s6 * s6 - s6);
        assert_delta!(vdw, expected, 1e-9);
    }

    #[test]
    fn electrostatics_uses_distance_dependent_dielectric() {
        let r = 5.0;
        let protein = ca_pair(r);
        let nb = NonBondedEnergy::new();
        let (_, elec) = nb.energies(&protein);

        let q = partial_charge("CA");
        let expected = COULOMB_CONSTANT / 4.0 * q * q / (r * r);
        assert_delta!(elec, expected, 1e-9);
    }

    #[test]
    fn bonded_neighbours_are_excluded() {
        let mut protein = Protein::new("AA").unwrap();
        protein.push_atom(Atom::new(1, "CA", 0, Vec3::zero()));
        protein.push_atom(Atom::new(2, "CA", 1, Vec3::new(3.8, 0.0, 0.0)));

        let nb = NonBondedEnergy::new();
        let (vdw, elec) = nb.energies(&protein);
        assert_eq!(vdw, 0.0);
        assert_eq!(elec, 0.0);
    }

    #[test]
    fn cutoffs_truncate_the_interaction() {
        let protein = ca_pair(11.0);
        let nb = NonBondedEnergy::new();
        let (vdw, elec) = nb.energies(&protein);
        // --- 11 A sits beyond the 10 A vdW cutoff but inside the 12 A electrostatic one
        assert_eq!(vdw, 0.0);
        assert!(elec.abs() > 0.0);
    }

    #[test]
    fn zero_cutoffs_disable_both_terms() {
        let protein = ca_pair(3.0);
        let nb = NonBondedEnergy::with_cutoffs(0.0, 0.0);
        let (vdw, elec) = nb.energies(&protein);
        assert_eq!(vdw, 0.0);
        assert_eq!(elec, 0.0);
        assert_eq!(nb.energy(&protein), 0.0);
    }

    #[test]
    fn repulsion_dominates_at_short_range() {
        let close = ca_pair(2.0);
        let apart = ca_pair(4.0);
        let nb = NonBondedEnergy::new();
        assert!(nb.vdw_energy(&close) > 100.0 * nb.vdw_energy(&apart).abs());
    }
}
