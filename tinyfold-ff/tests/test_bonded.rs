#[cfg(test)]
mod bonded_tests {
    use tinyfold_ff::{BondedEnergy, Energy};
    use tinyfold_ff::params::BOND_C_N;
    use tinyfold_geometry::{assert_delta, build_backbone, BackboneAngles, Vec3};

    fn extended_chain(n: usize) -> tinyfold_geometry::Protein {
        let sequence: String = std::iter::repeat('A').take(n).collect();
        build_backbone(&sequence, &vec![BackboneAngles::extended(); n]).unwrap()
    }

    #[test]
    fn built_chain_is_at_equilibrium() {
        let chain = extended_chain(6);
        let bonded = BondedEnergy::new();
        assert!(bonded.bond_energy(&chain) < 1e-6);
        assert!(bonded.angle_energy(&chain) < 2.0);
    }

    #[test]
    fn stretched_bond_pays_harmonic_energy() {
        let mut chain = extended_chain(2);
        let bonded = BondedEnergy::new();
        let relaxed = bonded.bond_energy(&chain);

        // --- pull the second residue away along the peptide bond by 0.1 A
        let c_pos = chain.backbone_atom(0, "C").unwrap().pos;
        let n_pos = chain.backbone_atom(1, "N").unwrap().pos;
        let mut shift = Vec3::sub_s(&n_pos, &c_pos);
        shift.normalize();
        shift *= 0.1;
        for atom in chain.atoms_mut().iter_mut().filter(|a| a.res_index == 1) {
            atom.pos += &shift;
        }

        let stretched = bonded.bond_energy(&chain);
        // --- E = k d^2 for the peptide bond alone
        assert_delta!(stretched - relaxed, BOND_C_N.k * 0.01, 1e-3);
    }

    #[test]
    fn forces_vanish_at_equilibrium() {
        let chain = extended_chain(4);
        let forces = BondedEnergy::new().bond_forces(&chain);
        for f in &forces {
            assert!(f.length() < 1e-6, "residual force: {:?}", f);
        }
    }

    #[test]
    fn forces_restore_a_stretched_bond() {
        let mut chain = extended_chain(2);
        let c_pos = chain.backbone_atom(0, "C").unwrap().pos;
        let n_pos = chain.backbone_atom(1, "N").unwrap().pos;
        let mut shift = Vec3::sub_s(&n_pos, &c_pos);
        shift.normalize();
        shift *= 0.2;
        for atom in chain.atoms_mut().iter_mut().filter(|a| a.res_index == 1) {
            atom.pos += &shift;
        }

        let forces = BondedEnergy::new().bond_forces(&chain);
        let n_index = chain.residue(1).n.unwrap();
        // --- the force on the displaced nitrogen points back towards the carbonyl carbon
        let back = Vec3::sub_s(&c_pos, &chain.atoms()[n_index].pos);
        assert!(Vec3::dot(&forces[n_index], &back) > 0.0);
    }

    #[test]
    fn per_residue_energies_cover_the_total() {
        let mut chain = extended_chain(5);
        // --- distort the chain so that every term is nonzero
        for (k, atom) in chain.atoms_mut().iter_mut().enumerate() {
            atom.pos.x += 0.05 * ((k % 3) as f64 - 1.0);
        }
        let bonded = BondedEnergy::new();
        let total = bonded.energy(&chain);
        assert!(total > 0.0);

        let mut by_residue = 0.0;
        for i in 0..5 {
            by_residue += bonded.energy_by_residue(&chain, i);
        }
        // --- every bond is shared by at most two residues, every angle owned by its vertex
        assert!(by_residue >= total - 1e-9);
    }
}
