//! Secondary-structure assignment from hydrogen-bond patterns.

use tinyfold_geometry::{classify_rama, ramachandran, Protein, SecondaryClass};

use crate::hbonds::find_hydrogen_bonds;

/// Assigns a secondary-structure class to every residue.
///
/// The baseline comes from the Ramachandran classification of each residue's angles;
/// hydrogen-bond patterns then override it. A bond from the amide of residue `i+3` or
/// `i+4` back to the carbonyl of residue `i` marks the whole covered span as helical,
/// the signature pattern of 3-10 and alpha helices. Bonds between sequence-distant
/// partners mark both residues as sheet.
pub fn assign_secondary_structure(protein: &Protein) -> Vec<SecondaryClass> {
    let angles = ramachandran(protein);
    let mut classes: Vec<SecondaryClass> = angles
        .iter()
        .map(|pair| classify_rama(pair.phi.to_degrees(), pair.psi.to_degrees()))
        .collect();

    for hb in find_hydrogen_bonds(protein) {
        let separation = hb.donor_res as i64 - hb.acceptor_res as i64;
        if separation == 3 || separation == 4 {
            for res_index in hb.acceptor_res..=hb.donor_res {
                classes[res_index] = SecondaryClass::AlphaHelix;
            }
        } else if separation.abs() > 4 {
            classes[hb.donor_res] = SecondaryClass::BetaSheet;
            classes[hb.acceptor_res] = SecondaryClass::BetaSheet;
        }
    }
    return classes;
}

/// Renders the per-residue assignment as a one-letter string, e.g. `"--HHHH--EE-"`.
pub fn secondary_structure_string(protein: &Protein) -> String {
    assign_secondary_structure(protein)
        .iter()
        .map(|class| class.to_string())
        .collect()
}
