use crate::errors::GeometryError;
use crate::Vec3;

/// The twenty standard amino acids, listed as (one-letter, three-letter) pairs.
pub const AMINO_ACIDS: [(char, &str); 20] = [
    ('A', "ALA"), ('R', "ARG"), ('N', "ASN"), ('D', "ASP"), ('C', "CYS"),
    ('Q', "GLN"), ('E', "GLU"), ('G', "GLY"), ('H', "HIS"), ('I', "ILE"),
    ('L', "LEU"), ('K', "LYS"), ('M', "MET"), ('F', "PHE"), ('P', "PRO"),
    ('S', "SER"), ('T', "THR"), ('W', "TRP"), ('Y', "TYR"), ('V', "VAL"),
];

/// Converts a one-letter amino acid code to its three-letter name.
///
/// ```
/// # use tinyfold_geometry::one_to_three;
/// assert_eq!(one_to_three('W'), Some("TRP"));
/// assert_eq!(one_to_three('X'), None);
/// ```
pub fn one_to_three(aa: char) -> Option<&'static str> {
    let aa = aa.to_ascii_uppercase();
    for (code, name) in AMINO_ACIDS {
        if code == aa {
            return Some(name);
        }
    }
    return None;
}

/// Converts a three-letter amino acid name to its one-letter code.
pub fn three_to_one(name: &str) -> Option<char> {
    for (code, name3) in AMINO_ACIDS {
        if name3.eq_ignore_ascii_case(name) {
            return Some(code);
        }
    }
    return None;
}

/// Checks that every letter of a sequence names a standard amino acid.
///
/// Returns the offending letter wrapped in [`GeometryError::UnknownAminoAcid`] otherwise;
/// an empty sequence is an error of its own kind.
pub fn validate_sequence(sequence: &str) -> Result<(), GeometryError> {
    if sequence.is_empty() {
        return Err(GeometryError::EmptySequence);
    }
    for letter in sequence.chars() {
        if one_to_three(letter).is_none() {
            return Err(GeometryError::UnknownAminoAcid { letter });
        }
    }
    return Ok(());
}

/// A single atom of a protein structure.
///
/// Scoring recognises the backbone names `N`, `CA`, `C`, `O` and `H`; atoms under
/// any other name may be stored but are ignored by the energy model.
#[derive(Clone, Debug)]
pub struct Atom {
    /// serial number of this atom, numbered from 1
    pub serial: i32,
    /// PDB-style atom name, e.g. `"CA"`
    pub name: String,
    /// chemical element symbol
    pub element: String,
    /// index of the residue this atom belongs to, numbered from 0
    pub res_index: usize,
    /// identifier of the chain this atom belongs to
    pub chain_id: String,
    /// Cartesian coordinates in Angstroms
    pub pos: Vec3,
}

impl Atom {
    /// Creates a backbone atom of a given name at a given position.
    pub fn new(serial: i32, name: &str, res_index: usize, pos: Vec3) -> Atom {
        Atom {
            serial,
            name: name.to_string(),
            element: element_for_name(name).to_string(),
            res_index,
            chain_id: String::from("A"),
            pos,
        }
    }

    /// Atomic mass of this atom's element in Daltons; zero for unrecognised elements.
    pub fn mass(&self) -> f64 {
        match self.element.as_str() {
            "C" => 12.011,
            "N" => 14.007,
            "O" => 15.999,
            "H" => 1.008,
            "S" => 32.06,
            _ => 0.0,
        }
    }
}

/// Infers the chemical element from a backbone atom name.
fn element_for_name(name: &str) -> &'static str {
    match name {
        "N" => "N",
        "CA" | "C" => "C",
        "O" => "O",
        "H" => "H",
        _ => "",
    }
}

/// A single amino-acid residue with indices of its backbone atoms.
///
/// The indices point into the flat atom list of the owning [`Protein`]; any of them
/// may be `None` for partial or terminal residues.
#[derive(Clone, Debug)]
pub struct Residue {
    /// three-letter residue name, e.g. `"TRP"`
    pub name3: String,
    /// residue number as printed in human-readable output, numbered from 1
    pub seq_num: i32,
    /// identifier of the chain this residue belongs to
    pub chain_id: String,
    /// index of the backbone amide nitrogen
    pub n: Option<usize>,
    /// index of the alpha carbon
    pub ca: Option<usize>,
    /// index of the carbonyl carbon
    pub c: Option<usize>,
    /// index of the carbonyl oxygen
    pub o: Option<usize>,
}

impl Residue {
    /// Creates a residue with no atoms assigned yet.
    pub fn new(name3: &str, seq_num: i32) -> Residue {
        Residue {
            name3: name3.to_string(),
            seq_num,
            chain_id: String::from("A"),
            n: None,
            ca: None,
            c: None,
            o: None,
        }
    }

    /// Says whether all four backbone atoms of this residue are present.
    pub fn has_complete_backbone(&self) -> bool {
        self.n.is_some() && self.ca.is_some() && self.c.is_some() && self.o.is_some()
    }
}

/// A protein: an ordered sequence of residues and the flat list of their atoms.
///
/// The flat atom list is the canonical iteration order for all energy and force loops.
/// Residues are numbered from 1 in human-readable output but indexed from 0 internally.
#[derive(Clone, Debug)]
pub struct Protein {
    sequence: String,
    residues: Vec<Residue>,
    atoms: Vec<Atom>,
}

impl Protein {
    /// Creates an empty protein for a given amino-acid sequence.
    ///
    /// Atoms are appended later with [`push_atom()`](Protein::push_atom), typically
    /// by the backbone builder.
    pub fn new(sequence: &str) -> Result<Protein, GeometryError> {
        validate_sequence(sequence)?;
        let mut residues = Vec::with_capacity(sequence.len());
        for (i, letter) in sequence.chars().enumerate() {
            let name3 = one_to_three(letter).unwrap();       // validated above
            residues.push(Residue::new(name3, i as i32 + 1));
        }
        return Ok(Protein { sequence: sequence.to_string(), residues, atoms: Vec::new() });
    }

    /// Appends an atom and registers it with its residue when its name is a backbone name.
    pub fn push_atom(&mut self, atom: Atom) {
        let atom_index = self.atoms.len();
        let res_index = atom.res_index;
        if res_index < self.residues.len() {
            let residue = &mut self.residues[res_index];
            match atom.name.as_str() {
                "N" => residue.n = Some(atom_index),
                "CA" => residue.ca = Some(atom_index),
                "C" => residue.c = Some(atom_index),
                "O" => residue.o = Some(atom_index),
                _ => {}
            }
        }
        self.atoms.push(atom);
    }

    /// Returns the one-letter amino-acid sequence of this protein.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Returns the one-letter code of the i-th residue.
    pub fn aa1(&self, res_index: usize) -> char {
        self.sequence.as_bytes()[res_index] as char
    }

    /// Counts the residues of this protein.
    pub fn count_residues(&self) -> usize {
        self.residues.len()
    }

    /// Counts the atoms of this protein.
    pub fn count_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Immutable access to all atoms in the canonical order.
    pub fn atoms(&self) -> &Vec<Atom> {
        &self.atoms
    }

    /// Mutable access to all atoms in the canonical order.
    pub fn atoms_mut(&mut self) -> &mut Vec<Atom> {
        &mut self.atoms
    }

    /// Immutable access to the residues of this protein.
    pub fn residues(&self) -> &Vec<Residue> {
        &self.residues
    }

    /// Returns the i-th residue.
    pub fn residue(&self, res_index: usize) -> &Residue {
        &self.residues[res_index]
    }

    /// Returns a backbone atom of a given residue looked up **by name**.
    ///
    /// Returns `None` when the residue index is out of range or the atom is missing.
    pub fn backbone_atom(&self, res_index: usize, name: &str) -> Option<&Atom> {
        let residue = self.residues.get(res_index)?;
        let index = match name {
            "N" => residue.n,
            "CA" => residue.ca,
            "C" => residue.c,
            "O" => residue.o,
            _ => None,
        };
        return index.map(|i| &self.atoms[i]);
    }

    /// Finds any atom of a given residue by its name, scanning the flat atom list.
    ///
    /// Unlike [`backbone_atom()`](Protein::backbone_atom) this also finds atoms that are
    /// not registered with the residue, such as an explicit amide hydrogen.
    pub fn find_atom(&self, res_index: usize, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.res_index == res_index && a.name == name)
    }

    /// Overwrites the position of a backbone atom of a given residue, looked up by name.
    pub fn set_backbone_pos(&mut self, res_index: usize, name: &str, pos: &Vec3) {
        let Some(residue) = self.residues.get(res_index) else { return };
        let index = match name {
            "N" => residue.n,
            "CA" => residue.ca,
            "C" => residue.c,
            "O" => residue.o,
            _ => None,
        };
        if let Some(i) = index {
            self.atoms[i].pos.set(pos);
        }
    }

    /// Copies backbone atom positions from another structure of the same sequence.
    ///
    /// Atoms are matched by residue index and atom name, never by their position
    /// in the flat atom list, so the copy is correct even when the two structures
    /// store their atoms in a different order.
    pub fn copy_backbone_positions(&mut self, source: &Protein) {
        let n = self.count_residues().min(source.count_residues());
        for res_index in 0..n {
            for name in ["N", "CA", "C", "O"] {
                if let Some(atom) = source.backbone_atom(res_index, name) {
                    let pos = atom.pos;
                    self.set_backbone_pos(res_index, name, &pos);
                }
            }
        }
    }

    /// Collects the positions of all alpha carbons, in the residue order.
    pub fn ca_positions(&self) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(self.count_residues());
        for res_index in 0..self.count_residues() {
            if let Some(atom) = self.backbone_atom(res_index, "CA") {
                out.push(atom.pos);
            }
        }
        return out;
    }

    /// Mass-weighted centre of this protein's atoms.
    ///
    /// Falls back to the geometric centre when no atom carries a known mass;
    /// the zero vector is returned for a protein without atoms.
    pub fn center_of_mass(&self) -> Vec3 {
        let mut center = Vec3::zero();
        let mut total_mass = 0.0;
        for atom in &self.atoms {
            let mass = atom.mass();
            center.x += mass * atom.pos.x;
            center.y += mass * atom.pos.y;
            center.z += mass * atom.pos.z;
            total_mass += mass;
        }
        if total_mass > 0.0 {
            center /= total_mass;
            return center;
        }
        let mut fallback = Vec3::zero();
        for atom in &self.atoms {
            fallback += &atom.pos;
        }
        if !self.atoms.is_empty() {
            fallback /= self.atoms.len() as f64;
        }
        return fallback;
    }

    /// Says whether every atom of this protein has finite coordinates.
    pub fn all_finite(&self) -> bool {
        self.atoms.iter().all(|a| a.pos.is_finite())
    }

    /// Returns the largest distance of any atom from the coordinate origin.
    pub fn max_distance_from_origin(&self) -> f64 {
        let origin = Vec3::zero();
        let mut max_d = 0.0;
        for a in &self.atoms {
            let d = a.pos.distance_to(&origin);
            if d > max_d {
                max_d = d;
            }
        }
        return max_d;
    }
}
