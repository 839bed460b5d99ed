use tinyfold_geometry::{Matrix3x3, Protein, Vec3};

use crate::ff::Energy;
use crate::params::kyte_doolittle;

/// Configuration of the solvent-accessible surface area estimator.
#[derive(Clone, Copy, Debug)]
pub struct SasaParams {
    /// number of probe points distributed over each sphere
    pub n_points: usize,
    /// solvent probe radius in Angstroms
    pub probe_radius: f64,
    /// effective radius of the per-residue CA sphere in Angstroms
    pub ca_radius: f64,
}

impl Default for SasaParams {
    fn default() -> SasaParams {
        SasaParams { n_points: 100, probe_radius: 1.4, ca_radius: 2.0 }
    }
}

/// Distributes `n` points quasi-uniformly over the unit sphere with the Fibonacci lattice.
fn fibonacci_sphere(n: usize) -> Vec<Vec3> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    let mut points = Vec::with_capacity(n);
    for k in 0..n {
        let y = 1.0 - 2.0 * (k as f64 + 0.5) / n as f64;
        let r = (1.0 - y * y).sqrt();
        let phi = golden_angle * k as f64;
        points.push(Vec3::new(r * phi.cos(), y, r * phi.sin()));
    }
    return points;
}

/// An orthonormal frame anchored to the first complete `N-CA-C` triple of the structure.
///
/// Probe directions expressed in this frame co-rotate with the molecule, which keeps
/// the discretised area estimate independent of the global orientation.
fn molecular_frame(protein: &Protein) -> Matrix3x3 {
    for i in 0..protein.count_residues() {
        let (Some(n), Some(ca), Some(c)) = (
            protein.backbone_atom(i, "N"),
            protein.backbone_atom(i, "CA"),
            protein.backbone_atom(i, "C"),
        ) else { continue };

        let mut u = Vec3::sub_s(&ca.pos, &n.pos);
        if u.length() < 1e-9 {
            continue;
        }
        u.normalize();
        let plane = Vec3::sub_s(&c.pos, &n.pos);
        let mut w = Vec3::cross(&u, &plane);
        if w.length() < 1e-9 {
            continue;
        }
        w.normalize();
        let v = Vec3::cross(&w, &u);
        return Matrix3x3::from_column_vectors(&u, &v, &w);
    }
    return Matrix3x3::identity();
}

/// Estimates the solvent-accessible surface area of every residue, in square Angstroms.
///
/// A Shrake-Rupley-like scheme on the alpha-carbon level: probe points are spread over
/// a sphere of radius `ca_radius + probe_radius` around each CA and a point counts as
/// buried when it falls inside the extended sphere of any other CA. The area is the
/// exposed fraction of the full sphere surface. Residues without a CA report zero.
pub fn residue_sasa(protein: &Protein, params: &SasaParams) -> Vec<f64> {
    let n_res = protein.count_residues();
    let centers: Vec<Option<Vec3>> = (0..n_res)
        .map(|i| protein.backbone_atom(i, "CA").map(|a| a.pos))
        .collect();
    let radius = params.ca_radius + params.probe_radius;
    let radius_sq = radius * radius;
    let frame = molecular_frame(protein);
    let mut sphere = fibonacci_sphere(params.n_points);
    for dir in sphere.iter_mut() {
        frame.mul_vec_mut(dir);
    }
    let full_area = 4.0 * std::f64::consts::PI * radius * radius;

    let mut areas = vec![0.0; n_res];
    for i in 0..n_res {
        let Some(center) = centers[i] else { continue };
        let mut exposed = 0;
        for dir in &sphere {
            let mut point = *dir;
            point *= radius;
            point += &center;

            let mut occluded = false;
            for (j, other) in centers.iter().enumerate() {
                if j == i {
                    continue;
                }
                if let Some(other_center) = other {
                    if point.distance_square_to(other_center) < radius_sq {
                        occluded = true;
                        break;
                    }
                }
            }
            if !occluded {
                exposed += 1;
            }
        }
        areas[i] = full_area * exposed as f64 / params.n_points as f64;
    }
    return areas;
}

/// solvation surface coefficient per unit of hydrophobicity, kcal/mol/A^2
const SOLVATION_SIGMA: f64 = 0.012;
/// hydrophobic-effect coefficient, kcal/mol/A^2
const HYDROPHOBIC_WEIGHT: f64 = 0.05;
/// entropic cost of one buried residue, kcal/mol
const ENTROPY_PER_BURIED: f64 = 1.0;
/// residues with less exposed area than this count as buried, A^2
const BURIED_THRESHOLD: f64 = 50.0;

/// Solvation and hydrophobic-effect energy built on the SASA estimate.
///
/// Three contributions sum: an atomic-solvation term `sigma(aa) * SASA` with
/// `sigma = 0.012 * hydrophobicity`, a hydrophobic-effect term `0.05 * hydrophobicity
/// * SASA` that makes exposing hydrophobic residues expensive, and a flat entropic
/// cost of 1 kcal/mol per buried residue (exposed area below 50 A^2).
pub struct SolvationEnergy {
    pub params: SasaParams,
}

impl SolvationEnergy {
    pub fn new() -> SolvationEnergy {
        SolvationEnergy { params: SasaParams::default() }
    }

    /// The three solvation contributions of a known per-residue SASA vector.
    fn from_areas(&self, protein: &Protein, areas: &[f64]) -> f64 {
        let mut en = 0.0;
        let mut n_buried = 0;
        for (i, area) in areas.iter().enumerate() {
            let kd = kyte_doolittle(protein.aa1(i));
            en += SOLVATION_SIGMA * kd * area;
            en += HYDROPHOBIC_WEIGHT * kd * area;
            if *area < BURIED_THRESHOLD {
                n_buried += 1;
            }
        }
        return en + ENTROPY_PER_BURIED * n_buried as f64;
    }
}

impl Energy for SolvationEnergy {
    fn energy(&self, protein: &Protein) -> f64 {
        let areas = residue_sasa(protein, &self.params);
        return self.from_areas(protein, &areas);
    }

    fn energy_by_residue(&self, protein: &Protein, res_index: usize) -> f64 {
        let areas = residue_sasa(protein, &self.params);
        let kd = kyte_doolittle(protein.aa1(res_index));
        let area = areas[res_index];
        let buried = if area < BURIED_THRESHOLD { ENTROPY_PER_BURIED } else { 0.0 };
        return (SOLVATION_SIGMA + HYDROPHOBIC_WEIGHT) * kd * area + buried;
    }

    fn name(&self) -> String {
        String::from("Solvation")
    }
}
