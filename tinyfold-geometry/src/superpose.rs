use nalgebra::{Matrix3, Vector3};

use crate::errors::GeometryError;
use crate::{Protein, Vec3};

/// Root-mean-square deviation between two point sets after optimal superposition.
///
/// The optimal rotation is found with the Kabsch algorithm: the covariance matrix of
/// the centred point sets is decomposed by SVD and the rotation is assembled from the
/// singular vectors, with the last axis flipped when the two sets differ in handedness.
/// Point sets must be of equal, non-zero size.
///
/// ```
/// # use tinyfold_geometry::{superposed_rmsd, Vec3};
/// let a = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)];
/// // --- the same triangle, rotated by 90 degrees and shifted
/// let b = vec![Vec3::new(5.0, 1.0, 2.0), Vec3::new(5.0, 2.0, 2.0), Vec3::new(4.0, 2.0, 2.0)];
/// let rmsd = superposed_rmsd(&a, &b).unwrap();
/// assert!(rmsd < 1e-9);
/// ```
pub fn superposed_rmsd(moving: &[Vec3], fixed: &[Vec3]) -> Result<f64, GeometryError> {
    if moving.len() != fixed.len() || moving.is_empty() {
        return Err(GeometryError::SizeMismatch { expected: fixed.len().max(1), found: moving.len() });
    }
    let n = moving.len() as f64;

    // --- centre both sets
    let mut cm = Vec3::zero();
    let mut cf = Vec3::zero();
    for (m, f) in moving.iter().zip(fixed.iter()) {
        cm += m;
        cf += f;
    }
    cm /= n;
    cf /= n;

    // --- covariance of the centred coordinates
    let mut h = Matrix3::<f64>::zeros();
    for (m, f) in moving.iter().zip(fixed.iter()) {
        let mc = Vector3::new(m.x - cm.x, m.y - cm.y, m.z - cm.z);
        let fc = Vector3::new(f.x - cf.x, f.y - cf.y, f.z - cf.z);
        h += mc * fc.transpose();
    }

    let svd = h.svd(true, true);
    let u = svd.u.ok_or(GeometryError::SuperpositionFailed)?;
    let v_t = svd.v_t.ok_or(GeometryError::SuperpositionFailed)?;
    let v = v_t.transpose();

    // --- flip the last axis when the superposition would require a reflection
    let d = if (v * u.transpose()).determinant() < 0.0 { -1.0 } else { 1.0 };
    let correction = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, d));
    let rotation = v * correction * u.transpose();

    let mut sum_sq = 0.0;
    for (m, f) in moving.iter().zip(fixed.iter()) {
        let mc = Vector3::new(m.x - cm.x, m.y - cm.y, m.z - cm.z);
        let fc = Vector3::new(f.x - cf.x, f.y - cf.y, f.z - cf.z);
        let rotated = rotation * mc;
        let diff = rotated - fc;
        sum_sq += diff.norm_squared();
    }

    return Ok((sum_sq / n).sqrt());
}

/// CA-RMSD between two structures of the same length, after optimal superposition.
pub fn ca_rmsd(model: &Protein, reference: &Protein) -> Result<f64, GeometryError> {
    let moving = model.ca_positions();
    let fixed = reference.ca_positions();
    return superposed_rmsd(&moving, &fixed);
}
