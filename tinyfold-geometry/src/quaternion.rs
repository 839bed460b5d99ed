use crate::wrap_angle;

/// Unit quaternion used as an alternative parameterisation of a residue's `(phi, psi)` pair.
///
/// A conformation of a single residue is encoded as the composition of two rotations:
/// by `phi` about the X axis and by `psi` about the Y axis. Quaternions obtained that way
/// can be smoothly interpolated with [`slerp()`](Quaternion::slerp), which interpolates
/// backbone conformations without ever leaving the manifold of valid rotations.
///
/// ```
/// # use tinyfold_geometry::Quaternion;
/// let q = Quaternion::from_backbone_angles(-1.05, -0.78);
/// let (phi, psi) = q.to_backbone_angles();
/// assert!((phi + 1.05).abs() < 1e-9);
/// assert!((psi + 0.78).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// Creates a new quaternion from its four components.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Quaternion {
        Quaternion { w, x, y, z }
    }

    /// Creates the identity rotation.
    pub fn identity() -> Quaternion {
        Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Encodes a `(phi, psi)` pair as a unit quaternion.
    ///
    /// The two backbone dihedrals enter as half-angle rotations about fixed, orthogonal axes;
    /// the mapping is inverted by [`to_backbone_angles()`](Quaternion::to_backbone_angles).
    pub fn from_backbone_angles(phi: f64, psi: f64) -> Quaternion {
        let q_phi = Quaternion::new((phi / 2.0).cos(), (phi / 2.0).sin(), 0.0, 0.0);
        let q_psi = Quaternion::new((psi / 2.0).cos(), 0.0, (psi / 2.0).sin(), 0.0);
        return Quaternion::multiply(&q_phi, &q_psi);
    }

    /// Recovers the `(phi, psi)` pair from this quaternion's half-angles.
    ///
    /// Both returned angles are wrapped into `[-pi, pi)`.
    pub fn to_backbone_angles(&self) -> (f64, f64) {
        let phi = 2.0 * f64::atan2(self.x, self.w);
        let psi = 2.0 * f64::atan2(self.y, self.w);
        return (wrap_angle(phi), wrap_angle(psi));
    }

    /// Hamilton product of two quaternions.
    pub fn multiply(a: &Quaternion, b: &Quaternion) -> Quaternion {
        Quaternion {
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        }
    }

    /// Dot product of two quaternions, i.e. the cosine of the angle between them on the 3-sphere.
    pub fn dot(a: &Quaternion, b: &Quaternion) -> f64 {
        a.w * b.w + a.x * b.x + a.y * b.y + a.z * b.z
    }

    /// Returns the squared norm of this quaternion.
    pub fn norm_squared(&self) -> f64 {
        Quaternion::dot(self, self)
    }

    /// Scales this quaternion to the unit norm.
    ///
    /// ```
    /// # use tinyfold_geometry::Quaternion;
    /// let mut q = Quaternion::new(2.0, 0.0, 0.0, 0.0);
    /// q.normalize();
    /// assert!((q.norm_squared() - 1.0).abs() < 1e-12);
    /// ```
    pub fn normalize(&mut self) {
        let n = self.norm_squared().sqrt();
        self.w /= n;
        self.x /= n;
        self.y /= n;
        self.z /= n;
    }

    /// Spherical linear interpolation between two unit quaternions.
    ///
    /// The interpolation follows the great circle connecting `a` and `b` on the 3-sphere.
    /// Since `q` and `-q` denote the same rotation, `b` is negated whenever the dot product
    /// is negative so that the shorter of the two arcs is taken. For nearly parallel
    /// quaternions the routine falls back to linear interpolation followed by normalisation.
    ///
    /// ```
    /// # use tinyfold_geometry::Quaternion;
    /// let a = Quaternion::from_backbone_angles(-1.0, -0.5);
    /// let b = Quaternion::from_backbone_angles(-2.0, 2.0);
    /// let mid = Quaternion::slerp(&a, &b, 0.5);
    /// assert!((mid.norm_squared() - 1.0).abs() < 1e-9);
    /// ```
    pub fn slerp(a: &Quaternion, b: &Quaternion, t: f64) -> Quaternion {
        let mut bb = b.clone();
        let mut dot = Quaternion::dot(a, b);
        if dot < 0.0 {
            // --- take the short path around the two-cover
            bb = Quaternion::new(-b.w, -b.x, -b.y, -b.z);
            dot = -dot;
        }

        if dot > 1.0 - 1e-6 {
            // --- nearly parallel: lerp and re-normalise
            let mut out = Quaternion::new(
                a.w + t * (bb.w - a.w),
                a.x + t * (bb.x - a.x),
                a.y + t * (bb.y - a.y),
                a.z + t * (bb.z - a.z),
            );
            out.normalize();
            return out;
        }

        let theta = dot.clamp(-1.0, 1.0).acos();
        let sin_theta = theta.sin();
        let wa = ((1.0 - t) * theta).sin() / sin_theta;
        let wb = (t * theta).sin() / sin_theta;
        return Quaternion::new(
            wa * a.w + wb * bb.w,
            wa * a.x + wb * bb.x,
            wa * a.y + wb * bb.y,
            wa * a.z + wb * bb.z,
        );
    }
}
