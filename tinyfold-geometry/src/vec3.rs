use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{AddAssign, DivAssign, Index, IndexMut, MulAssign, SubAssign};

/// 3D vector holding Cartesian coordinates of an atom.
///
/// Besides the three coordinates, [`Vec3`] provides the basic vector algebra used throughout
/// the crate: in-place operators, dot and cross products, distances and angles.
///
/// ```
/// # use tinyfold_geometry::{Vec3, planar_angle3};
/// // --- a right angle built from three points on the XY plane
/// let a = Vec3::new(1.0, 0.0, 0.0);
/// let b = Vec3::zero();
/// let c = Vec3::new(0.0, 1.0, 0.0);
/// assert!((planar_angle3(&a, &b, &c).to_degrees() - 90.0).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Vec3 {
    /// the ``x`` coordinate of this vector
    pub x: f64,
    /// the ``y`` coordinate of this vector
    pub y: f64,
    /// the ``z`` coordinate of this vector
    pub z: f64,
}

impl Vec3 {
    /// Creates a new vector from the given coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    /// Creates the zero vector.
    ///
    /// ```
    /// # use tinyfold_geometry::Vec3;
    /// assert_eq!(Vec3::zero().length(), 0.0);
    /// ```
    pub fn zero() -> Vec3 {
        Vec3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Overwrites the content of this vector with the content of another one.
    pub fn set(&mut self, v: &Vec3) {
        self.x = v.x;
        self.y = v.y;
        self.z = v.z;
    }

    /// Overwrites the three coordinates of this vector.
    pub fn set3(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Adds two vectors and returns the sum as a new vector.
    pub fn add_s(a: &Vec3, b: &Vec3) -> Vec3 {
        Vec3::new(a.x + b.x, a.y + b.y, a.z + b.z)
    }

    /// Subtracts `b` from `a` and returns the difference as a new vector.
    pub fn sub_s(a: &Vec3, b: &Vec3) -> Vec3 {
        Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z)
    }

    /// Calculates the dot product of two vectors.
    ///
    /// ```
    /// # use tinyfold_geometry::Vec3;
    /// let v1 = Vec3::new(3.0, 2.0, 1.0);
    /// let v2 = Vec3::new(-2.0, 3.0, 0.0);    // --- orthogonal to v1
    /// assert!(Vec3::dot(&v1, &v2).abs() < 1e-9);
    /// ```
    pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
        return a.x * b.x + a.y * b.y + a.z * b.z;
    }

    /// Calculates the cross product of two vectors.
    ///
    /// ```
    /// # use tinyfold_geometry::Vec3;
    /// let z = Vec3::cross(&Vec3::new(1.0, 0.0, 0.0), &Vec3::new(0.0, 1.0, 0.0));
    /// assert!((z.z - 1.0).abs() < 1e-9);
    /// ```
    pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
        return Vec3 {
            x: a.y * b.z - a.z * b.y,
            y: a.z * b.x - a.x * b.z,
            z: a.x * b.y - a.y * b.x,
        };
    }

    /// Returns the length of this vector.
    pub fn length(&self) -> f64 {
        return self.length_squared().sqrt();
    }

    /// Returns the squared length of this vector.
    pub fn length_squared(&self) -> f64 {
        return self.x * self.x + self.y * self.y + self.z * self.z;
    }

    /// Turns this vector into its opposite.
    pub fn opposite(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
    }

    /// Scales this vector to the unit length.
    pub fn normalize(&mut self) {
        *self /= self.length();
    }

    /// Returns a unit-length copy of this vector.
    ///
    /// ```
    /// # use tinyfold_geometry::Vec3;
    /// let v = Vec3::new(3.0, 2.0, 1.0).normalized();
    /// assert!((v.length() - 1.0).abs() < 1e-9);
    /// ```
    pub fn normalized(&self) -> Vec3 {
        let mut v = self.clone();
        v.normalize();
        return v;
    }

    /// Calculates the squared distance to another point.
    pub fn distance_square_to(&self, p: &Vec3) -> f64 {
        let mut d = self.x - p.x;
        let mut d2 = d * d;
        d = self.y - p.y;
        d2 += d * d;
        d = self.z - p.z;
        d2 += d * d;
        return d2;
    }

    /// Calculates the distance to another point.
    ///
    /// ```
    /// # use tinyfold_geometry::Vec3;
    /// // --- the classic 3-4-5 triangle
    /// let d = Vec3::new(3.0, 0.0, 0.0).distance_to(&Vec3::new(0.0, 4.0, 0.0));
    /// assert!((d - 5.0).abs() < 1e-9);
    /// ```
    pub fn distance_to(&self, p: &Vec3) -> f64 {
        self.distance_square_to(p).sqrt()
    }

    /// Says whether all three coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of range for Vec3"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index out of range for Vec3"),
        }
    }
}

impl AddAssign<&Vec3> for Vec3 {
    fn add_assign(&mut self, other: &Vec3) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl SubAssign<&Vec3> for Vec3 {
    fn sub_assign(&mut self, other: &Vec3) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

impl PartialEq for Vec3 {
    fn eq(&self, other: &Self) -> bool {
        return self.x == other.x && self.y == other.y && self.z == other.z;
    }
}

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3} {:.3} {:.3}]", self.x, self.y, self.z)
    }
}

impl Display for Vec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} {:.3} {:.3}", self.x, self.y, self.z)
    }
}

/// Calculates the planar angle between two vectors.
pub fn planar_angle2(a: &Vec3, b: &Vec3) -> f64 {
    let cosine = Vec3::dot(a, b) / (a.length() * b.length());
    return cosine.clamp(-1.0, 1.0).acos();
}

/// Calculates the planar angle of the `a-b-c` triangle, i.e. the angle at the vertex `b`.
pub fn planar_angle3(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    let v1 = Vec3::sub_s(a, b);
    let v2 = Vec3::sub_s(c, b);
    return planar_angle2(&v1, &v2);
}

/// Calculates the dihedral angle defined by the four `a-b-c-d` points.
///
/// The returned value is in the `[-pi, pi]` range; its sign follows the IUPAC convention,
/// i.e. the angle is measured looking from `b` towards `c`.
///
/// ```
/// # use tinyfold_geometry::{dihedral_angle4, Vec3};
/// let a = Vec3::new(0.0, 0.0, 1.0);
/// let b = Vec3::zero();
/// let c = Vec3::new(1.0, 0.0, 0.0);
/// let d = Vec3::new(1.0, 1.0, 0.0);
/// assert!((dihedral_angle4(&a, &b, &c, &d).to_degrees() + 90.0).abs() < 1e-6);
/// ```
pub fn dihedral_angle4(a: &Vec3, b: &Vec3, c: &Vec3, d: &Vec3) -> f64 {
    let b0 = Vec3::sub_s(a, b);             // --- b0 = -(b - a)
    let mut b1 = Vec3::sub_s(c, b);
    b1.normalize();
    let b2 = Vec3::sub_s(d, c);

    // --- v: projection of b0 onto the plane perpendicular to b1
    let mut v = b1.clone();
    v *= -Vec3::dot(&b0, &b1);
    v += &b0;
    // --- w: projection of b2 onto the same plane
    let mut w = b1.clone();
    w *= -Vec3::dot(&b2, &b1);
    w += &b2;

    let x = Vec3::dot(&v, &w);
    let y = Vec3::dot(&Vec3::cross(&b1, &v), &w);

    return f64::atan2(y, x);
}

/// Wraps an angle in radians into the `[-pi, pi)` range.
///
/// ```
/// # use tinyfold_geometry::wrap_angle;
/// let a = wrap_angle(3.0 * std::f64::consts::PI);
/// assert!((a + std::f64::consts::PI).abs() < 1e-9);
/// ```
pub fn wrap_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    let mut a = (angle + std::f64::consts::PI) % two_pi;
    if a < 0.0 {
        a += two_pi;
    }
    return a - std::f64::consts::PI;
}

/// Circular difference of two angles given in degrees, wrapped into `[-180, 180)`.
pub fn wrap_degrees(delta: f64) -> f64 {
    let mut d = (delta + 180.0) % 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    return d - 180.0;
}
