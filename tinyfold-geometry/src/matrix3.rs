use std::fmt;
use std::ops::{Index, IndexMut};

use crate::Vec3;

/// A 3x3 matrix used for local-frame rotations during backbone reconstruction.
///
/// Elements are stored row-wise in a flat `[f64; 9]` array:
/// ```text
///     | 0 1 2 |
/// m = | 3 4 5 |
///     | 6 7 8 |
/// ```
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Matrix3x3 {
    array: [f64; 9],
}

impl Matrix3x3 {
    /// Creates a matrix filled with zeros.
    pub fn new() -> Matrix3x3 {
        Matrix3x3::default()
    }

    /// Creates a matrix from a flat array given in the row-wise order.
    ///
    /// ```
    /// # use tinyfold_geometry::Matrix3x3;
    /// let m = Matrix3x3::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    /// assert_eq!(m[1], 2.0);
    /// assert_eq!(m[5], 6.0);
    /// ```
    pub fn from_array(m: [f64; 9]) -> Matrix3x3 {
        Matrix3x3 { array: m }
    }

    /// Creates the identity matrix.
    ///
    /// ```
    /// # use tinyfold_geometry::{Matrix3x3, Vec3};
    /// let mut v = Vec3::new(1.0, 2.0, 3.0);
    /// Matrix3x3::identity().mul_vec_mut(&mut v);
    /// assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn identity() -> Matrix3x3 {
        Matrix3x3::from_array([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// Creates a matrix whose columns are the three given vectors.
    ///
    /// ```
    /// # use tinyfold_geometry::{Matrix3x3, Vec3};
    /// let a = Vec3::new(1.0, 4.0, 7.0);
    /// let b = Vec3::new(2.0, 5.0, 8.0);
    /// let c = Vec3::new(3.0, 6.0, 9.0);
    /// let m = Matrix3x3::from_column_vectors(&a, &b, &c);
    /// assert_eq!(m[0], 1.0); assert_eq!(m[1], 2.0); assert_eq!(m[8], 9.0);
    /// ```
    pub fn from_column_vectors(a: &Vec3, b: &Vec3, c: &Vec3) -> Matrix3x3 {
        Matrix3x3::from_array([a.x, b.x, c.x, a.y, b.y, c.y, a.z, b.z, c.z])
    }

    /// Multiplies a vector by this matrix in place: `v = M * v`.
    pub fn mul_vec_mut(&self, v: &mut Vec3) {
        let x = self.array[0] * v.x + self.array[1] * v.y + self.array[2] * v.z;
        let y = self.array[3] * v.x + self.array[4] * v.y + self.array[5] * v.z;
        let z = self.array[6] * v.x + self.array[7] * v.y + self.array[8] * v.z;
        v.set3(x, y, z);
    }
}

impl Index<usize> for Matrix3x3 {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.array[i]
    }
}

impl IndexMut<usize> for Matrix3x3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.array[i]
    }
}

impl fmt::Debug for Matrix3x3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ [{:.2}, {:.2}, {:.2}], [{:.2}, {:.2}, {:.2}], [{:.2}, {:.2}, {:.2}] ]",
            self.array[0], self.array[1], self.array[2], self.array[3], self.array[4],
            self.array[5], self.array[6], self.array[7], self.array[8]
        )
    }
}
