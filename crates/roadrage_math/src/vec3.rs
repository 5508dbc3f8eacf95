//! 3D Vector type

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::scalar::{near_zero, snap_to_axis};

/// 3D vector used both for points and for directions
///
/// The homogeneous `w` coordinate is not stored: [`Vec3::from_homogeneous`]
/// folds it into x, y, z, and all arithmetic works on the spatial part only.
/// Equality is tolerance based (see [`crate::EPSILON`]).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a new Vec3
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector from homogeneous coordinates
    ///
    /// A `w` near zero marks a direction and leaves x, y, z untouched;
    /// any other `w` is divided out (perspective division).
    pub fn from_homogeneous(x: f32, y: f32, z: f32, w: f32) -> Self {
        if near_zero(w) {
            Self::new(x, y, z)
        } else {
            Self::new(x / w, y / w, z / w)
        }
    }

    /// Read a component by index (0 = x, 1 = y, 2 = z)
    pub fn get(&self, idx: usize) -> Result<f32, MathError> {
        match idx {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(MathError::IndexOutOfRange { index: idx, len: 3 }),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (faster than length)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude)
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalize to unit length
    ///
    /// The zero vector stays zero. A vector too short to divide by its length
    /// snaps onto the nearest coordinate axis, so the result is always finite.
    pub fn normalized(self) -> Self {
        if self.x == 0.0 && self.y == 0.0 && self.z == 0.0 {
            return Self::ZERO;
        }

        let len = self.length();
        if near_zero(len) {
            let (axis, sign) = snap_to_axis(&self.to_array());
            let mut out = [0.0; 3];
            out[axis] = sign;
            Self::new(out[0], out[1], out[2])
        } else {
            self * (1.0 / len)
        }
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Component-wise multiplication
    #[inline]
    pub fn component_mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }
}

impl PartialEq for Vec3 {
    fn eq(&self, other: &Self) -> bool {
        let d = *self - *other;
        near_zero(d.x) && near_zero(d.y) && near_zero(d.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = f.precision().unwrap_or(2);
        write!(f, "({:.p$}, {:.p$}, {:.p$})", self.x, self.y, self.z, p = p)
    }
}

// Operator overloads

impl std::ops::Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Mul<Vec3> for f32 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

impl std::ops::MulAssign<f32> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl std::ops::Div<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_homogeneous_point() {
        let v = Vec3::from_homogeneous(2.0, 4.0, 6.0, 2.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_homogeneous_direction() {
        let v = Vec3::from_homogeneous(2.0, 4.0, 6.0, 0.0);
        assert_eq!(v.to_array(), [2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_get_out_of_range() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.get(2), Ok(3.0));
        assert_eq!(v.get(3), Err(MathError::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn test_cross() {
        assert_eq!(Vec3::X.cross(Vec3::Y).to_array(), [0.0, 0.0, 1.0]);
        assert_eq!(Vec3::Y.cross(Vec3::X).to_array(), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_dot_and_length() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
    }

    #[test]
    fn test_normalized() {
        let n = Vec3::new(0.0, 3.0, 4.0).normalized();
        assert!((n.length() - 1.0).abs() < 0.0001);
        assert_eq!(n, Vec3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_normalized_zero_stays_zero() {
        let n = Vec3::ZERO.normalized();
        assert_eq!(n.to_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalized_tiny_snaps_to_axis() {
        let n = Vec3::new(0.0, -1e-7, 1e-8).normalized();
        assert_eq!(n.to_array(), [0.0, -1.0, 0.0]);
        assert!(n.x.is_finite() && n.y.is_finite() && n.z.is_finite());
    }

    #[test]
    fn test_epsilon_equality() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(1.00001, 2.0, 2.99999);
        assert_eq!(a, b);
        assert_ne!(a, Vec3::new(1.01, 2.0, 3.0));
    }

    #[test]
    fn test_lerp() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, -10.0, 4.0);
        assert_eq!(a.lerp(b, 0.5).to_array(), [5.0, -5.0, 2.0]);
    }

    #[test]
    fn test_display_precision() {
        let v = Vec3::new(1.0, 2.5, -3.26);
        assert_eq!(format!("{}", v), "(1.00, 2.50, -3.26)");
        assert_eq!(format!("{:.1}", v), "(1.0, 2.5, -3.3)");
    }
}
