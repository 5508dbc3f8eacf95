//! Quaternions for representing 3D rotations
//!
//! Products follow the Hamilton convention, so `R(a * b) == R(a) * R(b)`
//! where `R` is [`crate::AffineTransform::rotation_quat`]: writing `a * b`
//! applies `b` first, then `a`, exactly like matrix composition.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::scalar::{clamp, near_zero, snap_to_axis, EPSILON};
use crate::Vec3;

/// Axis-angle description of a rotation
///
/// The axis is normalized on construction, the angle is in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisAngle {
    pub axis: Vec3,
    pub angle: f32,
}

impl AxisAngle {
    pub fn new(axis: Vec3, angle: f32) -> Self {
        Self {
            axis: axis.normalized(),
            angle,
        }
    }
}

/// Quaternion with vector part (x, y, z) and scalar part w
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity rotation
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };
    /// The zero quaternion (not a rotation)
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `radians` about the axis going from the origin to `axis`
    ///
    /// Uses the half-angle form `(sin(θ/2)·â, cos(θ/2))`.
    pub fn rotation(axis: Vec3, radians: f32) -> Self {
        let half = 0.5 * radians;
        let v = axis.normalized() * half.sin();
        Self::new(v.x, v.y, v.z, half.cos())
    }

    /// Rotation from an axis-angle pair
    pub fn from_axis_angle(rot: AxisAngle) -> Self {
        Self::rotation(rot.axis, rot.angle)
    }

    /// Axis-angle form of this (unit) quaternion
    ///
    /// A rotation close to the identity has no meaningful axis; it is
    /// reported as zero radians about +X.
    pub fn to_axis_angle(&self) -> AxisAngle {
        let w = clamp(self.w, -1.0, 1.0);
        let s2 = 1.0 - w * w;
        if near_zero(s2) {
            return AxisAngle::new(Vec3::X, 0.0);
        }
        let factor = 1.0 / s2.sqrt();
        AxisAngle::new(
            Vec3::new(self.x * factor, self.y * factor, self.z * factor),
            2.0 * w.acos(),
        )
    }

    /// Read a component by index (0 = x, 1 = y, 2 = z, 3 = w)
    pub fn get(&self, idx: usize) -> Result<f32, MathError> {
        self.to_array()
            .get(idx)
            .copied()
            .ok_or(MathError::IndexOutOfRange { index: idx, len: 4 })
    }

    /// Overwrite a component by index (0 = x, 1 = y, 2 = z, 3 = w)
    pub fn set(&mut self, idx: usize, value: f32) -> Result<(), MathError> {
        match idx {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => return Err(MathError::IndexOutOfRange { index: idx, len: 4 }),
        }
        Ok(())
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// The vector part (x, y, z)
    #[inline]
    pub fn vector(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Conjugate: the vector part negated, i.e. the opposite rotation
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse: the conjugate divided by the squared length
    ///
    /// Equal to the conjugate for unit quaternions. The zero quaternion has
    /// no inverse and yields itself.
    pub fn inverse(&self) -> Self {
        let len2 = self.dot(self);
        if len2 == 0.0 {
            return Self::ZERO;
        }
        self.conjugate() / len2
    }

    /// Normalize to unit length
    ///
    /// Never produces NaN: the exact zero quaternion stays zero, and a
    /// quaternion too short to divide by its length is snapped onto the
    /// nearest coordinate axis (ties broken in x, y, z, w order).
    pub fn normalize(&self) -> Self {
        if self.x == 0.0 && self.y == 0.0 && self.z == 0.0 && self.w == 0.0 {
            return Self::ZERO;
        }

        let len = self.length();
        if near_zero(len) {
            let (axis, sign) = snap_to_axis(&self.to_array());
            let mut out = [0.0; 4];
            out[axis] = sign;
            Self::new(out[0], out[1], out[2], out[3])
        } else {
            *self * (1.0 / len)
        }
    }

    /// Normalized linear interpolation
    ///
    /// Cheap and always safe, with non-constant angular speed.
    pub fn nlerp(&self, other: &Self, t: f32) -> Self {
        (*self + (*other - *self) * t).normalize()
    }

    /// Spherical linear interpolation
    ///
    /// Falls back to a linear blend when the operands are (anti)parallel,
    /// where `sin(θ)` would vanish.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        let cos_theta = clamp(self.dot(other), -1.0, 1.0);
        let theta = cos_theta.acos();
        let sin_theta = theta.sin();

        let (w1, w2) = if sin_theta.abs() > EPSILON {
            (
                ((1.0 - t) * theta).sin() / sin_theta,
                (t * theta).sin() / sin_theta,
            )
        } else {
            (1.0 - t, t)
        };

        (*self * w1 + *other * w2).normalize()
    }

    /// Rotate a vector: `q * (v, 0) * conj(q)`
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let p = Self::new(v.x, v.y, v.z, 0.0);
        (*self * p * self.conjugate()).vector()
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        let d = *self - *other;
        near_zero(d.x) && near_zero(d.y) && near_zero(d.z) && near_zero(d.w)
    }
}

impl std::fmt::Display for Quaternion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = f.precision().unwrap_or(2);
        write!(
            f,
            "({:.p$}, {:.p$}, {:.p$}, {:.p$})",
            self.x,
            self.y,
            self.z,
            self.w,
            p = p
        )
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;
    /// Hamilton product: concatenates the rotations, `other` applied first
    fn mul(self, o: Self) -> Self {
        Self::new(
            self.w * o.x + self.x * o.w + self.y * o.z - self.z * o.y,
            self.w * o.y + self.y * o.w + self.z * o.x - self.x * o.z,
            self.w * o.z + self.z * o.w + self.x * o.y - self.y * o.x,
            self.w * o.w - self.x * o.x - self.y * o.y - self.z * o.z,
        )
    }
}

impl std::ops::MulAssign for Quaternion {
    fn mul_assign(&mut self, o: Self) {
        *self = *self * o;
    }
}

impl std::ops::Div for Quaternion {
    type Output = Self;
    /// `self * other.inverse()`
    fn div(self, o: Self) -> Self {
        self * o.inverse()
    }
}

impl std::ops::Mul<f32> for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl std::ops::Div<f32> for Quaternion {
    type Output = Self;
    #[inline]
    fn div(self, s: f32) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl std::ops::Add for Quaternion {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z, self.w + o.w)
    }
}

impl std::ops::Sub for Quaternion {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z, self.w - o.w)
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}
