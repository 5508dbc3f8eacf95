//! Affine transforms that carry their own inverse
//!
//! Every constructor builds the inverse algebraically alongside the matrix
//! (a translation by `v` is undone by `-v`, a rotation by its transpose, a
//! scale by the reciprocal factors) and every product combines the stored
//! inverses in reverse order. No general 4x4 inversion ever happens, which
//! keeps `M⁻¹·M = I` cheap to maintain for hundreds of transforms per frame.
//!
//! Besides the 4x4 pair an affine transform keeps the inverse of its
//! upper-left 3x3 block, the source of the normal matrix. That block is only
//! tracked for rotation/scale/translation chains: [`AffineTransform::ortho_2d`]
//! does not provide it, and any product involving such a transform drops it.

use std::fmt;
use std::ops::{Mul, MulAssign};

use crate::error::MathError;
use crate::mat4::{self, Mat3, Mat4, IDENTITY, IDENTITY3};
use crate::scalar::near_zero;
use crate::{ProjectiveTransform, Quaternion, Vec3};

/// An affine 4x4 transform (rotation, scale, translation) and its inverse
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    m: Mat4,
    im: Mat4,
    im3: Option<Mat3>,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    pub(crate) fn from_parts(m: Mat4, im: Mat4, im3: Option<Mat3>) -> Self {
        Self { m, im, im3 }
    }

    /// The identity transform
    pub fn identity() -> Self {
        Self::from_parts(IDENTITY, IDENTITY, Some(IDENTITY3))
    }

    /// Translation by `v`
    pub fn translation(v: Vec3) -> Self {
        let mut m = IDENTITY;
        let mut im = IDENTITY;
        m[3][..3].copy_from_slice(&v.to_array());
        im[3][..3].copy_from_slice(&(-v).to_array());
        Self::from_parts(m, im, Some(IDENTITY3))
    }

    /// The translation part of another affine transform
    pub fn translation_of(other: &AffineTransform) -> Self {
        Self::translation(other.translation_part())
    }

    /// Rotation of `theta` radians about the global X axis
    pub fn rotation_x(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self::rotation_from_3x3([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]])
    }

    /// Rotation of `theta` radians about the global Y axis
    pub fn rotation_y(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self::rotation_from_3x3([[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]])
    }

    /// Rotation of `theta` radians about the global Z axis
    pub fn rotation_z(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self::rotation_from_3x3([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation described by a quaternion
    ///
    /// The quaternion is normalized first so the matrix is orthonormal and
    /// its transpose is an exact inverse.
    pub fn rotation_quat(q: Quaternion) -> Self {
        let Quaternion { x, y, z, w } = q.normalize();
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (xw, yw, zw) = (x * w, y * w, z * w);

        Self::rotation_from_3x3([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy + zw), 2.0 * (xz - yw)],
            [2.0 * (xy - zw), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + xw)],
            [2.0 * (xz + yw), 2.0 * (yz - xw), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    fn rotation_from_3x3(r: Mat3) -> Self {
        let m = mat4::from_upper_left(&r);
        let im = mat4::transpose(&m);
        Self::from_parts(m, im, Some(mat4::upper_left(&im)))
    }

    /// Uniform scale; a factor too close to zero yields the identity
    pub fn scale_uniform(factor: f32) -> Self {
        Self::scale(Vec3::new(factor, factor, factor))
    }

    /// Non-uniform scale
    ///
    /// Components too close to zero are replaced by one, so the result is
    /// always invertible.
    pub fn scale(v: Vec3) -> Self {
        let safe = |f: f32| if near_zero(f) { 1.0 } else { f };
        let (sx, sy, sz) = (safe(v.x), safe(v.y), safe(v.z));

        let diag3 = |a: f32, b: f32, c: f32| -> Mat3 { [[a, 0.0, 0.0], [0.0, b, 0.0], [0.0, 0.0, c]] };
        let inv3 = diag3(1.0 / sx, 1.0 / sy, 1.0 / sz);

        Self::from_parts(
            mat4::from_upper_left(&diag3(sx, sy, sz)),
            mat4::from_upper_left(&inv3),
            Some(inv3),
        )
    }

    /// Screen-space projection for 2D drawing
    ///
    /// Puts the origin at the top-left corner with +X to the right and +Y
    /// down, `w` by `h` pixels. A zero width or height yields the identity.
    ///
    /// The 4x4 inverse is exact, but no 3x3 inverse is provided: this is
    /// meant for UI overlays, never for lit geometry.
    pub fn ortho_2d(w: f32, h: f32) -> Self {
        if near_zero(w) || near_zero(h) {
            return Self::identity();
        }

        let mut m = IDENTITY;
        m[0][0] = 2.0 / w;
        m[1][1] = -2.0 / h;
        m[2][2] = -1.0;
        m[3][0] = -1.0;
        m[3][1] = 1.0;

        let mut im = IDENTITY;
        im[0][0] = 0.5 * w;
        im[1][1] = -0.5 * h;
        im[2][2] = -1.0;
        im[3][0] = 0.5 * w;
        im[3][1] = 0.5 * h;

        Self::from_parts(m, im, None)
    }

    /// The transform undoing this one; swaps the stored matrices
    pub fn inverse(&self) -> Self {
        Self::from_parts(self.im, self.m, self.im3.map(|_| mat4::upper_left(&self.m)))
    }

    /// The forward matrix
    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.m
    }

    /// The inverse matrix
    #[inline]
    pub fn inverse_matrix(&self) -> &Mat4 {
        &self.im
    }

    /// The matrix as 16 floats, column-major
    pub fn array16f(&self) -> [f32; 16] {
        mat4::flatten(&self.m)
    }

    /// The inverse as 16 floats, column-major
    pub fn array16f_inverse(&self) -> [f32; 16] {
        mat4::flatten(&self.im)
    }

    /// Upper-left 3x3 block as 9 floats, column-major
    pub fn array9f(&self) -> [f32; 9] {
        mat4::flatten3(&mat4::upper_left(&self.m))
    }

    /// Inverse of the upper-left 3x3 block, if it is still tracked
    pub fn array9f_inverse(&self) -> Option<[f32; 9]> {
        self.im3.as_ref().map(mat4::flatten3)
    }

    /// Matrix for transforming normals: the transposed 3x3 inverse
    pub fn normal_matrix(&self) -> Option<[f32; 9]> {
        self.im3.map(|im3| {
            let t = mat4::upper_left(&mat4::transpose(&mat4::from_upper_left(&im3)));
            mat4::flatten3(&t)
        })
    }

    /// Whether the 3x3 inverse is still available
    #[inline]
    pub fn has_inverse3(&self) -> bool {
        self.im3.is_some()
    }

    /// The translation column
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m[3][0], self.m[3][1], self.m[3][2])
    }

    /// Element at 1-based (row, col)
    pub fn element(&self, row: usize, col: usize) -> Result<f32, MathError> {
        mat4::element(&self.m, row, col)
    }

    /// Element at a 0-based column-major index
    pub fn get(&self, idx: usize) -> Result<f32, MathError> {
        mat4::element_flat(&self.m, idx)
    }

    /// Transform a point (w = 1)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let [x, y, z, _] = mat4::transform(&self.m, [p.x, p.y, p.z, 1.0]);
        Vec3::new(x, y, z)
    }

    /// Transform a direction (w = 0); translation does not apply
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        let [x, y, z, _] = mat4::transform(&self.m, [d.x, d.y, d.z, 0.0]);
        Vec3::new(x, y, z)
    }

    /// Text dump of the matrix and its inverse
    pub fn describe(&self, decimals: usize, one_liner: bool) -> String {
        mat4::describe(&self.m, &self.im, decimals, one_liner)
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;

    /// `self * o`: applies `o` first; the inverse is `o⁻¹ * self⁻¹`
    fn mul(self, o: AffineTransform) -> AffineTransform {
        let im3 = match (self.im3, o.im3) {
            (Some(a), Some(b)) => Some(mat4::mul3(&b, &a)),
            _ => None,
        };
        AffineTransform::from_parts(mat4::mul(&self.m, &o.m), mat4::mul(&o.im, &self.im), im3)
    }
}

impl MulAssign for AffineTransform {
    fn mul_assign(&mut self, o: AffineTransform) {
        *self = *self * o;
    }
}

impl Mul<ProjectiveTransform> for AffineTransform {
    type Output = ProjectiveTransform;

    fn mul(self, o: ProjectiveTransform) -> ProjectiveTransform {
        ProjectiveTransform::from(self) * o
    }
}

impl Mul<Vec3> for AffineTransform {
    type Output = Vec3;

    fn mul(self, p: Vec3) -> Vec3 {
        self.transform_point(p)
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(f.precision().unwrap_or(2), f.alternate()))
    }
}
