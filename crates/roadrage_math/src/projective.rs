//! General 4x4 transforms, including perspective projection
//!
//! A [`ProjectiveTransform`] tracks its inverse exactly like an
//! [`AffineTransform`] but has no 3x3 block. Any affine transform converts
//! into one losslessly; there is no way back once a projection is involved.

use std::fmt;
use std::ops::{Mul, MulAssign};

use crate::error::MathError;
use crate::mat4::{self, Mat4, IDENTITY};
use crate::scalar::{near_zero, EPSILON};
use crate::{AffineTransform, Vec3};

/// Near plane used when none is given
pub const DEFAULT_NEAR: f32 = 2.5;
/// Far plane used when none is given
pub const DEFAULT_FAR: f32 = 1000.0;
/// Field of view (degrees) substituted for a degenerate one
pub const FALLBACK_FOV: f32 = 45.0;

/// A projective 4x4 transform and its inverse
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectiveTransform {
    m: Mat4,
    im: Mat4,
}

impl Default for ProjectiveTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<AffineTransform> for ProjectiveTransform {
    fn from(affine: AffineTransform) -> Self {
        Self::from_parts(*affine.matrix(), *affine.inverse_matrix())
    }
}

impl ProjectiveTransform {
    pub(crate) fn from_parts(m: Mat4, im: Mat4) -> Self {
        Self { m, im }
    }

    pub fn identity() -> Self {
        Self::from_parts(IDENTITY, IDENTITY)
    }

    /// Right-handed perspective projection looking down -Z
    ///
    /// `fov_deg` is the vertical field of view in degrees. Degenerate input is
    /// replaced rather than rejected: a field of view within epsilon of zero
    /// or at least 180° becomes 45°, a zero aspect ratio becomes 1, and
    /// near/far planes that are not `0 < near < far` fall back to
    /// [`DEFAULT_NEAR`] and [`DEFAULT_FAR`].
    pub fn perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let fov_deg = if near_zero(fov_deg) || fov_deg >= 180.0 - EPSILON {
            FALLBACK_FOV
        } else {
            fov_deg.abs()
        };
        let aspect = if near_zero(aspect) { 1.0 } else { aspect.abs() };
        let (near, far) = if near <= 0.0 || far - near <= EPSILON {
            (DEFAULT_NEAR, DEFAULT_FAR)
        } else {
            (near, far)
        };

        let focal = 1.0 / (fov_deg.to_radians() * 0.5).tan();
        let depth = near - far;

        let mut m = [[0.0f32; 4]; 4];
        m[0][0] = focal / aspect;
        m[1][1] = focal;
        m[2][2] = (far + near) / depth;
        m[2][3] = -1.0;
        m[3][2] = 2.0 * far * near / depth;

        let mut im = [[0.0f32; 4]; 4];
        im[0][0] = aspect / focal;
        im[1][1] = 1.0 / focal;
        im[2][3] = depth / (2.0 * far * near);
        im[3][2] = -1.0;
        im[3][3] = (far + near) / (2.0 * far * near);

        Self::from_parts(m, im)
    }

    /// Perspective projection with the default near and far planes
    pub fn perspective_default(fov_deg: f32, aspect: f32) -> Self {
        Self::perspective(fov_deg, aspect, DEFAULT_NEAR, DEFAULT_FAR)
    }

    /// The transform undoing this one; swaps the stored matrices
    pub fn inverse(&self) -> Self {
        Self::from_parts(self.im, self.m)
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.m
    }

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

    /// Element at 1-based (row, col)
    pub fn element(&self, row: usize, col: usize) -> Result<f32, MathError> {
        mat4::element(&self.m, row, col)
    }

    /// Element at a 0-based column-major index
    pub fn get(&self, idx: usize) -> Result<f32, MathError> {
        mat4::element_flat(&self.m, idx)
    }

    /// Transform a point, dividing by the resulting w
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let [x, y, z, w] = mat4::transform(&self.m, [p.x, p.y, p.z, 1.0]);
        Vec3::from_homogeneous(x, y, z, w)
    }

    /// Text dump of the matrix and its inverse
    pub fn describe(&self, decimals: usize, one_liner: bool) -> String {
        mat4::describe(&self.m, &self.im, decimals, one_liner)
    }
}

impl Mul for ProjectiveTransform {
    type Output = ProjectiveTransform;

    fn mul(self, o: ProjectiveTransform) -> ProjectiveTransform {
        ProjectiveTransform::from_parts(mat4::mul(&self.m, &o.m), mat4::mul(&o.im, &self.im))
    }
}

impl Mul<AffineTransform> for ProjectiveTransform {
    type Output = ProjectiveTransform;

    fn mul(self, o: AffineTransform) -> ProjectiveTransform {
        self * ProjectiveTransform::from(o)
    }
}

impl MulAssign for ProjectiveTransform {
    fn mul_assign(&mut self, o: ProjectiveTransform) {
        *self = *self * o;
    }
}

impl MulAssign<AffineTransform> for ProjectiveTransform {
    fn mul_assign(&mut self, o: AffineTransform) {
        *self = *self * o;
    }
}

impl fmt::Display for ProjectiveTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(f.precision().unwrap_or(2), f.alternate()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn assert_inverse_holds(t: &ProjectiveTransform) {
        assert!(
            mat4::is_identity(&mat4::mul(t.matrix(), t.inverse_matrix()), 1e-3),
            "M·M⁻¹ != I:\n{}",
            t
        );
        assert!(
            mat4::is_identity(&mat4::mul(t.inverse_matrix(), t.matrix()), 1e-3),
            "M⁻¹·M != I:\n{}",
            t
        );
    }

    #[test]
    fn test_affine_embedding_is_lossless() {
        let affine = AffineTransform::translation(Vec3::new(0.5, -3.0, 7.25))
            * AffineTransform::rotation_y(0.3)
            * AffineTransform::scale(Vec3::new(0.1, 0.5, 1.0));
        let projective = ProjectiveTransform::from(affine);
        assert_eq!(projective.array16f(), affine.array16f());
        assert_eq!(projective.array16f_inverse(), affine.array16f_inverse());
    }

    #[test]
    fn test_perspective_inverse() {
        assert_inverse_holds(&ProjectiveTransform::perspective(45.0, 4.0 / 3.0, 2.5, 1000.0));
        assert_inverse_holds(&ProjectiveTransform::perspective(90.0, 1.0, 0.1, 100.0));
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let p = ProjectiveTransform::perspective(60.0, 1.5, 1.0, 10.0);
        let near = p.transform_point(Vec3::new(0.0, 0.0, -1.0));
        let far = p.transform_point(Vec3::new(0.0, 0.0, -10.0));
        assert!(approx_eq(near.z, -1.0), "near z = {}", near.z);
        assert!(approx_eq(far.z, 1.0), "far z = {}", far.z);
    }

    #[test]
    fn test_perspective_degenerate_fov_falls_back() {
        let expected = ProjectiveTransform::perspective(FALLBACK_FOV, 2.0, 1.0, 50.0);
        assert_eq!(ProjectiveTransform::perspective(0.0, 2.0, 1.0, 50.0), expected);
        assert_eq!(ProjectiveTransform::perspective(0.00001, 2.0, 1.0, 50.0), expected);
        assert_eq!(ProjectiveTransform::perspective(180.0, 2.0, 1.0, 50.0), expected);
        assert_eq!(ProjectiveTransform::perspective(270.0, 2.0, 1.0, 50.0), expected);
        assert!(p_is_finite(&ProjectiveTransform::perspective(0.0, 0.0, 0.0, 0.0)));
    }

    fn p_is_finite(p: &ProjectiveTransform) -> bool {
        p.array16f().iter().chain(p.array16f_inverse().iter()).all(|v| v.is_finite())
    }

    #[test]
    fn test_perspective_default_planes() {
        assert_eq!(
            ProjectiveTransform::perspective_default(45.0, 1.0),
            ProjectiveTransform::perspective(45.0, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
        );
    }

    #[test]
    fn test_composition_with_affine() {
        let proj = ProjectiveTransform::perspective_default(45.0, 1.0);
        let view = AffineTransform::rotation_x(0.2) * AffineTransform::translation(Vec3::new(0.0, -1.5, -5.0));

        let a = proj * view;
        let b = proj * ProjectiveTransform::from(view);
        assert_eq!(a, b);
        assert_inverse_holds(&a);

        let c = view * proj;
        assert_inverse_holds(&c);

        let mut d = proj;
        d *= view;
        assert_eq!(d, a);
    }

    #[test]
    fn test_inverse_swaps() {
        let p = ProjectiveTransform::perspective_default(60.0, 1.0);
        assert_eq!(p.inverse().matrix(), p.inverse_matrix());
        assert_eq!(p.inverse().inverse(), p);
    }

    #[test]
    fn test_element_access() {
        let p = ProjectiveTransform::perspective(90.0, 1.0, 1.0, 3.0);
        assert_eq!(p.element(4, 3), Ok(-1.0));
        assert_eq!(p.element(4, 4), Ok(0.0));
        assert!(p.element(5, 4).is_err());
        assert!(p.get(16).is_err());
    }
}
