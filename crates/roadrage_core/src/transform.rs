//! Placement component (position, yaw, scale) with a cached model matrix

use roadrage_math::{AffineTransform, Vec3};
use roadrage_physics::Spatial;

/// Where an entity is, how it is turned around Y and how big it is
///
/// The model matrix `T(pos) * Ry(ori) * S(scale)` is rebuilt by every
/// setter, so reading it is free and never stale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pos: Vec3,
    ori: f32,
    scale: Vec3,
    model: AffineTransform,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(pos: Vec3, ori: f32, scale: Vec3) -> Self {
        Self {
            pos,
            ori,
            scale,
            model: Self::compose(pos, ori, scale),
        }
    }

    /// At the origin, unrotated, unit scale
    pub fn identity() -> Self {
        Self::new(Vec3::ZERO, 0.0, Vec3::ONE)
    }

    pub fn from_position(pos: Vec3) -> Self {
        Self::new(pos, 0.0, Vec3::ONE)
    }

    /// The cached model matrix
    #[inline]
    pub fn model_matrix(&self) -> &AffineTransform {
        &self.model
    }

    /// Unit vector the entity is facing (local -Z turned by the yaw)
    pub fn forward(&self) -> Vec3 {
        self.model.transform_direction(Vec3::new(0.0, 0.0, -1.0)).normalized()
    }

    fn compose(pos: Vec3, ori: f32, scale: Vec3) -> AffineTransform {
        AffineTransform::translation(pos) * AffineTransform::rotation_y(ori) * AffineTransform::scale(scale)
    }

    fn refresh(&mut self) {
        self.model = Self::compose(self.pos, self.ori, self.scale);
    }
}

impl Spatial for Transform {
    #[inline]
    fn pos(&self) -> Vec3 {
        self.pos
    }

    fn set_pos(&mut self, pos: Vec3) {
        self.pos = pos;
        self.refresh();
    }

    #[inline]
    fn ori(&self) -> f32 {
        self.ori
    }

    fn set_ori(&mut self, ori: f32) {
        self.ori = ori;
        self.refresh();
    }

    #[inline]
    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.refresh();
    }
}
