//! Placement of a body in the world

use roadrage_math::Vec3;

/// Something with a position, a yaw orientation and a scale
///
/// Implementors are free to cache derived data (a model matrix, typically)
/// and refresh it in the setters; integrators only go through this trait.
pub trait Spatial {
    fn pos(&self) -> Vec3;
    fn set_pos(&mut self, pos: Vec3);

    /// Orientation around the Y axis, in radians
    fn ori(&self) -> f32;
    fn set_ori(&mut self, ori: f32);

    fn scale(&self) -> Vec3;
    fn set_scale(&mut self, scale: Vec3);
}
