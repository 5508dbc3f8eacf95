//! Scene camera
//!
//! There is no camera object on the GPU side, only the transform applied to
//! the whole scene. The camera therefore moves the world the opposite way:
//! the view matrix is
//!
//! `R(rot) * T(-pos) * T(center) * R(orbit) * T(-center)`
//!
//! so the orbit spins the scene around `center` before the look rotation and
//! position apply. The view-projection `proj * view` is cached and rebuilt by
//! every setter.

use roadrage_core::Thinkable;
use roadrage_math::{AffineTransform, ProjectiveTransform, Quaternion, Vec3};

/// Camera with a fixed projection and a movable view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    proj: ProjectiveTransform,
    pos: Vec3,
    rot: Quaternion,
    orbit: Quaternion,
    orbit_center: Vec3,
    /// Orbit spin around Y applied by `think`, rad/s
    orbit_speed: f32,
    view: AffineTransform,
    view_projection: ProjectiveTransform,
}

impl Camera {
    /// Camera at the origin looking down -Z
    pub fn new(proj: ProjectiveTransform) -> Self {
        let mut camera = Self {
            proj,
            pos: Vec3::ZERO,
            rot: Quaternion::IDENTITY,
            orbit: Quaternion::IDENTITY,
            orbit_center: Vec3::ZERO,
            orbit_speed: 0.0,
            view: AffineTransform::identity(),
            view_projection: proj,
        };
        camera.recompute();
        camera
    }

    #[inline]
    pub fn projection(&self) -> &ProjectiveTransform {
        &self.proj
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Vec3) -> &mut Self {
        self.pos = pos;
        self.recompute()
    }

    /// Look rotation
    #[inline]
    pub fn rot(&self) -> Quaternion {
        self.rot
    }

    pub fn set_rot(&mut self, rot: Quaternion) -> &mut Self {
        self.rot = rot;
        self.recompute()
    }

    /// Extra rotation of the scene around the orbit center
    #[inline]
    pub fn orbit(&self) -> Quaternion {
        self.orbit
    }

    pub fn set_orbit(&mut self, orbit: Quaternion) -> &mut Self {
        self.orbit = orbit;
        self.recompute()
    }

    #[inline]
    pub fn orbit_center(&self) -> Vec3 {
        self.orbit_center
    }

    pub fn set_orbit_center(&mut self, center: Vec3) -> &mut Self {
        self.orbit_center = center;
        self.recompute()
    }

    /// Orbit spin applied by [`Thinkable::think`], rad/s
    #[inline]
    pub fn orbit_speed(&self) -> f32 {
        self.orbit_speed
    }

    pub fn set_orbit_speed(&mut self, rad_per_s: f32) -> &mut Self {
        self.orbit_speed = rad_per_s;
        self
    }

    /// The view part alone (no projection)
    #[inline]
    pub fn view(&self) -> &AffineTransform {
        &self.view
    }

    /// The cached `proj * view`
    #[inline]
    pub fn view_projection(&self) -> &ProjectiveTransform {
        &self.view_projection
    }

    fn recompute(&mut self) -> &mut Self {
        let around_center = AffineTransform::translation(self.orbit_center)
            * AffineTransform::rotation_quat(self.orbit)
            * AffineTransform::translation(-self.orbit_center);
        self.view = AffineTransform::rotation_quat(self.rot) * AffineTransform::translation(-self.pos) * around_center;
        self.view_projection = self.proj * self.view;
        self
    }
}

impl Thinkable for Camera {
    /// Spin the current orbit further around Y at the configured speed
    fn think(&mut self, dt: f32) {
        if self.orbit_speed == 0.0 {
            return;
        }
        let spin = Quaternion::rotation(Vec3::Y, self.orbit_speed * dt);
        self.set_orbit((spin * self.orbit).normalize());
    }
}

impl From<&Camera> for ProjectiveTransform {
    fn from(camera: &Camera) -> Self {
        camera.view_projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn camera() -> Camera {
        Camera::new(ProjectiveTransform::perspective_default(45.0, 4.0 / 3.0))
    }

    #[test]
    fn test_new_camera_is_projection() {
        let cam = camera();
        assert_eq!(cam.view(), &AffineTransform::identity());
        assert_eq!(ProjectiveTransform::from(&cam), *cam.projection());
    }

    #[test]
    fn test_position_moves_scene_opposite() {
        let mut cam = camera();
        cam.set_pos(Vec3::new(0.5, 1.5, 5.0));
        let p = cam.view().transform_point(Vec3::new(0.5, 1.5, 5.0));
        assert!(vec_approx_eq(p, Vec3::ZERO));
    }

    #[test]
    fn test_view_projection_tracks_every_setter() {
        let mut cam = camera();
        let initial = *cam.view_projection();

        cam.set_rot(Quaternion::rotation(Vec3::X, 0.3));
        let after_rot = *cam.view_projection();
        assert_ne!(after_rot, initial);

        cam.set_orbit(Quaternion::rotation(Vec3::Y, 0.5));
        assert_ne!(*cam.view_projection(), after_rot);

        let expected = *cam.projection()
            * AffineTransform::rotation_quat(cam.rot())
            * AffineTransform::translation(-cam.pos())
            * AffineTransform::rotation_quat(cam.orbit());
        for (a, b) in cam.view_projection().array16f().iter().zip(expected.array16f().iter()) {
            assert!(approx_eq(*a, *b), "{} != {}", a, b);
        }
    }

    #[test]
    fn test_setting_same_value_is_idempotent() {
        let mut cam = camera();
        cam.set_pos(Vec3::new(1.0, 2.0, 3.0))
            .set_rot(Quaternion::rotation(Vec3::Y, 0.2))
            .set_orbit(Quaternion::rotation(Vec3::Y, 1.0));
        let before = cam.view_projection().array16f();

        let pos = cam.pos();
        let rot = cam.rot();
        let orbit = cam.orbit();
        cam.set_pos(pos).set_rot(rot).set_orbit(orbit);
        assert_eq!(cam.view_projection().array16f(), before);
    }

    #[test]
    fn test_orbit_turns_around_center() {
        let mut cam = camera();
        let center = Vec3::new(0.0, 0.0, -5.0);
        cam.set_orbit_center(center).set_orbit(Quaternion::rotation(Vec3::Y, FRAC_PI_2));

        // The center itself is a fixed point of the orbit
        assert!(vec_approx_eq(cam.view().transform_point(center), center));
        // A point one unit in front of the center swings to its side
        let p = cam.view().transform_point(Vec3::new(0.0, 0.0, -4.0));
        assert!(vec_approx_eq(p, Vec3::new(1.0, 0.0, -5.0)), "got {:?}", p);
    }

    #[test]
    fn test_think_spins_orbit() {
        let mut cam = camera();
        cam.think(1.0);
        assert_eq!(cam.orbit(), Quaternion::IDENTITY);

        cam.set_orbit_speed(5.0f32.to_radians());
        for _ in 0..18 {
            cam.think(1.0);
        }
        let expected = Quaternion::rotation(Vec3::Y, FRAC_PI_2);
        assert_eq!(cam.orbit(), expected);
    }

    #[test]
    fn test_think_keeps_orbit_set_by_caller() {
        let mut cam = camera();
        let tilt = Quaternion::rotation(Vec3::X, 0.5);
        cam.set_orbit_speed(1.0).set_orbit(tilt);
        cam.think(0.1);

        let expected = Quaternion::rotation(Vec3::Y, 0.1) * tilt;
        assert_eq!(cam.orbit(), expected);
        // The X tilt survives the spin
        assert!(cam.orbit().x > 0.2, "got {:?}", cam.orbit());
    }
}
