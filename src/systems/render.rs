//! Render system
//!
//! Collects the draw calls of a frame. There is no GPU here: the frame is
//! recorded into a [`FrameRecorder`] that a backend (or a test) can read.

use roadrage_core::{CameraTemplate, World};
use roadrage_math::units::DEG_TO_RAD;
use roadrage_render::{Camera, FrameRecorder, Renderable};

use crate::config::CameraConfig;

/// Build the scene camera from the level's start pose and the camera config
pub fn camera_from_level(start: &CameraTemplate, config: &CameraConfig, aspect: f32) -> Camera {
    let orbit_deg = config.orbit_speed_deg.unwrap_or(start.orbit_speed_deg);
    let mut camera = Camera::new(config.projection(aspect));
    camera
        .set_pos(start.position)
        .set_rot(start.look)
        .set_orbit_center(start.orbit_center)
        .set_orbit_speed(orbit_deg * DEG_TO_RAD);
    camera
}

/// Records one frame of draw calls at a time
#[derive(Debug, Default)]
pub struct RenderSystem {
    recorder: FrameRecorder,
    frames: u64,
}

impl RenderSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the world as seen by `camera`, replacing the previous frame
    pub fn render_frame(&mut self, world: &World, camera: &Camera) -> &FrameRecorder {
        self.recorder.clear();
        world.render(camera.view_projection(), &mut self.recorder);
        self.frames += 1;
        log::trace!("Frame {}: {} draw calls", self.frames, self.recorder.len());
        &self.recorder
    }

    /// The most recently rendered frame
    pub fn last_frame(&self) -> &FrameRecorder {
        &self.recorder
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadrage_core::{Car, CivilianTemplate, LevelTemplate, MeshKind, Vec3};

    #[test]
    fn test_camera_takes_level_pose() {
        let start = CameraTemplate::default();
        let camera = camera_from_level(&start, &CameraConfig::default(), 4.0 / 3.0);
        assert_eq!(camera.pos().to_array(), [0.5, 1.5, 5.0]);
        assert!((camera.orbit_speed() - 5.0 * DEG_TO_RAD).abs() < 0.0001);
    }

    #[test]
    fn test_config_overrides_orbit_speed() {
        let config = CameraConfig {
            orbit_speed_deg: Some(0.0),
            ..CameraConfig::default()
        };
        let camera = camera_from_level(&CameraTemplate::default(), &config, 1.0);
        assert_eq!(camera.orbit_speed(), 0.0);
    }

    #[test]
    fn test_render_frame_replaces_previous() {
        let level = LevelTemplate::new("frame")
            .with_civilian(CivilianTemplate::new(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, 0.0, 0.0));
        let world = level.build(Car::default());
        let camera = camera_from_level(&level.camera, &CameraConfig::default(), 1.0);

        let mut system = RenderSystem::new();
        assert_eq!(system.render_frame(&world, &camera).len(), 3);
        assert_eq!(system.render_frame(&world, &camera).len(), 3);
        assert_eq!(system.frame_count(), 2);
        assert_eq!(system.last_frame().count(MeshKind::Axes), 1);
        assert_eq!(system.last_frame().count(MeshKind::Car), 1);
    }
}
