//! Game simulation system
//!
//! Runs one frame of the game:
//! - Delta time from a fixed step or the wall clock, clamped
//! - Scripted input → avatar car
//! - World and camera thinking
//! - Periodic avatar status line

use roadrage_core::{Clock, Spatial, Thinkable, World};
use roadrage_input::{DriveCommands, DriverController, InputScript};
use roadrage_render::Camera;

use crate::config::SimulationConfig;

/// Result of a simulation update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Seconds simulated this frame, after clamping
    pub dt: f32,
    /// Simulation time at the end of the frame
    pub now: f32,
    /// Commands applied to the avatar this frame
    pub commands: DriveCommands,
}

/// Manages the game simulation loop
pub struct SimulationSystem {
    clock: Clock,
    controller: DriverController,
    config: SimulationConfig,
    next_status: f32,
}

impl SimulationSystem {
    pub fn new(config: SimulationConfig, controller: DriverController) -> Self {
        let next_status = config.status_interval;
        Self {
            clock: Clock::new(),
            controller,
            config,
            next_status,
        }
    }

    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Whether the configured run time is over
    pub fn is_finished(&self) -> bool {
        self.clock.now() >= self.config.duration
    }

    /// Run one simulation frame
    pub fn update(&mut self, world: &mut World, camera: &mut Camera, script: &InputScript) -> SimulationResult {
        // 1. Advance time
        let commands = script.commands_at(self.clock.now());
        let dt = self.advance_clock();

        // 2. Driver input on the avatar, before anything moves
        if let Some(car) = world.avatar_mut().and_then(|avatar| avatar.car.as_mut()) {
            self.controller.apply(commands, car);
        }

        // 3. Move everything
        world.think(dt);
        camera.think(dt);

        // 4. Status line
        let now = self.clock.now();
        if self.config.status_interval > 0.0 && now >= self.next_status {
            if let Some(line) = avatar_status(world) {
                log::info!("[{:>6.2}s] {}", now, line);
            }
            self.next_status += self.config.status_interval;
        }

        SimulationResult { dt, now, commands }
    }

    fn advance_clock(&mut self) -> f32 {
        if self.config.is_fixed_step() {
            self.clock.advance(self.config.fixed_timestep);
        } else {
            self.clock.tick();
        }

        let dt = self.clock.delta_t();
        if dt > self.config.max_dt {
            log::warn!("Frame took {:.3}s, clamping to {:.3}s", dt, self.config.max_dt);
            return self.config.max_dt;
        }
        dt
    }
}

/// One-line readout of the avatar's car and where it is
pub fn avatar_status(world: &World) -> Option<String> {
    let avatar = world.avatar()?;
    let car = avatar.car.as_ref()?;
    let pos = avatar.transform.pos();
    Some(format!(
        "{} at ({:.2}, {:.2}, {:.2})",
        car.status(),
        pos.x,
        pos.y,
        pos.z
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadrage_core::{Car, CarState, LevelTemplate, ProjectiveTransform, Quaternion, Vec3};
    use roadrage_input::{DriveCommand, ScriptStep};

    fn fixed(step: f32) -> SimulationConfig {
        SimulationConfig {
            fixed_timestep: step,
            max_dt: 0.25,
            duration: 1.0,
            status_interval: 0.0,
        }
    }

    fn throttle() -> InputScript {
        InputScript::new(vec![ScriptStep::new(0.0, [DriveCommand::Accelerate])])
    }

    fn camera() -> Camera {
        Camera::new(ProjectiveTransform::perspective_default(45.0, 1.0))
    }

    #[test]
    fn test_fixed_step_drives_avatar() {
        let mut world = LevelTemplate::new("sim").build(Car::default());
        let mut camera = camera();
        let mut sim = SimulationSystem::new(fixed(0.1), DriverController::default());

        let result = sim.update(&mut world, &mut camera, &throttle());
        assert_eq!(result.commands, DriveCommands::ACCELERATE);
        assert!((result.dt - 0.1).abs() < 0.0001);

        while !sim.is_finished() {
            sim.update(&mut world, &mut camera, &throttle());
        }
        let avatar = world.avatar().expect("avatar");
        let car = avatar.car.as_ref().expect("car");
        assert_eq!(car.state(), CarState::Driving);
        assert!(car.speed() > 0.0);
        assert!(avatar.transform.pos().z < 0.0);
    }

    #[test]
    fn test_oversized_dt_is_clamped() {
        let mut world = World::new();
        let mut camera = camera();
        let mut sim = SimulationSystem::new(fixed(1.0), DriverController::default());
        let result = sim.update(&mut world, &mut camera, &InputScript::default());
        assert_eq!(result.dt, 0.25);
        // The clock itself keeps real time
        assert!(sim.clock().now() > 1.0);
    }

    #[test]
    fn test_camera_orbits_with_simulation() {
        let mut world = World::new();
        let mut camera = camera();
        camera.set_orbit_speed(90.0f32.to_radians());
        let mut sim = SimulationSystem::new(fixed(0.25), DriverController::default());
        for _ in 0..4 {
            sim.update(&mut world, &mut camera, &InputScript::default());
        }
        assert_eq!(camera.orbit(), Quaternion::rotation(Vec3::Y, std::f32::consts::FRAC_PI_2));
    }

    #[test]
    fn test_avatar_status_line() {
        assert!(avatar_status(&World::new()).is_none());
        let world = LevelTemplate::new("status").build(Car::default());
        let line = avatar_status(&world).expect("avatar has a car");
        assert!(line.starts_with("standing"));
        assert!(line.contains("(0.00, 0.00, 0.00)"));
    }
}
