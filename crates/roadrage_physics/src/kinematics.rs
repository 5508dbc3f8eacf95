//! Free motion of a body: velocities and accelerations for position,
//! orientation and scale

use roadrage_math::{near_zero, Vec3};
use serde::{Deserialize, Serialize};

use crate::spatial::Spatial;

/// Motion state integrated once per frame
///
/// All quantities are SI: m/s and m/s² for the linear part, rad/s and rad/s²
/// for the yaw, and scale units per second (squared) for the scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kinematics {
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub angular_velocity: f32,
    pub angular_acceleration: f32,
    pub scale_velocity: Vec3,
    pub scale_acceleration: Vec3,
}

impl Kinematics {
    /// A body at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the linear velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder: set the linear acceleration
    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Builder: set the yaw rate
    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Builder: set the scale rate
    pub fn with_scale_velocity(mut self, scale_velocity: Vec3) -> Self {
        self.scale_velocity = scale_velocity;
        self
    }

    /// Whether every rate and acceleration is negligible
    pub fn is_at_rest(&self) -> bool {
        near_zero(self.velocity.length())
            && near_zero(self.acceleration.length())
            && near_zero(self.angular_velocity)
            && near_zero(self.angular_acceleration)
            && near_zero(self.scale_velocity.length())
            && near_zero(self.scale_acceleration.length())
    }

    /// Advance the body by `dt` seconds
    ///
    /// Each derivative updates the quantity below it: acceleration feeds
    /// velocity, velocity feeds position, and likewise for yaw and scale.
    /// A stage whose driving quantity is negligible is skipped outright, so a
    /// body at rest keeps bit-identical placement instead of accumulating
    /// rounding noise.
    pub fn integrate<S: Spatial + ?Sized>(&mut self, body: &mut S, dt: f32) {
        if !near_zero(self.acceleration.length()) {
            self.velocity += self.acceleration * dt;
        }
        if !near_zero(self.velocity.length()) {
            body.set_pos(body.pos() + self.velocity * dt);
        }

        if !near_zero(self.angular_acceleration) {
            self.angular_velocity += self.angular_acceleration * dt;
        }
        if !near_zero(self.angular_velocity) {
            body.set_ori(body.ori() + self.angular_velocity * dt);
        }

        if !near_zero(self.scale_acceleration.length()) {
            self.scale_velocity += self.scale_acceleration * dt;
        }
        if !near_zero(self.scale_velocity.length()) {
            body.set_scale(body.scale() + self.scale_velocity * dt);
        }
    }
}
