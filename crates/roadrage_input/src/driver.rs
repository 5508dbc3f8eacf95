//! Maps held commands onto a car
//!
//! Steering: left or right turns the wheel at a fixed rate (left wins when
//! both are held); with neither held the wheel is pulled back to center at a
//! rate proportional to its deflection. Throttle: accelerate and brake
//! select `Driving` and `Braking` (accelerate wins); with neither held a
//! moving car coasts in `Rolling` and a stopped one stands.

use roadrage_math::units::DEG_TO_RAD;
use roadrage_physics::{Car, CarState};
use serde::{Deserialize, Serialize};

use crate::commands::DriveCommands;

/// How strongly the driver works the wheel, SI units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Steering rate while left or right is held (rad/s)
    pub steer_rate: f32,
    /// Centering gain with no steering held: vel = -angle * gain (1/s)
    pub recenter_gain: f32,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            steer_rate: 45.0 * DEG_TO_RAD,
            recenter_gain: 5.0,
        }
    }
}

/// Turns one frame of [`DriveCommands`] into steering and state changes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriverController {
    pub settings: DriverSettings,
}

impl DriverController {
    pub fn new(settings: DriverSettings) -> Self {
        Self { settings }
    }

    /// The state the car should be in for the given commands
    pub fn target_state(&self, commands: DriveCommands, car: &Car) -> CarState {
        if commands.contains(DriveCommands::ACCELERATE) {
            CarState::Driving
        } else if commands.contains(DriveCommands::BRAKE) {
            CarState::Braking
        } else if car.speed() > 0.0 {
            CarState::Rolling
        } else {
            CarState::Standing
        }
    }

    /// Apply the commands held this frame; call before the car thinks
    pub fn apply(&self, commands: DriveCommands, car: &mut Car) {
        if car.state() == CarState::Destroyed {
            return;
        }

        let steering_vel = if commands.contains(DriveCommands::STEER_LEFT) {
            self.settings.steer_rate
        } else if commands.contains(DriveCommands::STEER_RIGHT) {
            -self.settings.steer_rate
        } else {
            -car.steering_angle() * self.settings.recenter_gain
        };
        car.set_steering_vel(steering_vel);

        let target = self.target_state(commands, car);
        if target != car.state() {
            car.set_state(target);
        }
    }
}
