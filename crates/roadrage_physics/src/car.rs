//! Vehicle dynamics driven by a small state machine
//!
//! A [`Car`] adds steering and a scalar forward speed on top of the generic
//! [`Kinematics`] of its body. Which acceleration policy applies each frame
//! is decided by its [`CarState`], selected from outside by a driver (player
//! input or AI). The only transition the car takes on its own is coming to
//! rest: `Rolling` turns into `Standing` once the speed drops under a
//! threshold.
//!
//! Internally everything is SI (radians, m/s, m/s²). [`CarLimits`] and
//! [`CarTuning`] defaults are written in the units a driver thinks in and
//! converted with the factors from [`roadrage_math::units`].

use std::fmt;

use roadrage_math::units::{DEG_TO_RAD, FULL_TURN, KMHS_TO_MSS, KMH_TO_MS, MSS_TO_KMHS, MS_TO_KMH, RAD_TO_DEG};
use roadrage_math::{clamp, near_zero, near_zero_eps, Quaternion, Vec3, EPSILON};
use serde::{Deserialize, Serialize};

use crate::kinematics::Kinematics;
use crate::spatial::Spatial;
use crate::state_machine::{StateHooks, StateMachine};

/// Driving states of a car
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarState {
    /// At rest, speed and acceleration exactly zero
    Standing,
    /// Coasting, slowed down by friction proportional to speed
    Rolling,
    /// Throttle held, acceleration keeps building up
    Driving,
    /// Constant strong deceleration
    Braking,
    /// Wrecked; never left once entered
    Destroyed,
}

impl fmt::Display for CarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CarState::Standing => "standing",
            CarState::Rolling => "rolling",
            CarState::Driving => "driving",
            CarState::Braking => "braking",
            CarState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// Hard physical limits of a car, SI units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarLimits {
    /// Largest steering deflection either way (radians)
    pub max_steering_angle: f32,
    /// Fastest the steering may turn either way (rad/s)
    pub max_steering_vel: f32,
    pub max_speed: f32,
    pub min_speed: f32,
    pub max_accel: f32,
    pub min_accel: f32,
}

impl CarLimits {
    /// Non-negative steering maxima and ordered min/max pairs
    pub fn normalized(self) -> Self {
        Self {
            max_steering_angle: (self.max_steering_angle % FULL_TURN).abs(),
            max_steering_vel: self.max_steering_vel.abs(),
            max_speed: self.max_speed.max(self.min_speed),
            min_speed: self.min_speed.min(self.max_speed),
            max_accel: self.max_accel.max(self.min_accel),
            min_accel: self.min_accel.min(self.max_accel),
        }
    }
}

impl Default for CarLimits {
    fn default() -> Self {
        Self {
            max_steering_angle: 45.0 * DEG_TO_RAD,
            max_steering_vel: 360.0 * DEG_TO_RAD,
            max_speed: 120.0 * KMH_TO_MS,
            min_speed: 0.0,
            max_accel: 20.0 * KMHS_TO_MSS,
            min_accel: -50.0 * KMHS_TO_MSS,
        }
    }
}

/// Per-state acceleration policy and dead zones, SI units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarTuning {
    /// Growth of the acceleration while `Driving` (m/s² per second)
    pub drive_accel_rate: f32,
    /// Acceleration applied while `Braking` (m/s², negative)
    pub brake_accel: f32,
    /// Friction factor while `Rolling`: accel = -speed * friction (1/s)
    pub rolling_friction: f32,
    /// Speed under which a rolling car stands still (m/s)
    pub standing_speed: f32,
    /// Steering angles within this of zero snap to zero when the wheel is not moving (radians)
    pub steering_angle_dead_zone: f32,
    /// Steering velocities within this of zero snap to zero (rad/s)
    pub steering_vel_dead_zone: f32,
    /// Accelerations within this of zero snap to zero (m/s²)
    pub accel_dead_zone: f32,
}

impl Default for CarTuning {
    fn default() -> Self {
        Self {
            drive_accel_rate: 5.0 * KMHS_TO_MSS,
            brake_accel: -50.0 * KMHS_TO_MSS,
            rolling_friction: 1.0,
            standing_speed: 1.0 * KMH_TO_MS,
            steering_angle_dead_zone: 1.0 * DEG_TO_RAD,
            steering_vel_dead_zone: 0.1 * DEG_TO_RAD,
            accel_dead_zone: EPSILON,
        }
    }
}

/// The scalar driving quantities, kept inside their limits
///
/// Split from [`Car`] so it can serve as the state machine's hooks while the
/// machine itself is borrowed.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Drive {
    steering_angle: f32,
    steering_vel: f32,
    speed: f32,
    accel: f32,
    limits: CarLimits,
    tuning: CarTuning,
}

impl Drive {
    fn set_steering_angle(&mut self, v: f32) {
        let mut v = v % FULL_TURN;
        if near_zero_eps(v, self.tuning.steering_angle_dead_zone) && near_zero(self.steering_vel) {
            v = 0.0;
        }
        let max = self.limits.max_steering_angle;
        self.steering_angle = clamp(v, -max, max);
    }

    fn set_steering_vel(&mut self, v: f32) {
        let v = if near_zero_eps(v, self.tuning.steering_vel_dead_zone) { 0.0 } else { v };
        let max = self.limits.max_steering_vel;
        self.steering_vel = clamp(v, -max, max);
    }

    fn set_speed(&mut self, v: f32) {
        let v = if near_zero(v) { 0.0 } else { v };
        self.speed = clamp(v, self.limits.min_speed, self.limits.max_speed);
    }

    fn set_accel(&mut self, v: f32) {
        let v = if near_zero_eps(v, self.tuning.accel_dead_zone) { 0.0 } else { v };
        self.accel = clamp(v, self.limits.min_accel, self.limits.max_accel);
    }

    /// Re-run every setter so the values respect freshly changed limits
    fn reapply(&mut self) {
        self.set_steering_vel(self.steering_vel);
        self.set_steering_angle(self.steering_angle);
        self.set_speed(self.speed);
        self.set_accel(self.accel);
    }
}

impl StateHooks<CarState> for Drive {
    fn on_leave(&mut self, current: CarState) -> bool {
        current != CarState::Destroyed
    }

    fn on_enter(&mut self, next: CarState) -> bool {
        if next == CarState::Standing {
            // Bypasses the setters: a standing car is at exact rest even if
            // the limits would keep it moving.
            self.speed = 0.0;
            self.accel = 0.0;
        }
        true
    }
}

/// A vehicle: steering, speed and acceleration under a [`CarState`]
#[derive(Clone, Debug, PartialEq)]
pub struct Car {
    machine: StateMachine<CarState>,
    drive: Drive,
}

impl Default for Car {
    fn default() -> Self {
        Self::new(CarLimits::default(), CarTuning::default())
    }
}

impl Car {
    /// A standing car with straight wheels
    pub fn new(limits: CarLimits, tuning: CarTuning) -> Self {
        Self {
            machine: StateMachine::new(CarState::Standing),
            drive: Drive {
                steering_angle: 0.0,
                steering_vel: 0.0,
                speed: 0.0,
                accel: 0.0,
                limits: limits.normalized(),
                tuning,
            },
        }
    }

    #[inline]
    pub fn state(&self) -> CarState {
        self.machine.state()
    }

    /// Request a new state, returning the one held before
    ///
    /// Any state may follow any other, with one exception: a destroyed car
    /// stays destroyed. Entering `Standing` zeroes speed and acceleration.
    pub fn set_state(&mut self, next: CarState) -> CarState {
        let previous = self.machine.transition(next, &mut self.drive);
        let current = self.machine.state();
        if current != previous {
            log::debug!("Car state {} -> {}", previous, current);
        } else if current != next {
            log::debug!("Car state {} refused transition to {}", current, next);
        }
        previous
    }

    /// Steering deflection in radians, positive to the left
    #[inline]
    pub fn steering_angle(&self) -> f32 {
        self.drive.steering_angle
    }

    /// Set the steering deflection
    ///
    /// The angle is first brought into (-360°, 360°), snapped to zero when it
    /// is within the dead zone while the wheel is not turning, then clamped.
    pub fn set_steering_angle(&mut self, radians: f32) -> &mut Self {
        self.drive.set_steering_angle(radians);
        self
    }

    /// Steering rate in rad/s
    #[inline]
    pub fn steering_vel(&self) -> f32 {
        self.drive.steering_vel
    }

    /// Set the steering rate; tiny rates snap to zero before clamping
    pub fn set_steering_vel(&mut self, rad_per_s: f32) -> &mut Self {
        self.drive.set_steering_vel(rad_per_s);
        self
    }

    /// Forward speed in m/s
    #[inline]
    pub fn speed(&self) -> f32 {
        self.drive.speed
    }

    pub fn set_speed(&mut self, m_per_s: f32) -> &mut Self {
        self.drive.set_speed(m_per_s);
        self
    }

    /// Forward acceleration in m/s²
    #[inline]
    pub fn accel(&self) -> f32 {
        self.drive.accel
    }

    pub fn set_accel(&mut self, m_per_s2: f32) -> &mut Self {
        self.drive.set_accel(m_per_s2);
        self
    }

    #[inline]
    pub fn limits(&self) -> &CarLimits {
        &self.drive.limits
    }

    /// Replace all limits at once; current values are clamped into them
    ///
    /// Steering maxima are taken by magnitude and each min/max pair is put
    /// in order, so `clamp` always sees `lo <= hi`.
    pub fn set_limits(&mut self, limits: CarLimits) -> &mut Self {
        self.drive.limits = limits.normalized();
        self.drive.reapply();
        self
    }

    pub fn set_max_steering_angle(&mut self, radians: f32) -> &mut Self {
        let limits = CarLimits {
            max_steering_angle: radians,
            ..self.drive.limits
        };
        self.set_limits(limits)
    }

    pub fn set_max_steering_vel(&mut self, rad_per_s: f32) -> &mut Self {
        let limits = CarLimits {
            max_steering_vel: rad_per_s,
            ..self.drive.limits
        };
        self.set_limits(limits)
    }

    pub fn set_speed_range(&mut self, min: f32, max: f32) -> &mut Self {
        let limits = CarLimits {
            min_speed: min,
            max_speed: max,
            ..self.drive.limits
        };
        self.set_limits(limits)
    }

    pub fn set_accel_range(&mut self, min: f32, max: f32) -> &mut Self {
        let limits = CarLimits {
            min_accel: min,
            max_accel: max,
            ..self.drive.limits
        };
        self.set_limits(limits)
    }

    #[inline]
    pub fn tuning(&self) -> &CarTuning {
        &self.drive.tuning
    }

    pub fn set_tuning(&mut self, tuning: CarTuning) -> &mut Self {
        self.drive.tuning = tuning;
        self.drive.reapply();
        self
    }

    /// Velocity produced by driving alone: forward (-Z) at the current
    /// speed, turned by the steering angle
    pub fn driving_velocity(&self) -> Vec3 {
        let forward = Vec3::new(0.0, 0.0, -1.0) * self.drive.speed;
        Quaternion::rotation(Vec3::Y, self.drive.steering_angle).rotate(forward)
    }

    /// Advance the car by `dt` seconds
    ///
    /// Applies the acceleration policy of the current state, integrates speed
    /// and steering, lets `kinematics` move the body for everything that is
    /// not driving, adds the driving displacement on top and turns the body
    /// with the steering wheel unless it is locked at full deflection.
    /// Finally a rolling car that got slow enough comes to a stand.
    pub fn think<S: Spatial + ?Sized>(&mut self, body: &mut S, kinematics: &mut Kinematics, dt: f32) {
        let tuning = self.drive.tuning;
        match self.state() {
            CarState::Driving => self.drive.set_accel(self.drive.accel + tuning.drive_accel_rate * dt),
            CarState::Braking => self.drive.set_accel(tuning.brake_accel),
            CarState::Rolling => self.drive.set_accel(-self.drive.speed * tuning.rolling_friction),
            CarState::Standing | CarState::Destroyed => {}
        }

        self.drive.set_speed(self.drive.speed + self.drive.accel * dt);
        self.drive
            .set_steering_angle(self.drive.steering_angle + self.drive.steering_vel * dt);

        let driving_vel = self.driving_velocity();

        kinematics.integrate(body, dt);

        if self.drive.speed != 0.0 {
            body.set_pos(body.pos() + driving_vel * dt);
        }

        // The whole body turns with the wheel; there are no separate front wheels
        if self.drive.steering_vel != 0.0 && self.drive.steering_angle.abs() < self.drive.limits.max_steering_angle {
            body.set_ori(body.ori() + self.drive.steering_vel * dt);
        }

        if self.state() == CarState::Rolling && self.drive.speed < tuning.standing_speed {
            self.set_state(CarState::Standing);
        }
    }

    /// Snapshot of the driving quantities in display units
    pub fn status(&self) -> CarStatus {
        CarStatus {
            state: self.state(),
            steering_deg: self.drive.steering_angle * RAD_TO_DEG,
            accel_mss: self.drive.accel,
            accel_kmhs: self.drive.accel * MSS_TO_KMHS,
            speed_ms: self.drive.speed,
            speed_kmh: self.drive.speed * MS_TO_KMH,
        }
    }
}

/// Human-readable car readout, for the periodic status log
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarStatus {
    pub state: CarState,
    pub steering_deg: f32,
    pub accel_mss: f32,
    pub accel_kmhs: f32,
    pub speed_ms: f32,
    pub speed_kmh: f32,
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: steering {:.1}°, accel {:.2} m/s² ({:.1} km/h/s), speed {:.2} m/s ({:.1} km/h)",
            self.state, self.steering_deg, self.accel_mss, self.accel_kmhs, self.speed_ms, self.speed_kmh
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::tests::Body;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn step(car: &mut Car, body: &mut Body, kin: &mut Kinematics, dt: f32) {
        car.think(body, kin, dt);
    }

    #[test]
    fn test_defaults() {
        let car = Car::default();
        assert_eq!(car.state(), CarState::Standing);
        assert_eq!(car.speed(), 0.0);
        assert!(approx_eq(car.limits().max_speed, 120.0 / 3.6));
        assert!(approx_eq(car.limits().max_steering_angle, 45.0f32.to_radians()));
    }

    #[test]
    fn test_driving_accumulates_clamped_accel() {
        // 5 km/h/s more every second, capped at 20 km/h/s
        let mut car = Car::default();
        let mut body = Body::default();
        let mut kin = Kinematics::new();
        car.set_state(CarState::Driving);

        for _ in 0..5 {
            step(&mut car, &mut body, &mut kin, 1.0);
        }

        let expected = (5.0 + 10.0 + 15.0 + 20.0 + 20.0) * KMH_TO_MS;
        assert!(approx_eq(car.speed(), expected), "speed {} != {}", car.speed(), expected);
        assert!(approx_eq(car.accel(), car.limits().max_accel));
        assert_eq!(car.state(), CarState::Driving);
    }

    #[test]
    fn test_driving_saturates_at_max_speed() {
        let mut car = Car::default();
        let mut body = Body::default();
        let mut kin = Kinematics::new();
        car.set_state(CarState::Driving);

        for _ in 0..30 {
            step(&mut car, &mut body, &mut kin, 1.0);
        }
        assert_eq!(car.speed(), car.limits().max_speed);
    }

    #[test]
    fn test_rolling_comes_to_a_stand() {
        let mut car = Car::default();
        let mut body = Body::default();
        let mut kin = Kinematics::new();
        car.set_speed(10.0);
        car.set_state(CarState::Rolling);

        let mut last_speed = car.speed();
        let mut steps = 0;
        while car.state() == CarState::Rolling {
            step(&mut car, &mut body, &mut kin, 0.1);
            steps += 1;
            assert!(car.speed() < last_speed || car.state() == CarState::Standing);
            if car.state() == CarState::Rolling {
                assert!(car.speed() >= 1.0 * KMH_TO_MS);
            }
            last_speed = car.speed();
            assert!(steps < 1000, "car never stopped");
        }

        assert_eq!(car.state(), CarState::Standing);
        assert_eq!(car.speed(), 0.0);
        assert_eq!(car.accel(), 0.0);
    }

    #[test]
    fn test_braking_is_constant() {
        let mut car = Car::default();
        let mut body = Body::default();
        let mut kin = Kinematics::new();
        car.set_speed(20.0);
        car.set_state(CarState::Braking);
        step(&mut car, &mut body, &mut kin, 0.5);
        assert!(approx_eq(car.accel(), -50.0 * KMHS_TO_MSS));
        assert!(approx_eq(car.speed(), 20.0 - 0.5 * 50.0 * KMHS_TO_MSS));

        // Braking never pushes speed below the minimum
        for _ in 0..100 {
            step(&mut car, &mut body, &mut kin, 0.5);
        }
        assert_eq!(car.speed(), 0.0);
    }

    #[test]
    fn test_steering_vel_dead_zone() {
        let mut car = Car::default();
        car.set_steering_vel(0.05 * DEG_TO_RAD);
        assert_eq!(car.steering_vel(), 0.0);
        car.set_steering_vel(-0.05 * DEG_TO_RAD);
        assert_eq!(car.steering_vel(), 0.0);
        car.set_steering_vel(10.0 * DEG_TO_RAD);
        assert!(approx_eq(car.steering_vel(), 10.0 * DEG_TO_RAD));
        car.set_steering_vel(1000.0 * DEG_TO_RAD);
        assert!(approx_eq(car.steering_vel(), 360.0 * DEG_TO_RAD));
    }

    #[test]
    fn test_steering_angle_snap_needs_still_wheel() {
        let mut car = Car::default();
        car.set_steering_angle(0.5 * DEG_TO_RAD);
        assert_eq!(car.steering_angle(), 0.0);

        car.set_steering_vel(10.0 * DEG_TO_RAD);
        car.set_steering_angle(0.5 * DEG_TO_RAD);
        assert!(approx_eq(car.steering_angle(), 0.5 * DEG_TO_RAD));
    }

    #[test]
    fn test_steering_angle_normalized_then_clamped() {
        let mut car = Car::default();
        car.set_steering_angle(370.0 * DEG_TO_RAD);
        assert!(approx_eq(car.steering_angle(), 10.0 * DEG_TO_RAD));
        car.set_steering_angle(-400.0 * DEG_TO_RAD);
        assert!(approx_eq(car.steering_angle(), -40.0 * DEG_TO_RAD));
        car.set_steering_angle(90.0 * DEG_TO_RAD);
        assert!(approx_eq(car.steering_angle(), 45.0 * DEG_TO_RAD));
    }

    #[test]
    fn test_shrinking_limits_reclamps() {
        let mut car = Car::default();
        car.set_speed(30.0);
        car.set_speed_range(0.0, 10.0);
        assert_eq!(car.speed(), 10.0);
        car.set_steering_angle(40.0 * DEG_TO_RAD);
        car.set_max_steering_angle(20.0 * DEG_TO_RAD);
        assert!(approx_eq(car.steering_angle(), 20.0 * DEG_TO_RAD));
    }

    #[test]
    fn test_negative_max_steering_uses_magnitude() {
        let mut car = Car::default();
        car.set_max_steering_angle(-30.0 * DEG_TO_RAD);
        assert!(approx_eq(car.limits().max_steering_angle, 30.0 * DEG_TO_RAD));

        // A straight wheel stays straight instead of jumping to full lock
        car.set_steering_angle(0.0);
        assert_eq!(car.steering_angle(), 0.0);
        car.set_steering_angle(-50.0 * DEG_TO_RAD);
        assert!(approx_eq(car.steering_angle(), -30.0 * DEG_TO_RAD));
    }

    #[test]
    fn test_swapped_ranges_are_ordered() {
        let mut car = Car::default();
        car.set_speed_range(30.0, 10.0);
        assert_eq!(car.limits().min_speed, 10.0);
        assert_eq!(car.limits().max_speed, 30.0);
        car.set_speed(20.0);
        assert_eq!(car.speed(), 20.0);

        car.set_accel_range(4.0, -4.0);
        car.set_accel(1.0);
        assert_eq!(car.accel(), 1.0);
        car.set_accel(-9.0);
        assert_eq!(car.accel(), -4.0);
    }

    #[test]
    fn test_new_orders_limits() {
        let limits = CarLimits {
            max_steering_vel: -2.0,
            min_accel: 3.0,
            max_accel: -3.0,
            ..CarLimits::default()
        };
        let car = Car::new(limits, CarTuning::default());
        assert_eq!(car.limits().max_steering_vel, 2.0);
        assert_eq!(car.limits().min_accel, -3.0);
        assert_eq!(car.limits().max_accel, 3.0);
    }

    #[test]
    fn test_standing_forces_exact_zero() {
        let mut car = Car::default();
        car.set_speed_range(5.0, 30.0);
        car.set_speed(12.0).set_accel(1.0);
        car.set_state(CarState::Standing);
        assert_eq!(car.speed(), 0.0);
        assert_eq!(car.accel(), 0.0);
    }

    #[test]
    fn test_set_state_returns_previous() {
        let mut car = Car::default();
        assert_eq!(car.set_state(CarState::Driving), CarState::Standing);
        assert_eq!(car.set_state(CarState::Braking), CarState::Driving);
        assert_eq!(car.state(), CarState::Braking);
    }

    #[test]
    fn test_destroyed_is_absorbing() {
        let mut car = Car::default();
        car.set_state(CarState::Destroyed);
        assert_eq!(car.set_state(CarState::Driving), CarState::Destroyed);
        assert_eq!(car.state(), CarState::Destroyed);
    }

    #[test]
    fn test_drives_forward_along_minus_z() {
        let mut car = Car::default();
        let mut body = Body::default();
        let mut kin = Kinematics::new();
        car.set_speed(10.0);
        step(&mut car, &mut body, &mut kin, 0.5);
        assert!(approx_eq(body.pos.z, -5.0));
        assert!(approx_eq(body.pos.x, 0.0));
    }

    #[test]
    fn test_steering_turns_velocity_and_body() {
        let mut car = Car::default();
        let mut body = Body::default();
        let mut kin = Kinematics::new();
        car.set_speed(10.0);
        car.set_steering_vel(10.0 * DEG_TO_RAD);
        step(&mut car, &mut body, &mut kin, 1.0);

        assert!(approx_eq(car.steering_angle(), 10.0 * DEG_TO_RAD));
        assert!(approx_eq(body.ori, 10.0 * DEG_TO_RAD));
        // Positive steering turns -Z towards -X
        assert!(body.pos.x < 0.0);
    }

    #[test]
    fn test_locked_steering_stops_turning_body() {
        let mut car = Car::default();
        let mut body = Body::default();
        let mut kin = Kinematics::new();
        car.set_steering_vel(90.0 * DEG_TO_RAD);
        step(&mut car, &mut body, &mut kin, 1.0);
        assert!(approx_eq(car.steering_angle(), 45.0 * DEG_TO_RAD));
        assert_eq!(body.ori, 0.0);
    }

    #[test]
    fn test_standing_car_at_rest_does_not_move() {
        let mut car = Car::default();
        let mut body = Body {
            pos: Vec3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };
        let mut kin = Kinematics::new();
        step(&mut car, &mut body, &mut kin, 0.016);
        assert_eq!(body.writes, 0);
    }

    #[test]
    fn test_status_in_display_units() {
        let mut car = Car::default();
        car.set_speed(10.0);
        let status = car.status();
        assert!(approx_eq(status.speed_kmh, 36.0));
        assert!(format!("{}", status).starts_with("standing"));
    }
}
