//! Physical unit conversion factors
//!
//! All state inside the engine is stored in SI units: angles in radians,
//! speeds in m/s and accelerations in m/s². These factors are meant for the
//! input/UI boundary only, e.g. `120.0 * KMH_TO_MS` for a top speed.

use std::f32::consts::PI;

// Angles
pub const DEG_TO_RAD: f32 = PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / PI;
/// One full turn in radians
pub const FULL_TURN: f32 = 2.0 * PI;

// Velocity
pub const KMH_TO_MS: f32 = 1.0 / 3.6;
pub const MS_TO_KMH: f32 = 3.6;
pub const MPH_TO_MS: f32 = 0.44704;
pub const MS_TO_MPH: f32 = 1.0 / 0.44704;

// Acceleration
/// km/h per second to m/s²
pub const KMHS_TO_MSS: f32 = KMH_TO_MS;
/// m/s² to km/h per second
pub const MSS_TO_KMHS: f32 = MS_TO_KMH;
/// km/h per hour to m/s²
pub const KMHH_TO_MSS: f32 = KMH_TO_MS / 3600.0;
/// m/s² to km/h per hour
pub const MSS_TO_KMHH: f32 = MS_TO_KMH * 3600.0;
/// mph per second to m/s²
pub const MPHS_TO_MSS: f32 = MPH_TO_MS;
/// m/s² to mph per second
pub const MSS_TO_MPHS: f32 = MS_TO_MPH;
