//! Entity motion for RoadRage
//!
//! This crate provides the time integration of moving things:
//! - [`Kinematics`]: free motion of position, yaw and scale
//! - [`Car`]: vehicle dynamics on top of it, driven by a [`CarState`]
//! - [`StateMachine`]: the small generic state machine the car is built on
//!
//! Bodies are reached through the [`Spatial`] trait, so this crate does not
//! care how placement is stored or what gets cached from it.

pub mod car;
pub mod kinematics;
pub mod spatial;
pub mod state_machine;

// Re-export commonly used types
pub use car::{Car, CarLimits, CarState, CarStatus, CarTuning};
pub use kinematics::Kinematics;
pub use spatial::Spatial;
pub use state_machine::{StateHooks, StateMachine};
