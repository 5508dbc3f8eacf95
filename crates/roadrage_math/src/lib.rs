//! 3D Mathematics Library
//!
//! This crate provides the vector, rotation and transform types for RoadRage.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D point or direction
//! - [`Quaternion`] - 3D rotation, with [`AxisAngle`] conversion
//! - [`AffineTransform`] - rotation/scale/translation that carries its own inverse
//! - [`ProjectiveTransform`] - general 4x4 transform, adds perspective
//!
//! ## Support
//!
//! - [`mat4`] - raw column-major matrix helpers
//! - [`units`] - conversion factors between user units and SI
//! - [`ByteCodec`] - little-endian binary encoding

mod affine;
mod codec;
mod error;
pub mod mat4;
mod projective;
mod quaternion;
mod scalar;
pub mod units;
mod vec3;

pub use affine::AffineTransform;
pub use codec::ByteCodec;
pub use error::{CodecError, MathError};
pub use projective::{ProjectiveTransform, DEFAULT_FAR, DEFAULT_NEAR, FALLBACK_FOV};
pub use quaternion::{AxisAngle, Quaternion};
pub use scalar::{clamp, near_zero, near_zero_eps, EPSILON};
pub use vec3::Vec3;
