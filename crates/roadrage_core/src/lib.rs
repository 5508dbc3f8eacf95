//! Core types for RoadRage
//!
//! This crate provides the building blocks of a level:
//!
//! - [`Clock`] - Wall or fixed-step time source
//! - [`Transform`] - Position, yaw and scale with a cached model matrix
//! - [`Entity`] - An object in the world, composed of optional capabilities
//! - [`Thinkable`] - Anything advanced once per frame
//! - [`World`] - Container for all entities
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`LevelTemplate`] - Loadable/saveable level description

mod clock;
mod entity;
mod level;
mod transform;
mod world;

pub use clock::{Clock, INITIAL_TIME};
pub use entity::{Entity, MeshKind, Thinkable};
pub use level::{AvatarTemplate, CameraTemplate, CivilianTemplate, LevelError, LevelTemplate, AVATAR_NAME, CIVILIAN_SCALE};
pub use transform::Transform;
pub use world::{EntityKey, World};

// Re-export commonly used types for convenience
pub use roadrage_math::{AffineTransform, ProjectiveTransform, Quaternion, Vec3};
pub use roadrage_physics::{Car, CarLimits, CarState, CarTuning, Kinematics, Spatial};
