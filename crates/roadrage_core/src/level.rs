//! Level files
//!
//! A level is a RON file describing where the camera starts, where the
//! player's car spawns, the civilians walking around and, optionally, a
//! scripted input sequence for headless runs. [`LevelTemplate::build`] turns
//! it into a populated [`World`].

use std::fs;
use std::io;
use std::path::Path;

use roadrage_input::InputScript;
use roadrage_math::units::DEG_TO_RAD;
use roadrage_math::{Quaternion, Vec3};
use roadrage_physics::{Car, Kinematics};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, MeshKind};
use crate::{Transform, World};

/// Name given to the player's car entity
pub const AVATAR_NAME: &str = "avatar";

/// Scale of a civilian model
pub const CIVILIAN_SCALE: Vec3 = Vec3::new(0.1, 0.5, 1.0);

/// Camera placement at level start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTemplate {
    pub position: Vec3,
    /// Look rotation
    pub look: Quaternion,
    /// Point the orbit rotation turns around
    pub orbit_center: Vec3,
    /// Orbit spin around Y, degrees per second
    pub orbit_speed_deg: f32,
}

impl Default for CameraTemplate {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.5, 1.5, 5.0),
            look: Quaternion::IDENTITY,
            orbit_center: Vec3::ZERO,
            orbit_speed_deg: 5.0,
        }
    }
}

/// Spawn point of the player's car
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarTemplate {
    pub position: Vec3,
    pub yaw_deg: f32,
}

/// A pedestrian moving at constant velocity and turn rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivilianTemplate {
    pub position: Vec3,
    #[serde(default)]
    pub velocity: Vec3,
    #[serde(default)]
    pub yaw_deg: f32,
    #[serde(default)]
    pub yaw_rate_deg: f32,
    #[serde(default = "default_civilian_scale")]
    pub scale: Vec3,
}

fn default_civilian_scale() -> Vec3 {
    CIVILIAN_SCALE
}

fn default_true() -> bool {
    true
}

impl CivilianTemplate {
    pub fn new(position: Vec3, velocity: Vec3, yaw_deg: f32, yaw_rate_deg: f32) -> Self {
        Self {
            position,
            velocity,
            yaw_deg,
            yaw_rate_deg,
            scale: CIVILIAN_SCALE,
        }
    }

    /// Build the entity for this civilian
    pub fn to_entity(&self) -> Entity {
        let transform = Transform::new(self.position, self.yaw_deg * DEG_TO_RAD, self.scale);
        let kinematics = Kinematics::new()
            .with_velocity(self.velocity)
            .with_angular_velocity(self.yaw_rate_deg * DEG_TO_RAD);
        Entity::new(MeshKind::Civilian, transform).with_kinematics(kinematics)
    }
}

/// A serializable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTemplate {
    /// Level name (for display/debugging)
    pub name: String,
    #[serde(default)]
    pub camera: CameraTemplate,
    #[serde(default)]
    pub avatar: AvatarTemplate,
    #[serde(default)]
    pub civilians: Vec<CivilianTemplate>,
    /// Whether to place the coordinate axes gizmo at the origin
    #[serde(default = "default_true")]
    pub show_axes: bool,
    /// Input played back when nobody is at the wheel
    #[serde(default)]
    pub script: InputScript,
}

impl LevelTemplate {
    /// Create a new empty level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            camera: CameraTemplate::default(),
            avatar: AvatarTemplate::default(),
            civilians: Vec::new(),
            show_axes: true,
            script: InputScript::default(),
        }
    }

    /// Load a level from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a level from RON text
    pub fn parse(contents: &str) -> Result<Self, LevelError> {
        Ok(ron::from_str(contents)?)
    }

    /// Save a level to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LevelError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a civilian to this level
    pub fn with_civilian(mut self, civilian: CivilianTemplate) -> Self {
        self.civilians.push(civilian);
        self
    }

    /// Populate a world: the axes gizmo, the player's `car` and every civilian
    ///
    /// The car entity is named [`AVATAR_NAME`] and marked as the avatar.
    pub fn build(&self, car: Car) -> World {
        let mut world = World::with_capacity(self.civilians.len() + 2);

        if self.show_axes {
            world.add_entity(Entity::new(MeshKind::Axes, Transform::identity()).with_name("axes"));
        }

        let spawn = Transform::new(self.avatar.position, self.avatar.yaw_deg * DEG_TO_RAD, Vec3::ONE);
        let avatar = world.add_entity(Entity::new(MeshKind::Car, spawn).with_name(AVATAR_NAME).with_car(car));
        world.set_avatar(avatar);

        for civilian in &self.civilians {
            world.add_entity(civilian.to_entity());
        }

        log::info!(
            "Level '{}' built: {} civilians, {} entities total",
            self.name,
            self.civilians.len(),
            world.entity_count()
        );
        world
    }
}

/// Error loading or saving a level
#[derive(Debug)]
pub enum LevelError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for LevelError {
    fn from(e: io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::Parse(e)
    }
}

impl From<ron::Error> for LevelError {
    fn from(e: ron::Error) -> Self {
        LevelError::Serialize(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::Io(e) => write!(f, "IO error: {}", e),
            LevelError::Parse(e) => write!(f, "Parse error: {}", e),
            LevelError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(e) => Some(e),
            LevelError::Parse(e) => Some(e),
            LevelError::Serialize(e) => Some(e),
        }
    }
}
