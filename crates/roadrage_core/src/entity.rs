//! Entities and the capabilities they are built from
//!
//! An entity always has a [`Transform`]. Motion is opt-in: [`Kinematics`]
//! make it drift, spin and grow on its own, and a [`Car`] adds steering and
//! driving on top. What gets drawn is named by a [`MeshKind`].

use roadrage_physics::{Car, Kinematics};
use serde::{Deserialize, Serialize};

use crate::Transform;

/// Anything advanced once per frame
pub trait Thinkable {
    /// Advance by `dt` seconds
    fn think(&mut self, dt: f32);
}

/// The model drawn for an entity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshKind {
    /// Nothing to draw
    #[default]
    None,
    /// The coordinate axes gizmo at the origin
    Axes,
    /// A car body
    Car,
    /// A pedestrian
    Civilian,
}

/// An object in the world
#[derive(Clone, Debug)]
pub struct Entity {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    pub transform: Transform,
    pub kinematics: Option<Kinematics>,
    pub car: Option<Car>,
    pub mesh: MeshKind,
}

impl Entity {
    /// A motionless entity
    pub fn new(mesh: MeshKind, transform: Transform) -> Self {
        Self {
            name: None,
            transform,
            kinematics: None,
            car: None,
            mesh,
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kinematics(mut self, kinematics: Kinematics) -> Self {
        self.kinematics = Some(kinematics);
        self
    }

    /// Make this entity drivable; it gets kinematics too if it had none
    pub fn with_car(mut self, car: Car) -> Self {
        self.kinematics.get_or_insert_with(Kinematics::default);
        self.car = Some(car);
        self
    }

    /// Whether this entity can move at all
    pub fn is_mobile(&self) -> bool {
        self.kinematics.is_some() || self.car.is_some()
    }
}

impl Thinkable for Entity {
    fn think(&mut self, dt: f32) {
        let Entity {
            transform,
            kinematics,
            car,
            ..
        } = self;

        match (car.as_mut(), kinematics.as_mut()) {
            (Some(car), Some(kinematics)) => car.think(transform, kinematics, dt),
            (Some(car), None) => car.think(transform, &mut Kinematics::default(), dt),
            (None, Some(kinematics)) => kinematics.integrate(transform, dt),
            (None, None) => {}
        }
    }
}
