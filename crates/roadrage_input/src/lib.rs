//! Driver input for RoadRage
//!
//! Input arrives as discrete [`DriveCommand`]s, live from a keyboard poller
//! or played back from an [`InputScript`], and is applied to a car by the
//! [`DriverController`].

pub mod commands;
pub mod driver;
pub mod script;

pub use commands::{DriveCommand, DriveCommands};
pub use driver::{DriverController, DriverSettings};
pub use script::{InputScript, ScriptStep};
