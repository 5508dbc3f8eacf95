//! Discrete driving commands
//!
//! Whatever polls the keyboard (or plays back a script) reduces its input to
//! these; the car never sees raw keys.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A single held control
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveCommand {
    Accelerate,
    Brake,
    SteerLeft,
    SteerRight,
}

bitflags! {
    /// The set of controls held during one frame
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DriveCommands: u8 {
        const ACCELERATE = 1 << 0;
        const BRAKE = 1 << 1;
        const STEER_LEFT = 1 << 2;
        const STEER_RIGHT = 1 << 3;
    }
}

impl From<DriveCommand> for DriveCommands {
    fn from(command: DriveCommand) -> Self {
        match command {
            DriveCommand::Accelerate => DriveCommands::ACCELERATE,
            DriveCommand::Brake => DriveCommands::BRAKE,
            DriveCommand::SteerLeft => DriveCommands::STEER_LEFT,
            DriveCommand::SteerRight => DriveCommands::STEER_RIGHT,
        }
    }
}

impl FromIterator<DriveCommand> for DriveCommands {
    fn from_iter<I: IntoIterator<Item = DriveCommand>>(iter: I) -> Self {
        iter.into_iter()
            .fold(DriveCommands::empty(), |acc, command| acc | command.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_commands() {
        let held: DriveCommands = [DriveCommand::Accelerate, DriveCommand::SteerLeft].into_iter().collect();
        assert!(held.contains(DriveCommands::ACCELERATE));
        assert!(held.contains(DriveCommands::STEER_LEFT));
        assert!(!held.contains(DriveCommands::BRAKE));
    }

    #[test]
    fn test_empty_by_default() {
        assert!(DriveCommands::default().is_empty());
        let none: DriveCommands = std::iter::empty::<DriveCommand>().collect();
        assert!(none.is_empty());
    }
}
