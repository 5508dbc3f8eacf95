//! Timed playback of driving commands, for headless runs
//!
//! A script is a list of steps, each naming the commands held from its start
//! time until the next step begins. Before the first step nothing is held.

use serde::{Deserialize, Serialize};

use crate::commands::{DriveCommand, DriveCommands};

/// Commands held from `at` seconds on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at: f32,
    #[serde(default)]
    pub commands: Vec<DriveCommand>,
}

impl ScriptStep {
    pub fn new(at: f32, commands: impl IntoIterator<Item = DriveCommand>) -> Self {
        Self {
            at,
            commands: commands.into_iter().collect(),
        }
    }
}

/// A sequence of [`ScriptStep`]s ordered by start time
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ScriptStep>", into = "Vec<ScriptStep>")]
pub struct InputScript {
    steps: Vec<ScriptStep>,
}

impl From<Vec<ScriptStep>> for InputScript {
    fn from(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { steps }
    }
}

impl From<InputScript> for Vec<ScriptStep> {
    fn from(script: InputScript) -> Self {
        script.steps
    }
}

impl InputScript {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        steps.into()
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Start time of the last step, if any
    pub fn duration(&self) -> Option<f32> {
        self.steps.last().map(|step| step.at)
    }

    /// Commands held at time `t`
    pub fn commands_at(&self, t: f32) -> DriveCommands {
        let started = self.steps.partition_point(|step| step.at <= t);
        match started.checked_sub(1) {
            Some(idx) => self.steps[idx].commands.iter().copied().collect(),
            None => DriveCommands::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> InputScript {
        InputScript::new(vec![
            ScriptStep::new(4.0, []),
            ScriptStep::new(1.0, [DriveCommand::Accelerate]),
            ScriptStep::new(2.5, [DriveCommand::Accelerate, DriveCommand::SteerLeft]),
        ])
    }

    #[test]
    fn test_steps_are_sorted() {
        let s = script();
        let times: Vec<f32> = s.steps().iter().map(|step| step.at).collect();
        assert_eq!(times, vec![1.0, 2.5, 4.0]);
        assert_eq!(s.duration(), Some(4.0));
    }

    #[test]
    fn test_commands_at() {
        let s = script();
        assert!(s.commands_at(0.0).is_empty());
        assert_eq!(s.commands_at(1.0), DriveCommands::ACCELERATE);
        assert_eq!(s.commands_at(2.0), DriveCommands::ACCELERATE);
        assert_eq!(
            s.commands_at(3.0),
            DriveCommands::ACCELERATE | DriveCommands::STEER_LEFT
        );
        assert!(s.commands_at(10.0).is_empty());
    }

    #[test]
    fn test_empty_script() {
        let s = InputScript::default();
        assert!(s.is_empty());
        assert!(s.commands_at(1.0).is_empty());
        assert_eq!(s.duration(), None);
    }

    #[test]
    fn test_parse_from_ron() {
        let s: InputScript = ron::from_str("[(at: 2.0, commands: [Brake]), (at: 0.5, commands: [Accelerate])]")
            .expect("valid script");
        assert_eq!(s.commands_at(1.0), DriveCommands::ACCELERATE);
        assert_eq!(s.commands_at(2.0), DriveCommands::BRAKE);
    }
}
