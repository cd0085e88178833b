//! Robot pose and the discrete motion integrator.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Angle, HasCollision, Position};

/// Step sizes of a single discrete command.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct MotionConfig {
    pub move_step: f64,
    pub turn_step: f64,
}

impl MotionConfig {
    pub const fn new(move_step: f64, turn_step: f64) -> Self {
        Self {
            move_step,
            turn_step,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new(5.0, 15.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::Stop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Forward => "forward",
            Action::Backward => "backward",
            Action::Left => "left",
            Action::Right => "right",
            Action::Stop => "stop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| CommandError::UnknownAction(s.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown action {0:?}")]
    UnknownAction(String),
}

/// Result of applying an action to a pose.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Motion {
    Moved(Pose),
    Turned(Pose),
    /// The translation would end inside an obstacle; the pose is unchanged.
    Blocked,
    Idle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Pose {
    position: Position,
    heading: Angle,
}

impl Pose {
    pub fn new(position: Position, heading: Angle) -> Self {
        Self { position, heading }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Angle {
        self.heading
    }

    /// Applies one discrete command. Translations are checked at their end point and rejected
    /// in full when blocked; rotations are never blocked.
    pub fn apply(
        &self,
        action: Action,
        obstacles: &(impl HasCollision + ?Sized),
        config: &MotionConfig,
    ) -> Motion {
        match action {
            Action::Forward | Action::Backward => {
                let distance = if action == Action::Forward {
                    config.move_step
                } else {
                    -config.move_step
                };
                let candidate = self.position.translated(self.heading, distance);
                if obstacles.is_blocked(candidate) {
                    Motion::Blocked
                } else {
                    Motion::Moved(Pose::new(candidate, self.heading))
                }
            }
            Action::Left => Motion::Turned(Pose::new(
                self.position,
                self.heading - Angle::from_deg(config.turn_step),
            )),
            Action::Right => Motion::Turned(Pose::new(
                self.position,
                self.heading + Angle::from_deg(config.turn_step),
            )),
            Action::Stop => Motion::Idle,
        }
    }

    /// Pose after `action`, which is `self` when the action does not change it.
    pub fn applied(
        &self,
        action: Action,
        obstacles: &(impl HasCollision + ?Sized),
        config: &MotionConfig,
    ) -> Pose {
        match self.apply(action, obstacles, config) {
            Motion::Moved(pose) | Motion::Turned(pose) => pose,
            Motion::Blocked | Motion::Idle => *self,
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} heading {}", self.position, self.heading)
    }
}
