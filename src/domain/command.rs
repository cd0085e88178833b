//! Queued motion commands.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Action;

/// Opaque command token. Fresh ids are UUIDs; ids read from storage are kept verbatim.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommandId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Command {
    id: CommandId,
    action: Action,
    #[serde(default)]
    distance: Option<f64>,
}

impl Command {
    pub fn new(action: Action) -> Self {
        Self::with_id(CommandId::generate(), action)
    }

    pub fn with_id(id: CommandId, action: Action) -> Self {
        Self {
            id,
            action,
            distance: None,
        }
    }

    /// Reserved; no action currently reads it.
    pub fn with_distance(self, distance: f64) -> Self {
        Self {
            distance: Some(distance),
            ..self
        }
    }

    pub fn id(&self) -> &CommandId {
        &self.id
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }
}

/// FIFO of pending commands. Only appending and clearing mutate it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.commands.iter().map(|c| c.action())
    }
}

impl FromIterator<Command> for CommandQueue {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}
