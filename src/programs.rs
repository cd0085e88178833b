//! Saved programs: a named command sequence together with the environment it was written for.
//!
//! Storage sits behind the `ProgramStore` port. Records are parsed into typed values with serde
//! at the boundary, so an unknown action label or a missing field rejects the whole record
//! before any `Command` is built from it.

mod library;
mod store;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::Command;

pub use library::ProgramLibrary;
pub use store::{JsonFileProgramStore, MemoryProgramStore};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProgram {
    pub name: String,
    pub commands: Vec<Command>,
    pub environment: String,
}

impl NewProgram {
    pub fn new(
        name: impl Into<String>,
        commands: Vec<Command>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            commands,
            environment: environment.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedProgram {
    id: Uuid,
    name: String,
    commands: Vec<Command>,
    environment: String,
    /// Seconds since the Unix epoch.
    created_at: u64,
}

impl SavedProgram {
    pub fn from_new(program: NewProgram, created_at: u64) -> Self {
        Self::with_id(Uuid::new_v4(), program, created_at)
    }

    pub fn with_id(id: Uuid, program: NewProgram, created_at: u64) -> Self {
        Self {
            id,
            name: program.name,
            commands: program.commands,
            environment: program.environment,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }
}

#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("program name must not be empty")]
    EmptyName,
    #[error("a program named {0:?} already exists")]
    DuplicateName(String),
    #[error("program {0} not found")]
    NotFound(String),
    #[error("program storage unavailable")]
    Unavailable(#[from] std::io::Error),
    #[error("invalid program record")]
    Invalid(#[from] serde_json::Error),
}

/// CRUD port for saved programs.
pub trait ProgramStore {
    /// All programs, newest first.
    fn list(&self) -> Result<Vec<SavedProgram>, ProgramError>;

    /// Stores a program under a fresh id. Fails with `DuplicateName` if the name is taken.
    fn create(&mut self, program: NewProgram) -> Result<SavedProgram, ProgramError>;

    fn get(&self, id: Uuid) -> Result<SavedProgram, ProgramError>;

    fn delete(&mut self, id: Uuid) -> Result<(), ProgramError>;
}

impl<S: ProgramStore + ?Sized> ProgramStore for Box<S> {
    fn list(&self) -> Result<Vec<SavedProgram>, ProgramError> {
        (**self).list()
    }

    fn create(&mut self, program: NewProgram) -> Result<SavedProgram, ProgramError> {
        (**self).create(program)
    }

    fn get(&self, id: Uuid) -> Result<SavedProgram, ProgramError> {
        (**self).get(id)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), ProgramError> {
        (**self).delete(id)
    }
}

/// Time source for creation timestamps.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// Newest first; programs created within the same second keep reverse insertion order.
fn newest_first(programs: &[SavedProgram]) -> Vec<SavedProgram> {
    let mut programs = programs.iter().rev().cloned().collect::<Vec<_>>();
    programs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    programs
}
