use uuid::Uuid;

use super::{NewProgram, ProgramError, ProgramStore, SavedProgram};
use crate::domain::Command;

/// User-facing program operations. Names are validated here, before the store is touched.
pub struct ProgramLibrary<S> {
    store: S,
}

impl<S: ProgramStore> ProgramLibrary<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(
        &mut self,
        name: &str,
        commands: &[Command],
        environment: &str,
    ) -> Result<SavedProgram, ProgramError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProgramError::EmptyName);
        }
        if self.store.list()?.iter().any(|p| p.name() == name) {
            return Err(ProgramError::DuplicateName(name.to_string()));
        }
        self.store
            .create(NewProgram::new(name, commands.to_vec(), environment))
    }

    pub fn programs(&self) -> Result<Vec<SavedProgram>, ProgramError> {
        self.store.list()
    }

    pub fn find(&self, name: &str) -> Result<SavedProgram, ProgramError> {
        let name = name.trim();
        self.store
            .list()?
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| ProgramError::NotFound(name.to_string()))
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), ProgramError> {
        self.store.delete(id)
    }
}
