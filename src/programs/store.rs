//! Program stores: a volatile one for tests and embedding, and one backed by a JSON file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use super::{newest_first, Clock, NewProgram, ProgramError, ProgramStore, SavedProgram, SystemClock};

pub struct MemoryProgramStore {
    programs: Vec<SavedProgram>,
    clock: Box<dyn Clock>,
}

impl MemoryProgramStore {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            programs: vec![],
            clock,
        }
    }
}

impl Default for MemoryProgramStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramStore for MemoryProgramStore {
    fn list(&self) -> Result<Vec<SavedProgram>, ProgramError> {
        Ok(newest_first(&self.programs))
    }

    fn create(&mut self, program: NewProgram) -> Result<SavedProgram, ProgramError> {
        insert(&mut self.programs, program, self.clock.now_epoch_seconds())
    }

    fn get(&self, id: Uuid) -> Result<SavedProgram, ProgramError> {
        find(&self.programs, id).cloned()
    }

    fn delete(&mut self, id: Uuid) -> Result<(), ProgramError> {
        remove(&mut self.programs, id)
    }
}

/// Keeps all programs as one JSON array in a single file. A missing file is an empty store.
pub struct JsonFileProgramStore {
    path: PathBuf,
    clock: Box<dyn Clock>,
}

impl JsonFileProgramStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Box::new(SystemClock))
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<SavedProgram>, ProgramError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(vec![]),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(vec![]),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, programs: &[SavedProgram]) -> Result<(), ProgramError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(programs)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ProgramStore for JsonFileProgramStore {
    fn list(&self) -> Result<Vec<SavedProgram>, ProgramError> {
        Ok(newest_first(&self.load()?))
    }

    fn create(&mut self, program: NewProgram) -> Result<SavedProgram, ProgramError> {
        let mut programs = self.load()?;
        let saved = insert(&mut programs, program, self.clock.now_epoch_seconds())?;
        self.store(&programs)?;
        Ok(saved)
    }

    fn get(&self, id: Uuid) -> Result<SavedProgram, ProgramError> {
        find(&self.load()?, id).cloned()
    }

    fn delete(&mut self, id: Uuid) -> Result<(), ProgramError> {
        let mut programs = self.load()?;
        remove(&mut programs, id)?;
        self.store(&programs)
    }
}

fn insert(
    programs: &mut Vec<SavedProgram>,
    program: NewProgram,
    created_at: u64,
) -> Result<SavedProgram, ProgramError> {
    if programs.iter().any(|p| p.name == program.name) {
        return Err(ProgramError::DuplicateName(program.name));
    }
    let saved = SavedProgram::from_new(program, created_at);
    programs.push(saved.clone());
    Ok(saved)
}

fn find(programs: &[SavedProgram], id: Uuid) -> Result<&SavedProgram, ProgramError> {
    programs
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ProgramError::NotFound(id.to_string()))
}

fn remove(programs: &mut Vec<SavedProgram>, id: Uuid) -> Result<(), ProgramError> {
    let len = programs.len();
    programs.retain(|p| p.id != id);
    if programs.len() == len {
        Err(ProgramError::NotFound(id.to_string()))
    } else {
        Ok(())
    }
}
