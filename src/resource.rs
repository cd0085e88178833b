//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;

use crate::{
    domain,
    programs::{ProgramLibrary, ProgramStore},
};

#[derive(Resource, Default)]
pub struct SessionRes(domain::Session);

impl Deref for SessionRes {
    type Target = domain::Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SessionRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::Session> for SessionRes {
    fn from(value: domain::Session) -> Self {
        Self(value)
    }
}

pub type DynProgramStore = Box<dyn ProgramStore + Send + Sync>;

#[derive(Resource)]
pub struct ProgramsRes(ProgramLibrary<DynProgramStore>);

impl ProgramsRes {
    pub fn new(store: impl ProgramStore + Send + Sync + 'static) -> Self {
        Self(ProgramLibrary::new(Box::new(store)))
    }
}

impl Deref for ProgramsRes {
    type Target = ProgramLibrary<DynProgramStore>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ProgramsRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
