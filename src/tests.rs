//! Test utils.

use crate::{
    domain::{Environment, ARENA_HEIGHT, ARENA_WIDTH},
    programs::Clock,
};

/// Walled 400x400 arena without interior obstacles.
pub fn open_arena() -> Environment {
    Environment::walled("Open Arena", ARENA_WIDTH, ARENA_HEIGHT, [])
}

/// Fixed time source for deterministic timestamps.
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}
