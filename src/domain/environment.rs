//! Environments with obstacles and the fixed catalog the simulation runs against.

use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use super::{HasCollision, Obstacle, Position};

pub const ARENA_WIDTH: f64 = 400.0;
pub const ARENA_HEIGHT: f64 = 400.0;
pub const WALL_THICKNESS: f64 = 5.0;

const RNG_SEED: u64 = 19878367467712;

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Environment {
    name: String,
    width: f64,
    height: f64,
    obstacles: Vec<Obstacle>,
}

impl Environment {
    pub fn new(name: impl Into<String>, width: f64, height: f64, obstacles: Vec<Obstacle>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            obstacles,
        }
    }

    /// Arena enclosed by four walls, followed by the given interior obstacles.
    pub fn walled(
        name: impl Into<String>,
        width: f64,
        height: f64,
        interior: impl IntoIterator<Item = Obstacle>,
    ) -> Self {
        let mut obstacles = vec![
            Obstacle::new(0.0, 0.0, width, WALL_THICKNESS),
            Obstacle::new(0.0, height - WALL_THICKNESS, width, WALL_THICKNESS),
            Obstacle::new(0.0, 0.0, WALL_THICKNESS, height),
            Obstacle::new(width - WALL_THICKNESS, 0.0, WALL_THICKNESS, height),
        ];
        obstacles.extend(interior);
        Self::new(name, width, height, obstacles)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

impl HasCollision for Environment {
    fn is_blocked(&self, position: Position) -> bool {
        self.obstacles.is_blocked(position)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("unknown environment {0:?}")]
    Unknown(String),
}

/// Ordered, immutable set of named environments.
#[derive(Debug)]
pub struct Catalog {
    environments: Vec<Environment>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog {
    environments: vec![open_space(), maze(), obstacle_course(), rock_field()],
});

impl Catalog {
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    pub fn select(&self, name: &str) -> Result<&Environment, EnvironmentError> {
        self.environments
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| EnvironmentError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.environments.iter().map(|e| e.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Environment> {
        self.environments.iter()
    }

    pub fn default_environment(&self) -> &Environment {
        &self.environments[0]
    }
}

fn open_space() -> Environment {
    Environment::walled(
        "Open Space",
        ARENA_WIDTH,
        ARENA_HEIGHT,
        [
            Obstacle::new(50.0, 50.0, 40.0, 40.0),
            Obstacle::new(310.0, 310.0, 40.0, 40.0),
        ],
    )
}

fn maze() -> Environment {
    Environment::walled(
        "Maze",
        ARENA_WIDTH,
        ARENA_HEIGHT,
        [
            Obstacle::new(80.0, 5.0, 10.0, 150.0),
            Obstacle::new(80.0, 240.0, 10.0, 155.0),
            Obstacle::new(150.0, 120.0, 180.0, 10.0),
            Obstacle::new(150.0, 270.0, 180.0, 10.0),
            Obstacle::new(310.0, 130.0, 10.0, 60.0),
            Obstacle::new(240.0, 280.0, 10.0, 60.0),
        ],
    )
}

fn obstacle_course() -> Environment {
    Environment::walled(
        "Obstacle Course",
        ARENA_WIDTH,
        ARENA_HEIGHT,
        [
            Obstacle::new(60.0, 60.0, 30.0, 30.0),
            Obstacle::new(160.0, 40.0, 80.0, 20.0),
            Obstacle::new(300.0, 80.0, 40.0, 60.0),
            Obstacle::new(40.0, 180.0, 50.0, 50.0),
            Obstacle::new(260.0, 200.0, 30.0, 90.0),
            Obstacle::new(120.0, 300.0, 90.0, 25.0),
            Obstacle::new(320.0, 320.0, 40.0, 40.0),
        ],
    )
}

/// Randomly scattered rocks. The seed is fixed, so the layout is the same on every run.
fn rock_field() -> Environment {
    const ROCKS: usize = 14;
    const MIN_SIZE: f64 = 10.0;
    const MAX_SIZE: f64 = 30.0;
    const CLEARING: f64 = 40.0;

    let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
    let clearing = Obstacle::new(
        ARENA_WIDTH / 2.0 - CLEARING,
        ARENA_HEIGHT / 2.0 - CLEARING,
        2.0 * CLEARING,
        2.0 * CLEARING,
    );

    let mut rocks = vec![];
    while rocks.len() < ROCKS {
        let size = rng.random_range(MIN_SIZE..MAX_SIZE);
        let x = rng.random_range(WALL_THICKNESS..ARENA_WIDTH - WALL_THICKNESS - size);
        let y = rng.random_range(WALL_THICKNESS..ARENA_HEIGHT - WALL_THICKNESS - size);
        let rock = Obstacle::new(x.round(), y.round(), size.round(), size.round());
        if !rock.overlaps(&clearing) {
            rocks.push(rock);
        }
    }

    Environment::walled("Rock Field", ARENA_WIDTH, ARENA_HEIGHT, rocks)
}
