//! The domain module encapsulates the simulation kernel. It defines the robot `Pose`, the
//! `Environment` the robot moves in, the range sensors and the command executor, along with the
//! rules governing their interactions.
//!
//! By minimizing hard dependencies, this module ensures the business logic remains adaptable and
//! independent of specific implementation details. Nothing in here knows about bevy, storage or
//! the console.

mod basis;
mod collision;
mod command;
mod environment;
mod executor;
mod robot;
mod sensor;
mod session;

pub use basis::{Angle, Position};
pub use collision::{HasCollision, Obstacle};
pub use command::{Command, CommandId, CommandQueue};
pub use environment::{
    Catalog, Environment, EnvironmentError, ARENA_HEIGHT, ARENA_WIDTH, WALL_THICKNESS,
};
pub use executor::{Executor, ExecutorEvent, ExecutorState, DEFAULT_STEP_DELAY};
pub use robot::{Action, CommandError, Motion, MotionConfig, Pose};
pub use sensor::{cast_ray, SensorConfig, SensorReadings};
pub use session::Session;
