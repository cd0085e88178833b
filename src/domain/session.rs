//! A single simulation session.
//!
//! The session owns everything that changes while the user plays: the pose, the active
//! environment, the command queue and the executor. Sensor readings are recomputed right after
//! every change to the pose or environment, so they are never stale.

use std::time::Duration;

use super::{
    Action, Angle, Catalog, Command, CommandQueue, Environment, EnvironmentError, Executor,
    ExecutorEvent, ExecutorState, Motion, MotionConfig, Pose, SensorConfig, SensorReadings,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    environment: Environment,
    pose: Pose,
    readings: SensorReadings,
    queue: CommandQueue,
    executor: Executor,
    motion: MotionConfig,
    sensor: SensorConfig,
}

impl Session {
    pub fn new(
        environment: Environment,
        motion: MotionConfig,
        sensor: SensorConfig,
        step_delay: Duration,
    ) -> Self {
        let mut session = Self {
            pose: Pose::default(),
            readings: SensorReadings::default(),
            environment,
            queue: CommandQueue::new(),
            executor: Executor::new(step_delay),
            motion,
            sensor,
        };
        session.reset_pose();
        session
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn readings(&self) -> SensorReadings {
        self.readings
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    pub fn state(&self) -> ExecutorState {
        self.executor.state()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Pose every session starts from: arena center, facing along the positive x-axis.
    pub fn start_pose(&self) -> Pose {
        Pose::new(self.environment.center(), Angle::from_deg(0.0))
    }

    /// Switches to a catalog environment. On failure the active environment stays untouched.
    pub fn select_environment(&mut self, name: &str) -> Result<&Environment, EnvironmentError> {
        let environment = Catalog::global().select(name)?;
        self.executor.cancel();
        self.environment = environment.clone();
        self.reset_pose();
        Ok(&self.environment)
    }

    /// Applies an action immediately, bypassing the queue. A manual `stop` halts a running
    /// queue.
    pub fn jog(&mut self, action: Action) -> Motion {
        if action == Action::Stop {
            self.executor.cancel();
        }
        let motion = self.pose.apply(action, &self.environment, &self.motion);
        if let Motion::Moved(pose) | Motion::Turned(pose) = motion {
            self.set_pose(pose);
        }
        motion
    }

    pub fn enqueue(&mut self, action: Action) -> &Command {
        self.queue.push(Command::new(action));
        &self.queue.commands()[self.queue.len() - 1]
    }

    pub fn execute(&mut self) -> bool {
        self.executor.execute(&self.queue)
    }

    pub fn clear(&mut self) {
        self.executor.cancel();
        self.queue.clear();
    }

    pub fn reset(&mut self) {
        self.executor.cancel();
        self.reset_pose();
    }

    pub fn tick(&mut self, delta: Duration) -> Vec<ExecutorEvent> {
        let mut pose = self.pose;
        let events = self.executor.tick(
            delta,
            &self.queue,
            &mut pose,
            &self.environment,
            &self.motion,
        );
        if pose != self.pose {
            self.set_pose(pose);
        }
        events
    }

    /// Replaces the queue with a stored program and switches to its environment. The commands
    /// are loaded even if the environment is unknown; the current environment is kept in that
    /// case and the error is returned.
    pub fn load(
        &mut self,
        commands: impl IntoIterator<Item = Command>,
        environment: &str,
    ) -> Result<&Environment, EnvironmentError> {
        self.clear();
        for command in commands {
            self.queue.push(command);
        }
        let environment = Catalog::global().select(environment)?;
        self.environment = environment.clone();
        self.reset_pose();
        Ok(&self.environment)
    }

    fn reset_pose(&mut self) {
        let pose = self.start_pose();
        self.set_pose(pose);
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.readings = SensorReadings::measure(&self.pose, &self.environment, &self.sensor);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            Catalog::global().default_environment().clone(),
            MotionConfig::default(),
            SensorConfig::default(),
            super::DEFAULT_STEP_DELAY,
        )
    }
}
