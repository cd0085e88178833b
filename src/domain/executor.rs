//! Sequential execution of the command queue.
//!
//! The executor is a small state machine driven by elapsed time. While running, a single step
//! timer is armed; whenever it expires the command at the cursor fires and the timer is armed
//! again. Cancelling disarms the timer, so no stale step can fire afterwards.

use std::time::Duration;

use super::{Action, CommandQueue, HasCollision, Motion, MotionConfig, Pose};

pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExecutorState {
    #[default]
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExecutorEvent {
    Applied {
        index: usize,
        action: Action,
        motion: Motion,
    },
    /// A `stop` command at `index` ended the run.
    Halted { index: usize },
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Executor {
    state: ExecutorState,
    step_delay: Duration,
    elapsed: Duration,
    cursor: usize,
    end: usize,
}

impl Executor {
    pub fn new(step_delay: Duration) -> Self {
        Self {
            state: ExecutorState::Idle,
            step_delay,
            elapsed: Duration::ZERO,
            cursor: 0,
            end: 0,
        }
    }

    pub fn state(&self) -> ExecutorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ExecutorState::Running
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Index of the next command to fire, if running.
    pub fn cursor(&self) -> Option<usize> {
        self.is_running().then_some(self.cursor)
    }

    /// Starts a run over the commands currently queued. Returns `false` if already running or if
    /// there is nothing to run.
    pub fn execute(&mut self, queue: &CommandQueue) -> bool {
        if self.is_running() || queue.is_empty() {
            return false;
        }
        self.state = ExecutorState::Running;
        self.elapsed = Duration::ZERO;
        self.cursor = 0;
        self.end = queue.len();
        true
    }

    pub fn cancel(&mut self) {
        self.state = ExecutorState::Idle;
        self.elapsed = Duration::ZERO;
        self.cursor = 0;
        self.end = 0;
    }

    /// Advances the step timer by `delta` and fires every step that became due. `pose` is
    /// updated in place; all fired steps are reported in order.
    pub fn tick(
        &mut self,
        delta: Duration,
        queue: &CommandQueue,
        pose: &mut Pose,
        obstacles: &(impl HasCollision + ?Sized),
        config: &MotionConfig,
    ) -> Vec<ExecutorEvent> {
        let mut events = vec![];
        if !self.is_running() {
            return events;
        }

        self.elapsed += delta;
        while self.is_running() && self.elapsed >= self.step_delay {
            self.elapsed -= self.step_delay;

            let index = self.cursor;
            let Some(command) = queue.get(index).filter(|_| index < self.end) else {
                self.cancel();
                events.push(ExecutorEvent::Finished);
                break;
            };

            match command.action() {
                Action::Stop => {
                    self.cancel();
                    events.push(ExecutorEvent::Halted { index });
                    break;
                }
                action => {
                    let motion = pose.apply(action, obstacles, config);
                    if let Motion::Moved(next) | Motion::Turned(next) = motion {
                        *pose = next;
                    }
                    events.push(ExecutorEvent::Applied {
                        index,
                        action,
                        motion,
                    });
                }
            }

            self.cursor += 1;
            if self.cursor >= self.end {
                self.cancel();
                events.push(ExecutorEvent::Finished);
            }
        }

        events
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;

    use super::super::{Angle, Command, Position};
    use super::*;
    use crate::tests::open_arena;

    const STEP: Duration = DEFAULT_STEP_DELAY;

    fn queue_of(actions: &[Action]) -> CommandQueue {
        actions.iter().copied().map(Command::new).collect()
    }

    fn center() -> Pose {
        Pose::new(Position::new(200.0, 200.0), Angle::from_deg(0.0))
    }

    fn tick(
        executor: &mut Executor,
        delta: Duration,
        queue: &CommandQueue,
        pose: &mut Pose,
    ) -> Vec<ExecutorEvent> {
        executor.tick(delta, queue, pose, &open_arena(), &MotionConfig::default())
    }

    fn run_to_end(
        executor: &mut Executor,
        queue: &CommandQueue,
        pose: &mut Pose,
    ) -> Vec<ExecutorEvent> {
        let mut events = vec![];
        for _ in 0..1000 {
            events.extend(tick(executor, STEP, queue, pose));
            if !executor.is_running() {
                break;
            }
        }
        events
    }

    #[test]
    fn test_execute_requires_commands() {
        let mut executor = Executor::default();
        assert!(!executor.execute(&CommandQueue::new()));
        assert_eq!(executor.state(), ExecutorState::Idle);
    }

    #[test]
    fn test_execute_while_running_is_noop() {
        let mut executor = Executor::default();
        let queue = queue_of(&[Action::Forward, Action::Forward]);
        let mut pose = center();
        assert!(executor.execute(&queue));
        tick(&mut executor, STEP, &queue, &mut pose);
        assert!(!executor.execute(&queue));
        assert_eq!(executor.cursor(), Some(1));
    }

    #[test]
    fn test_nothing_fires_before_delay() {
        let mut executor = Executor::default();
        let queue = queue_of(&[Action::Forward]);
        let mut pose = center();
        executor.execute(&queue);
        let events = tick(&mut executor, Duration::from_millis(199), &queue, &mut pose);
        assert!(events.is_empty());
        assert_eq!(pose, center());

        let events = tick(&mut executor, Duration::from_millis(1), &queue, &mut pose);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], ExecutorEvent::Finished);
        assert_abs_diff_eq!(pose.position().x(), 205.0);
    }

    #[test]
    fn test_stop_halts_remaining_commands() {
        let mut executor = Executor::default();
        let queue = queue_of(&[
            Action::Forward,
            Action::Forward,
            Action::Left,
            Action::Stop,
            Action::Right,
        ]);
        let mut pose = center();
        executor.execute(&queue);
        let events = run_to_end(&mut executor, &queue, &mut pose);

        assert_eq!(
            events
                .iter()
                .filter_map(|e| match e {
                    ExecutorEvent::Applied { action, .. } => Some(*action),
                    _ => None,
                })
                .collect::<Vec<_>>(),
            vec![Action::Forward, Action::Forward, Action::Left]
        );
        assert_eq!(events.last(), Some(&ExecutorEvent::Halted { index: 3 }));
        assert_abs_diff_eq!(pose.position().x(), 210.0);
        assert_abs_diff_eq!(pose.heading().to_deg(), 345.0);
        assert_eq!(executor.state(), ExecutorState::Idle);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn test_one_long_tick_fires_several_steps() {
        let mut executor = Executor::default();
        let queue = queue_of(&[Action::Forward, Action::Forward, Action::Forward]);
        let mut pose = center();
        executor.execute(&queue);
        let events = tick(&mut executor, Duration::from_millis(450), &queue, &mut pose);
        assert_eq!(events.len(), 2);
        assert_eq!(executor.cursor(), Some(2));
        assert_abs_diff_eq!(pose.position().x(), 210.0);
    }

    #[test]
    fn test_forward_run_halts_at_wall() {
        let mut executor = Executor::default();
        let queue = queue_of(&[Action::Forward; 50]);
        let mut pose = center();
        executor.execute(&queue);
        let events = run_to_end(&mut executor, &queue, &mut pose);

        // the step onto x = 395 touches the wall and every later step is vetoed as well
        assert_abs_diff_eq!(pose.position().x(), 390.0);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, ExecutorEvent::Applied { motion: Motion::Blocked, .. }))
                .count(),
            12
        );
        assert_eq!(events.last(), Some(&ExecutorEvent::Finished));
    }

    #[test]
    fn test_cancel_disarms_pending_step() {
        let mut executor = Executor::default();
        let queue = queue_of(&[Action::Forward, Action::Forward]);
        let mut pose = center();
        executor.execute(&queue);
        tick(&mut executor, Duration::from_millis(150), &queue, &mut pose);
        executor.cancel();
        let events = tick(&mut executor, STEP * 10, &queue, &mut pose);
        assert!(events.is_empty());
        assert_eq!(pose, center());
        assert_eq!(executor.cursor(), None);
    }

    #[test]
    fn test_run_covers_commands_queued_at_start() {
        let mut executor = Executor::default();
        let mut queue = queue_of(&[Action::Right]);
        let mut pose = center();
        executor.execute(&queue);
        queue.push(Command::new(Action::Forward));
        let events = run_to_end(&mut executor, &queue, &mut pose);
        assert_eq!(events.len(), 2);
        assert_eq!(pose.position(), center().position());

        // the appended command runs on the next execution
        assert!(executor.execute(&queue));
        run_to_end(&mut executor, &queue, &mut pose);
        assert_abs_diff_eq!(pose.heading().to_deg(), 30.0);
    }

    #[test]
    fn test_queue_shrunk_while_running_finishes() {
        let mut executor = Executor::default();
        let mut queue = queue_of(&[Action::Left, Action::Left]);
        let mut pose = center();
        executor.execute(&queue);
        queue.clear();
        let events = tick(&mut executor, STEP, &queue, &mut pose);
        assert_eq!(events, vec![ExecutorEvent::Finished]);
        assert_eq!(executor.state(), ExecutorState::Idle);
    }
}
