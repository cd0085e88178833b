//! Simulation of the robot in an environment with obstacles.
//!
//! Every frame the session's executor is advanced by the elapsed time, so queued commands fire
//! at the configured step delay. Pose and sensor readings are reported whenever they change.

use bevy::{
    log::{debug, info},
    prelude::*,
};

use crate::{
    domain::{ExecutorEvent, ExecutorState, Motion, Pose, SensorReadings},
    resource::SessionRes,
};

pub struct Simulator;

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionRes>()
            .add_systems(Update, (simulate, report).chain());
    }
}

fn simulate(time: Res<Time>, mut session: ResMut<SessionRes>) {
    if session.state() != ExecutorState::Running {
        return;
    }

    for event in session.tick(time.delta()) {
        match event {
            ExecutorEvent::Applied {
                index,
                action,
                motion: Motion::Blocked,
            } => debug!("step {index}: {action} blocked by an obstacle"),
            ExecutorEvent::Applied { index, action, .. } => debug!("step {index}: {action}"),
            ExecutorEvent::Halted { index } => info!("run halted by stop at step {index}"),
            ExecutorEvent::Finished => info!("run finished"),
        }
    }
}

fn report(session: Res<SessionRes>, mut last: Local<Option<(Pose, SensorReadings)>>) {
    let current = (session.pose(), session.readings());
    if *last == Some(current) {
        return;
    }
    *last = Some(current);

    let (pose, readings) = current;
    info!(
        "pose {pose} | front {} left {} right {}",
        readings.front, readings.left, readings.right
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;
    use bevy::time::{TimePlugin, TimeUpdateStrategy};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::Action;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((TimePlugin, Simulator))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app
    }

    #[test]
    fn test_simulator_runs_queue_over_frames() {
        let mut app = app();
        {
            let mut session = app.world.resource_mut::<SessionRes>();
            for _ in 0..10 {
                session.enqueue(Action::Forward);
            }
            assert!(session.execute());
        }

        for _ in 0..40 {
            app.update();
        }

        let session = app.world.resource::<SessionRes>();
        assert_eq!(session.state(), ExecutorState::Idle);
        assert_abs_diff_eq!(session.pose().position().x(), 250.0);
    }

    #[test]
    fn test_simulator_waits_for_step_delay() {
        let mut app = app();
        app.world.resource_mut::<SessionRes>().enqueue(Action::Right);
        app.world.resource_mut::<SessionRes>().execute();

        // the first frame has no elapsed time, the second one only half a step
        app.update();
        app.update();
        assert_abs_diff_eq!(
            app.world.resource::<SessionRes>().pose().heading().to_deg(),
            0.0
        );

        app.update();
        assert_abs_diff_eq!(
            app.world.resource::<SessionRes>().pose().heading().to_deg(),
            15.0
        );
    }
}
