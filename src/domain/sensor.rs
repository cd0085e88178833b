//! Range sensors based on a fixed-step ray march.

use super::{Angle, HasCollision, Pose, Position};

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct SensorConfig {
    pub step: f64,
    pub max_range: f64,
}

impl SensorConfig {
    pub const fn new(step: f64, max_range: f64) -> Self {
        Self { step, max_range }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::new(5.0, 200.0)
    }
}

/// Distance travelled from `origin` along `heading` before the next probe point would be
/// blocked, in multiples of `config.step` and never more than `config.max_range`.
///
/// The probe point is tested before the step is counted, so a hit reports the last free
/// distance and undershoots the true gap by up to one step.
pub fn cast_ray(
    origin: Position,
    heading: Angle,
    obstacles: &(impl HasCollision + ?Sized),
    config: &SensorConfig,
) -> f64 {
    if config.step <= 0.0 {
        return 0.0;
    }

    let mut probe = origin;
    let mut distance = 0.0;

    while distance < config.max_range {
        let next = probe.translated(heading, config.step);
        if obstacles.is_blocked(next) {
            break;
        }
        probe = next;
        distance += config.step;
    }

    distance.clamp(0.0, config.max_range.max(0.0))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct SensorReadings {
    pub front: f64,
    pub left: f64,
    pub right: f64,
}

impl SensorReadings {
    pub fn measure(
        pose: &Pose,
        obstacles: &(impl HasCollision + ?Sized),
        config: &SensorConfig,
    ) -> Self {
        let quarter = Angle::from_deg(90.0);
        let position = pose.position();
        let heading = pose.heading();
        Self {
            front: cast_ray(position, heading, obstacles, config).round(),
            left: cast_ray(position, heading - quarter, obstacles, config).round(),
            right: cast_ray(position, heading + quarter, obstacles, config).round(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::super::{Environment, Obstacle};
    use super::*;
    use crate::tests::open_arena;

    #[test]
    fn test_cast_ray_undershoots_wall_by_one_step() {
        // wall starts at x = 395, last free probe is x = 390
        let distance = cast_ray(
            Position::new(200.0, 200.0),
            Angle::from_deg(0.0),
            &open_arena(),
            &SensorConfig::default(),
        );
        assert_abs_diff_eq!(distance, 190.0);
    }

    #[test]
    fn test_cast_ray_returns_max_range_without_hit() {
        let environment = Environment::new("Empty", 1000.0, 1000.0, vec![]);
        let distance = cast_ray(
            Position::new(0.0, 0.0),
            Angle::from_deg(45.0),
            &environment,
            &SensorConfig::default(),
        );
        assert_abs_diff_eq!(distance, 200.0);
    }

    #[test]
    fn test_cast_ray_adjacent_obstacle() {
        let obstacles = [Obstacle::new(13.0, -10.0, 10.0, 20.0)];
        let distance = cast_ray(
            Position::new(10.0, 0.0),
            Angle::from_deg(0.0),
            &obstacles[..],
            &SensorConfig::default(),
        );
        assert_abs_diff_eq!(distance, 0.0);
    }

    #[rstest]
    #[case::small_range(SensorConfig::new(5.0, 12.0))]
    #[case::large_step(SensorConfig::new(50.0, 120.0))]
    #[case::default(SensorConfig::default())]
    fn test_cast_ray_stays_within_range(#[case] config: SensorConfig) {
        let environment = open_arena();
        for heading in (0..360).step_by(15) {
            for origin in [
                Position::new(200.0, 200.0),
                Position::new(20.0, 20.0),
                Position::new(380.0, 210.0),
            ] {
                let distance =
                    cast_ray(origin, Angle::from_deg(heading as f64), &environment, &config);
                assert!((0.0..=config.max_range).contains(&distance));
            }
        }
    }

    #[test]
    fn test_cast_ray_obstacle_ahead() {
        let obstacles = [Obstacle::new(50.0, -5.0, 10.0, 10.0)];
        let distance = cast_ray(
            Position::new(0.0, 0.0),
            Angle::from_deg(0.0),
            &obstacles[..],
            &SensorConfig::default(),
        );
        assert_abs_diff_eq!(distance, 45.0);
    }

    #[test]
    fn test_cast_ray_zero_step() {
        let distance = cast_ray(
            Position::new(0.0, 0.0),
            Angle::from_deg(0.0),
            &open_arena(),
            &SensorConfig::new(0.0, 200.0),
        );
        assert_abs_diff_eq!(distance, 0.0);
    }

    #[rstest]
    #[case::facing_east(  0.0, 190.0, 190.0, 190.0)]
    #[case::near_east_wall(0.0, 10.0, 190.0, 190.0)]
    fn test_sensor_readings_measure(
        #[case] heading: f64,
        #[case] front: f64,
        #[case] left: f64,
        #[case] right: f64,
    ) {
        let x = 390.0 - front;
        let pose = Pose::new(Position::new(x, 200.0), Angle::from_deg(heading));
        let readings = SensorReadings::measure(&pose, &open_arena(), &SensorConfig::default());
        assert_abs_diff_eq!(readings.front, front);
        assert_abs_diff_eq!(readings.left, left);
        assert_abs_diff_eq!(readings.right, right);
    }

    #[test]
    fn test_sensor_readings_left_and_right_are_perpendicular() {
        // robot at (100, 50) facing south, left looks east and right looks west
        let pose = Pose::new(Position::new(100.0, 50.0), Angle::from_deg(90.0));
        let readings = SensorReadings::measure(&pose, &open_arena(), &SensorConfig::default());
        assert_abs_diff_eq!(readings.front, 200.0);
        assert_abs_diff_eq!(readings.left, 200.0);
        assert_abs_diff_eq!(readings.right, 90.0);
    }
}
