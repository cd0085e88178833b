//! Collision detection of points against axis-aligned rectangles.

use super::Position;

pub trait HasCollision {
    /// Whether `position` lies on or inside any obstacle.
    fn is_blocked(&self, position: Position) -> bool;
}

/// Axis-aligned rectangle given by its top-left corner and its extent.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Obstacle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Obstacle {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Bounds are inclusive, so touching an edge counts as a collision.
    pub fn contains(&self, position: Position) -> bool {
        self.x <= position.x()
            && position.x() <= self.x + self.width
            && self.y <= position.y()
            && position.y() <= self.y + self.height
    }

    pub fn overlaps(&self, other: &Obstacle) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}

impl HasCollision for Obstacle {
    fn is_blocked(&self, position: Position) -> bool {
        self.contains(position)
    }
}

impl HasCollision for [Obstacle] {
    fn is_blocked(&self, position: Position) -> bool {
        self.iter().any(|o| o.contains(position))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::inside(Position::new(15.0, 25.0), true)]
    #[case::top_left_corner(Position::new(10.0, 20.0), true)]
    #[case::bottom_right_corner(Position::new(30.0, 60.0), true)]
    #[case::left_edge(Position::new(10.0, 40.0), true)]
    #[case::bottom_edge(Position::new(20.0, 60.0), true)]
    #[case::left_of(Position::new(9.999, 40.0), false)]
    #[case::below(Position::new(20.0, 60.001), false)]
    #[case::far_away(Position::new(-100.0, 300.0), false)]
    fn test_obstacle_contains(#[case] position: Position, #[case] expected: bool) {
        let obstacle = Obstacle::new(10.0, 20.0, 20.0, 40.0);
        assert_eq!(obstacle.contains(position), expected);
        assert_eq!(obstacle.is_blocked(position), expected);
    }

    #[test]
    fn test_obstacles_blocked_by_any() {
        let obstacles = [
            Obstacle::new(0.0, 0.0, 10.0, 10.0),
            Obstacle::new(50.0, 50.0, 10.0, 10.0),
        ];
        assert!(obstacles.is_blocked(Position::new(5.0, 5.0)));
        assert!(obstacles.is_blocked(Position::new(60.0, 60.0)));
        assert!(!obstacles.is_blocked(Position::new(30.0, 30.0)));
    }

    #[test]
    fn test_obstacles_scan_order_irrelevant() {
        let a = Obstacle::new(0.0, 0.0, 10.0, 10.0);
        let b = Obstacle::new(5.0, 5.0, 10.0, 10.0);
        for position in [
            Position::new(7.0, 7.0),
            Position::new(2.0, 2.0),
            Position::new(14.0, 14.0),
            Position::new(20.0, 20.0),
        ] {
            assert_eq!(
                [a, b].is_blocked(position),
                [b, a].is_blocked(position)
            );
        }
    }

    #[test]
    fn test_empty_set_never_blocks() {
        let obstacles: [Obstacle; 0] = [];
        assert!(!obstacles.is_blocked(Position::new(0.0, 0.0)));
    }

    #[rstest]
    #[case::separate(Obstacle::new(20.0, 20.0, 5.0, 5.0), false)]
    #[case::touching(Obstacle::new(10.0, 0.0, 5.0, 5.0), true)]
    #[case::nested(Obstacle::new(2.0, 2.0, 1.0, 1.0), true)]
    fn test_obstacle_overlaps(#[case] other: Obstacle, #[case] expected: bool) {
        let obstacle = Obstacle::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(obstacle.overlaps(&other), expected);
        assert_eq!(other.overlaps(&obstacle), expected);
    }
}
