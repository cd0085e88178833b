//! Basic building blocks.

use std::{
    fmt,
    ops::{Add, Neg, Sub},
};

use nalgebra::{Rotation2, Vector2};

/// Point in arena coordinates. The y-axis points down, as on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn distance(&self, position: Self) -> f64 {
        ((self.x - position.x).powi(2) + (self.y - position.y).powi(2)).sqrt()
    }

    /// Position reached by moving `distance` units along `heading`.
    pub fn translated(&self, heading: Angle, distance: f64) -> Position {
        let offset = heading.unit_vector() * distance;
        Position::new(self.x + offset.x, self.y + offset.y)
    }
}

impl From<Position> for (f64, f64) {
    fn from(value: Position) -> Self {
        (value.x, value.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Heading in degrees, always kept in `[0, 360)`. Increasing angles rotate clockwise on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub fn from_deg(degree: f64) -> Self {
        let degree = degree.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360
        Self(if degree >= 360.0 { 0.0 } else { degree })
    }

    pub fn to_deg(self) -> f64 {
        self.0
    }

    pub fn to_rad(self) -> f64 {
        self.0.to_radians()
    }

    /// `(cos, sin)` of the heading.
    pub fn unit_vector(self) -> Vector2<f64> {
        Rotation2::new(self.to_rad()) * Vector2::x()
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle::from_deg(-self.0)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Angle::from_deg(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Self) -> Self::Output {
        Angle::from_deg(self.0 - rhs.0)
    }
}

impl From<Angle> for f64 {
    fn from(value: Angle) -> Self {
        value.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}°", self.0)
    }
}
