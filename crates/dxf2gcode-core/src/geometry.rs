//! Planar geometry primitives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lengths and radii at or below this value (mm) are treated as zero.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// A point in the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point on a circle around `self` at `angle` radians.
    pub fn polar(&self, radius: f64, angle: f64) -> Point {
        Point::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }

    /// Returns the point scaled about the origin.
    pub fn scaled(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Whether both points lie within [`LENGTH_EPSILON`] of each other.
    pub fn coincides_with(&self, other: &Point) -> bool {
        self.distance_to(other) <= LENGTH_EPSILON
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rotational direction of an arc move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

impl ArcDirection {
    /// Direction implied by the sign of a signed sweep or bulge.
    pub fn from_sign(value: f64) -> Self {
        if value < 0.0 {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }
}

impl fmt::Display for ArcDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => write!(f, "CW"),
            Self::CounterClockwise => write!(f, "CCW"),
        }
    }
}
