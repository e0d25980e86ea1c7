//! Toolpath segment types.

use dxf2gcode_core::{ArcDirection, Point};
use std::f64::consts::TAU;

/// One cutting move. The move starts wherever the previous one ended (or
/// at the path's start point for the first segment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Straight move to `end`.
    Line { end: Point },
    /// Circular move to `end` around `center`.
    ///
    /// `sweep` is the unsigned included angle in radians. It
    /// disambiguates a full circle (start == end, sweep 2π) from a
    /// vanishing arc.
    Arc {
        end: Point,
        center: Point,
        direction: ArcDirection,
        sweep: f64,
    },
}

impl Segment {
    pub fn line(end: Point) -> Self {
        Segment::Line { end }
    }

    pub fn arc(end: Point, center: Point, direction: ArcDirection, sweep: f64) -> Self {
        Segment::Arc {
            end,
            center,
            direction,
            sweep,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Segment::Line { end } | Segment::Arc { end, .. } => *end,
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Segment::Arc { .. })
    }

    /// Included angle in radians; zero for straight moves.
    pub fn included_angle(&self) -> f64 {
        match self {
            Segment::Line { .. } => 0.0,
            Segment::Arc { sweep, .. } => *sweep,
        }
    }

    /// Travelled length when starting at `from`.
    pub fn length(&self, from: Point) -> f64 {
        match self {
            Segment::Line { end } => from.distance_to(end),
            Segment::Arc { center, sweep, .. } => center.distance_to(&from) * sweep.min(TAU),
        }
    }
}
