//! Drawing primitives.
//!
//! The closed set of shapes the converter cuts. Each variant answers
//! geometric queries only; nothing here knows about files or G-code.
//! Every entity has a deterministic start and end point so the planner can
//! chain moves; closed shapes start and end at the same point.

use dxf2gcode_core::{ArcDirection, EntityLocator, Point};
use serde::{Deserialize, Serialize};

/// A straight line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// A full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The point at angle 0, where cutting starts and ends.
    pub fn seam(&self) -> Point {
        self.center.polar(self.radius, 0.0)
    }
}

/// A circular arc.
///
/// Angles are in degrees, measured counter-clockwise from +X. The arc is
/// travelled from `start_angle` to `end_angle` in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub direction: ArcDirection,
}

impl Arc {
    pub fn new(
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        direction: ArcDirection,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            direction,
        }
    }

    pub fn start_point(&self) -> Point {
        self.center
            .polar(self.radius, self.start_angle.to_radians())
    }

    pub fn end_point(&self) -> Point {
        self.center.polar(self.radius, self.end_angle.to_radians())
    }

    /// Swept angle in degrees, in `[0, 360]`.
    ///
    /// Angles a full turn apart (e.g. 0 and 360) sweep a full circle;
    /// identical angles sweep nothing.
    pub fn sweep_degrees(&self) -> f64 {
        let raw = match self.direction {
            ArcDirection::CounterClockwise => self.end_angle - self.start_angle,
            ArcDirection::Clockwise => self.start_angle - self.end_angle,
        };
        let sweep = raw.rem_euclid(360.0);
        if sweep <= 1e-9 && raw.abs() >= 360.0 - 1e-9 {
            360.0
        } else {
            sweep
        }
    }
}

/// A lightweight polyline.
///
/// `bulges[i]` describes the segment from vertex `i` to vertex `i + 1`
/// (or back to vertex 0 for the last vertex of a closed polyline). Zero is
/// a straight segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point>,
    pub bulges: Vec<f64>,
    pub closed: bool,
}

impl Polyline {
    /// Creates a polyline with straight segments only.
    pub fn new(vertices: Vec<Point>, closed: bool) -> Self {
        let bulges = vec![0.0; vertices.len()];
        Self {
            vertices,
            bulges,
            closed,
        }
    }

    /// Creates a polyline with per-vertex bulges. Missing bulges read as 0.
    pub fn with_bulges(vertices: Vec<Point>, mut bulges: Vec<f64>, closed: bool) -> Self {
        bulges.resize(vertices.len(), 0.0);
        Self {
            vertices,
            bulges,
            closed,
        }
    }

    /// Bulge of the segment leaving vertex `index`.
    pub fn bulge(&self, index: usize) -> f64 {
        self.bulges.get(index).copied().unwrap_or(0.0)
    }

    /// `(from, to, bulge)` for every segment, including the closing one.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point, f64)> + '_ {
        let n = self.vertices.len();
        let count = match (n, self.closed) {
            (0, _) | (1, _) => 0,
            (_, true) => n,
            (_, false) => n - 1,
        };
        (0..count).map(move |i| {
            let to = self.vertices[(i + 1) % n];
            (self.vertices[i], to, self.bulge(i))
        })
    }
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Polyline(Polyline),
}

impl Entity {
    /// DXF type name of the primitive.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Line(_) => "LINE",
            Self::Circle(_) => "CIRCLE",
            Self::Arc(_) => "ARC",
            Self::Polyline(_) => "LWPOLYLINE",
        }
    }

    /// Where cutting begins.
    ///
    /// Circles start at angle 0. A polyline without vertices has no
    /// geometry and reports the origin; the planner drops it as degenerate.
    pub fn start_point(&self) -> Point {
        match self {
            Self::Line(l) => l.start,
            Self::Circle(c) => c.seam(),
            Self::Arc(a) => a.start_point(),
            Self::Polyline(p) => p.vertices.first().copied().unwrap_or_default(),
        }
    }

    /// Where cutting ends. Equal to [`Entity::start_point`] for closed shapes.
    pub fn end_point(&self) -> Point {
        match self {
            Self::Line(l) => l.end,
            Self::Circle(c) => c.seam(),
            Self::Arc(a) => a.end_point(),
            Self::Polyline(p) if p.closed => self.start_point(),
            Self::Polyline(p) => p.vertices.last().copied().unwrap_or_default(),
        }
    }

    pub fn center(&self) -> Option<Point> {
        match self {
            Self::Circle(c) => Some(c.center),
            Self::Arc(a) => Some(a.center),
            Self::Line(_) | Self::Polyline(_) => None,
        }
    }

    pub fn radius(&self) -> Option<f64> {
        match self {
            Self::Circle(c) => Some(c.radius),
            Self::Arc(a) => Some(a.radius),
            Self::Line(_) | Self::Polyline(_) => None,
        }
    }

    /// Scale all lengths about the origin. Angles and bulges are unchanged.
    pub fn scaled(&self, factor: f64) -> Entity {
        match self {
            Self::Line(l) => Self::Line(Line::new(l.start.scaled(factor), l.end.scaled(factor))),
            Self::Circle(c) => Self::Circle(Circle::new(c.center.scaled(factor), c.radius * factor)),
            Self::Arc(a) => Self::Arc(Arc {
                center: a.center.scaled(factor),
                radius: a.radius * factor,
                ..*a
            }),
            Self::Polyline(p) => Self::Polyline(Polyline {
                vertices: p.vertices.iter().map(|v| v.scaled(factor)).collect(),
                bulges: p.bulges.clone(),
                closed: p.closed,
            }),
        }
    }
}

/// An entity together with where it came from in the drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntity {
    pub entity: Entity,
    pub locator: EntityLocator,
    /// Layer name (group 8).
    pub layer: String,
}

impl SourceEntity {
    pub fn new(entity: Entity, locator: EntityLocator, layer: impl Into<String>) -> Self {
        Self {
            entity,
            locator,
            layer: layer.into(),
        }
    }
}
