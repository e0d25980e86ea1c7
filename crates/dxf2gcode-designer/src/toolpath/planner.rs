//! Entity to cut path conversion.

use super::{bulge_to_arc, CutPath, PathOrdering, Segment};
use crate::entity::{Arc, Circle, Entity, Line, Polyline, SourceEntity};
use crate::gcode_gen::format_number;
use dxf2gcode_core::{ArcDirection, Diagnostic, Point, LENGTH_EPSILON};
use std::f64::consts::TAU;

/// Planner output: cut paths in emission order plus dropped entities.
#[derive(Debug, Clone, Default)]
pub struct PlannedPaths {
    pub paths: Vec<CutPath>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PlannedPaths {
    pub fn cut_length(&self) -> f64 {
        self.paths.iter().map(CutPath::cut_length).sum()
    }

    pub fn rapid_length(&self) -> f64 {
        rapid_length(&self.paths)
    }
}

/// Total rapid travel from the origin through every path start.
pub fn rapid_length(paths: &[CutPath]) -> f64 {
    let mut position = Point::origin();
    let mut total = 0.0;
    for path in paths {
        total += position.distance_to(&path.start);
        position = path.end();
    }
    total
}

/// Arc sweeps at or below this many degrees are treated as zero.
const SWEEP_EPSILON_DEGREES: f64 = 1e-9;

/// Turns drawing entities into cut paths.
///
/// `precision` is the number of decimals the program is written with. No
/// arc is planned whose ends print the same unless it is a full turn, and
/// no arc whose I/J offset prints as zero.
#[derive(Debug, Clone, Copy)]
pub struct PathPlanner {
    ordering: PathOrdering,
    precision: usize,
}

impl Default for PathPlanner {
    fn default() -> Self {
        Self::new(PathOrdering::default())
    }
}

impl PathPlanner {
    pub fn new(ordering: PathOrdering) -> Self {
        Self {
            ordering,
            precision: 4,
        }
    }

    /// Plan for output written with `precision` decimals.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// One path per non-degenerate entity, ordered by the planner's policy.
    pub fn plan(&self, entities: &[SourceEntity]) -> PlannedPaths {
        let mut paths = Vec::with_capacity(entities.len());
        let mut diagnostics = Vec::new();

        for source in entities {
            match self.plan_entity(&source.entity) {
                Ok((start, segments)) => paths.push(CutPath::new(
                    start,
                    segments,
                    source.locator.clone(),
                    source.layer.clone(),
                )),
                Err(reason) => {
                    tracing::warn!(entity = %source.locator, reason, "dropping degenerate entity");
                    diagnostics.push(Diagnostic::degenerate(source.locator.clone(), reason));
                }
            }
        }

        let paths = self.ordering.apply(paths, Point::origin());
        tracing::debug!(
            paths = paths.len(),
            dropped = diagnostics.len(),
            ordering = %self.ordering,
            precision = self.precision,
            "planned cut paths"
        );

        PlannedPaths { paths, diagnostics }
    }

    fn plan_entity(&self, entity: &Entity) -> Planned {
        match entity {
            Entity::Line(line) => self.plan_line(line),
            Entity::Circle(circle) => self.plan_circle(circle),
            Entity::Arc(arc) => self.plan_arc(arc),
            Entity::Polyline(polyline) => self.plan_polyline(polyline),
        }
    }

    fn plan_line(&self, line: &Line) -> Planned {
        if line.length() <= LENGTH_EPSILON {
            return Err("zero-length line");
        }
        if self.prints_same(line.start, line.end) {
            return Err("line shorter than output precision");
        }
        Ok((line.start, vec![Segment::line(line.end)]))
    }

    fn plan_circle(&self, circle: &Circle) -> Planned {
        if circle.radius <= LENGTH_EPSILON {
            return Err("zero-radius circle");
        }
        let seam = circle.seam();
        if self.offset_prints_zero(seam, circle.center) {
            return Err("circle radius below output precision");
        }
        Ok((
            seam,
            vec![Segment::arc(seam, circle.center, ArcDirection::Clockwise, TAU)],
        ))
    }

    fn plan_arc(&self, arc: &Arc) -> Planned {
        if arc.radius <= LENGTH_EPSILON {
            return Err("zero-radius arc");
        }
        let mut sweep = arc.sweep_degrees();
        if sweep <= SWEEP_EPSILON_DEGREES {
            return Err("zero-sweep arc");
        }

        let start = arc.start_point();
        if self.offset_prints_zero(start, arc.center) {
            return Err("arc radius below output precision");
        }
        let mut end = arc.end_point();
        if sweep >= 360.0 {
            end = start;
        } else if self.prints_same(start, end) {
            // Start and end collapse: either all but a full turn, or a sliver.
            if sweep < 180.0 {
                return Err("arc shorter than output precision");
            }
            sweep = 360.0;
            end = start;
        }
        Ok((
            start,
            vec![Segment::arc(end, arc.center, arc.direction, sweep.to_radians())],
        ))
    }

    fn plan_polyline(&self, polyline: &Polyline) -> Planned {
        if polyline.vertices.len() < 2 {
            return Err("polyline with fewer than two vertices");
        }

        let start = polyline.vertices[0];
        let mut cursor = start;
        let mut segments = Vec::new();
        for (_, to, bulge) in polyline.segments() {
            // Segments that print as no movement are folded into the next one.
            if cursor.coincides_with(&to) || self.prints_same(cursor, to) {
                continue;
            }
            let segment = match bulge_to_arc(cursor, to, bulge) {
                Some(arc) if !self.offset_prints_zero(cursor, arc.center) => {
                    Segment::arc(to, arc.center, arc.direction, arc.included_angle.abs())
                }
                _ => Segment::line(to),
            };
            segments.push(segment);
            cursor = to;
        }

        if segments.is_empty() {
            return Err("polyline without any non-zero-length segment");
        }
        Ok((start, segments))
    }

    /// Whether `a` and `b` are written as the same coordinates.
    fn prints_same(&self, a: Point, b: Point) -> bool {
        format_number(a.x, self.precision) == format_number(b.x, self.precision)
            && format_number(a.y, self.precision) == format_number(b.y, self.precision)
    }

    /// Whether the I/J offset from `from` to `center` is written as zero.
    fn offset_prints_zero(&self, from: Point, center: Point) -> bool {
        is_printed_zero(&format_number(center.x - from.x, self.precision))
            && is_printed_zero(&format_number(center.y - from.y, self.precision))
    }
}

type Planned = Result<(Point, Vec<Segment>), &'static str>;

fn is_printed_zero(text: &str) -> bool {
    text.bytes().all(|b| b == b'0' || b == b'.')
}
