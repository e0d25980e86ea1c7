//! Cut path planning from drawing entities.

mod bulge;
mod ordering;
mod planner;
mod segment;

pub use bulge::{bulge_to_arc, BulgeArc, BULGE_SAGITTA_EPSILON};
pub use ordering::PathOrdering;
pub use planner::{rapid_length, PathPlanner, PlannedPaths};
pub use segment::Segment;

use dxf2gcode_core::{EntityLocator, Point};

/// One continuous laser cut: a rapid to `start`, then the segments in order.
#[derive(Debug, Clone, PartialEq)]
pub struct CutPath {
    pub start: Point,
    pub segments: Vec<Segment>,
    /// Entity the path was built from.
    pub source: EntityLocator,
    pub layer: String,
}

impl CutPath {
    /// Creates a cut path.
    pub fn new(
        start: Point,
        segments: Vec<Segment>,
        source: EntityLocator,
        layer: impl Into<String>,
    ) -> Self {
        debug_assert!(!segments.is_empty(), "a cut path needs at least one segment");
        Self {
            start,
            segments,
            source,
            layer: layer.into(),
        }
    }

    /// Where the last segment ends.
    pub fn end(&self) -> Point {
        self.segments.last().map(Segment::end).unwrap_or(self.start)
    }

    /// Each segment paired with the point it starts from.
    pub fn segments_with_start(&self) -> impl Iterator<Item = (Point, &Segment)> + '_ {
        let mut from = self.start;
        self.segments.iter().map(move |seg| {
            let start = from;
            from = seg.end();
            (start, seg)
        })
    }

    /// Total cutting length.
    pub fn cut_length(&self) -> f64 {
        self.segments_with_start()
            .map(|(from, seg)| seg.length(from))
            .sum()
    }
}
