//! Property-based checks of the emitted program structure.

use dxf2gcode_core::{EntityLocator, Point};
use dxf2gcode_designer::{
    Arc, ArcDirection, Circle, EmitterOptions, Entity, GcodeEmitter, Line, PathOrdering,
    PathPlanner, Polyline, SourceEntity,
};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), -500.0..500.0f64]
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn entity() -> impl Strategy<Value = Entity> {
    prop_oneof![
        (point(), point()).prop_map(|(a, b)| Entity::Line(Line::new(a, b))),
        // Same point twice: always degenerate
        point().prop_map(|a| Entity::Line(Line::new(a, a))),
        (point(), prop_oneof![Just(0.0), 0.1..100.0f64])
            .prop_map(|(c, r)| Entity::Circle(Circle::new(c, r))),
        (
            point(),
            prop_oneof![Just(0.00001), 0.1..100.0f64],
            0.0..360.0f64,
            prop_oneof![Just(0.0), Just(0.00001), Just(359.99999), 0.0..360.0f64],
            any::<bool>()
        )
            .prop_map(|(c, r, start, sweep, ccw)| {
                let direction = if ccw {
                    ArcDirection::CounterClockwise
                } else {
                    ArcDirection::Clockwise
                };
                let end = if ccw { start + sweep } else { start - sweep };
                Entity::Arc(Arc::new(c, r, start, end, direction))
            }),
        (
            prop::collection::vec(point(), 0..6),
            prop::collection::vec(prop_oneof![Just(0.0), -2.0..2.0f64], 0..6),
            any::<bool>()
        )
            .prop_map(|(v, b, closed)| Entity::Polyline(Polyline::with_bulges(v, b, closed))),
    ]
}

fn sources(entities: Vec<Entity>) -> Vec<SourceEntity> {
    entities
        .into_iter()
        .enumerate()
        .map(|(i, e)| {
            let locator = EntityLocator::new(e.type_name(), None, i + 1);
            SourceEntity::new(e, locator, "0")
        })
        .collect()
}

fn ordering() -> impl Strategy<Value = PathOrdering> {
    prop_oneof![
        Just(PathOrdering::FileOrder),
        Just(PathOrdering::NearestNeighbor)
    ]
}

/// Property: one rapid per planned path, and every entity is either a path
/// or a diagnostic
#[test]
fn proptest_rapid_count_matches_paths() {
    proptest!(|(entities in prop::collection::vec(entity(), 0..12), order in ordering())| {
        let sources = sources(entities);
        let planned = PathPlanner::new(order).plan(&sources);
        let gcode = GcodeEmitter::default().emit(&planned.paths);

        let rapids = gcode.lines().filter(|l| l.starts_with("G0 ")).count();
        prop_assert_eq!(rapids, planned.paths.len());
        prop_assert_eq!(planned.paths.len() + planned.diagnostics.len(), sources.len());
    });
}

/// Property: laser on and off strictly alternate, one pair per path, and
/// no move is cut with the laser off
#[test]
fn proptest_laser_on_off_balanced() {
    proptest!(|(entities in prop::collection::vec(entity(), 0..12), order in ordering())| {
        let planned = PathPlanner::new(order).plan(&sources(entities));
        let gcode = GcodeEmitter::new(EmitterOptions::default()).emit(&planned.paths);

        let mut laser_on = false;
        let mut pairs = 0;
        for line in gcode.lines() {
            if line.starts_with("M4 ") {
                prop_assert!(!laser_on, "laser switched on twice");
                laser_on = true;
            } else if line == "M5" {
                prop_assert!(laser_on, "laser switched off while off");
                laser_on = false;
                pairs += 1;
            } else if line.starts_with("G1 ") || line.starts_with("G2 ") || line.starts_with("G3 ") {
                prop_assert!(laser_on, "cutting move with laser off: {}", line);
            } else if line.starts_with("G0 ") {
                prop_assert!(!laser_on, "rapid with laser on: {}", line);
                prop_assert!(line.ends_with(" S0"));
            }
        }
        prop_assert!(!laser_on);
        prop_assert_eq!(pairs, planned.paths.len());
    });
}

/// Property: nearest-neighbour ordering is a permutation of file order
#[test]
fn proptest_ordering_is_permutation() {
    proptest!(|(entities in prop::collection::vec(entity(), 0..12))| {
        let sources = sources(entities);
        let file = PathPlanner::new(PathOrdering::FileOrder).plan(&sources);
        let nearest = PathPlanner::new(PathOrdering::NearestNeighbor).plan(&sources);

        let mut a: Vec<usize> = file.paths.iter().map(|p| p.source.line).collect();
        let mut b: Vec<usize> = nearest.paths.iter().map(|p| p.source.line).collect();
        prop_assert!(a.windows(2).all(|w| w[0] < w[1]));
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    });
}

/// Property: every arc move has a centre offset that is written as non-zero
#[test]
fn proptest_arcs_have_printable_center() {
    proptest!(|(entities in prop::collection::vec(entity(), 0..12))| {
        let planned = PathPlanner::default().plan(&sources(entities));
        let gcode = GcodeEmitter::default().emit(&planned.paths);

        for line in gcode.lines().filter(|l| l.starts_with("G2 ") || l.starts_with("G3 ")) {
            let words: Vec<&str> = line.split(' ').collect();
            let zero = |prefix: char| {
                words
                    .iter()
                    .find(|w| w.starts_with(prefix))
                    .map(|w| w[1..].bytes().all(|b| b == b'0' || b == b'.'))
                    .unwrap_or(true)
            };
            prop_assert!(!(zero('I') && zero('J')), "zero-radius arc: {}", line);
        }
    });
}
