//! Polyline bulge to arc conversion.
//!
//! A bulge is `tan(θ/4)` where θ is the arc's included angle; positive
//! bulges turn counter-clockwise. Stateless so it can be checked on its own.

use dxf2gcode_core::{ArcDirection, Point, LENGTH_EPSILON};

/// Bulges whose sagitta (mm) is below this are cut as straight lines.
pub const BULGE_SAGITTA_EPSILON: f64 = 1e-6;

/// The arc described by a bulged polyline segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulgeArc {
    pub center: Point,
    pub radius: f64,
    /// Signed included angle in radians (`4 * atan(bulge)`).
    pub included_angle: f64,
    pub direction: ArcDirection,
}

/// Arc through `from` and `to` with the given bulge.
///
/// Returns `None` when the segment is straight: zero-length chord, or a
/// bulge too small to deviate measurably from the chord.
pub fn bulge_to_arc(from: Point, to: Point, bulge: f64) -> Option<BulgeArc> {
    let chord = from.distance_to(&to);
    if chord <= LENGTH_EPSILON || (bulge.abs() * chord / 2.0) < BULGE_SAGITTA_EPSILON {
        return None;
    }

    let included_angle = 4.0 * bulge.atan();
    let half = included_angle / 2.0;
    let radius = (chord / 2.0) / half.sin().abs();

    // Distance from chord midpoint to center, positive towards the left
    // of the travel direction.
    let offset = (chord / 2.0) / half.tan();
    let left = Point::new(-(to.y - from.y) / chord, (to.x - from.x) / chord);
    let mid = from.midpoint(&to);
    let center = Point::new(mid.x + left.x * offset, mid.y + left.y * offset);

    Some(BulgeArc {
        center,
        radius,
        included_angle,
        direction: ArcDirection::from_sign(bulge),
    })
}
