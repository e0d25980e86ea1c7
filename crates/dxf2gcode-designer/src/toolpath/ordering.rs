//! Cut path ordering policies.

use super::CutPath;
use dxf2gcode_core::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order in which cut paths are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathOrdering {
    /// The order the originating entities appear in the drawing.
    #[default]
    #[serde(alias = "file")]
    FileOrder,
    /// Greedy: from the origin, always cut the path whose start is closest
    /// to the current position next. Ties go to the earlier entity. Paths
    /// are never reversed.
    #[serde(alias = "nearest")]
    NearestNeighbor,
}

impl PathOrdering {
    /// Reorder `paths` according to the policy, starting at `origin`.
    pub fn apply(self, paths: Vec<CutPath>, origin: Point) -> Vec<CutPath> {
        match self {
            PathOrdering::FileOrder => paths,
            PathOrdering::NearestNeighbor => nearest_neighbor(paths, origin),
        }
    }
}

fn nearest_neighbor(mut remaining: Vec<CutPath>, origin: Point) -> Vec<CutPath> {
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut position = origin;

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_distance = position.distance_to(&remaining[0].start);
        for (idx, path) in remaining.iter().enumerate().skip(1) {
            let distance = position.distance_to(&path.start);
            if distance < best_distance {
                best = idx;
                best_distance = distance;
            }
        }
        let next = remaining.remove(best);
        position = next.end();
        ordered.push(next);
    }

    ordered
}

impl fmt::Display for PathOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileOrder => write!(f, "file-order"),
            Self::NearestNeighbor => write!(f, "nearest-neighbor"),
        }
    }
}

impl FromStr for PathOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "file-order" | "file_order" => Ok(Self::FileOrder),
            "nearest" | "nearest-neighbor" | "nearest_neighbor" | "nearest-neighbour" => {
                Ok(Self::NearestNeighbor)
            }
            _ => Err(format!("Unknown path ordering: {}", s)),
        }
    }
}
