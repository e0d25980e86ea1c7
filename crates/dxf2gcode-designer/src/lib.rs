//! # dxf2gcode Designer
//!
//! The geometric heart of the converter:
//!
//! 1. **entity** - the closed set of drawing primitives (line, circle, arc,
//!    lightweight polyline)
//! 2. **dxf_parser** - decodes a DXF group-code stream into entities
//! 3. **toolpath** - turns entities into ordered cut paths
//! 4. **gcode_gen** - renders cut paths as a G-code program body
//!
//! Each stage is a pure function of its input; nothing is shared between
//! conversions.

pub mod dxf_parser;
pub mod entity;
pub mod gcode_gen;
pub mod toolpath;

pub use dxf_parser::{DxfDrawing, DxfParser, ParserOptions};
pub use entity::{Arc, Circle, Entity, Line, Polyline, SourceEntity};
pub use gcode_gen::{format_number, EmitterOptions, GcodeEmitter, LaserMode};
pub use toolpath::{
    bulge_to_arc, rapid_length, BulgeArc, CutPath, PathOrdering, PathPlanner, PlannedPaths,
    Segment,
};

pub use dxf2gcode_core::{ArcDirection, Point};
