//! # dxf2gcode Core
//!
//! Core types shared by every stage of the drawing-to-G-code pipeline:
//! 2D points and arc directions, DXF drawing units, and the error and
//! diagnostic types reported by a conversion run.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{
    Diagnostic, DiagnosticKind, DrawingError, EntityLocator, Error, Result, TemplateKind,
};
pub use geometry::{ArcDirection, Point, LENGTH_EPSILON};
pub use units::DrawingUnit;
