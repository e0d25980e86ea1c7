//! G-code generation from cut paths.
//!
//! Every path is framed the same way: a rapid to its start with the laser
//! at zero power, laser on, the cutting moves, laser off. Arc centres are
//! written as I/J offsets from the arc's start point.

use crate::toolpath::{CutPath, Segment};
use dxf2gcode_core::{ArcDirection, Point};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// How the laser is switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaserMode {
    /// `M4`: power scales with actual speed (GRBL laser mode).
    #[default]
    Dynamic,
    /// `M3`: constant power.
    Constant,
}

impl LaserMode {
    /// The laser-on command word.
    pub fn command(self) -> &'static str {
        match self {
            LaserMode::Dynamic => "M4",
            LaserMode::Constant => "M3",
        }
    }
}

impl fmt::Display for LaserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dynamic => write!(f, "dynamic"),
            Self::Constant => write!(f, "constant"),
        }
    }
}

impl FromStr for LaserMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dynamic" | "m4" => Ok(Self::Dynamic),
            "constant" | "m3" => Ok(Self::Constant),
            _ => Err(format!("Unknown laser mode: {}", s)),
        }
    }
}

/// Emitter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterOptions {
    /// Laser power (S word) while cutting.
    pub power: u32,
    /// Cutting feed rate, mm/min.
    pub feed_rate: f64,
    /// Rapid travel rate, mm/min.
    pub rapid_rate: f64,
    /// Decimal places for coordinates, offsets and rates.
    pub precision: usize,
    pub laser_mode: LaserMode,
    /// Emit `;` comments.
    pub annotate: bool,
    /// Emit `G21`/`G90` before the first path.
    pub emit_preamble: bool,
    /// Emit `M30` after the last path.
    pub emit_program_end: bool,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            power: 1000,
            feed_rate: 6000.0,
            rapid_rate: 6000.0,
            precision: 4,
            laser_mode: LaserMode::Dynamic,
            annotate: true,
            emit_preamble: true,
            emit_program_end: true,
        }
    }
}

/// Renders cut paths as a G-code program body.
#[derive(Debug, Clone, Default)]
pub struct GcodeEmitter {
    options: EmitterOptions,
}

impl GcodeEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        Self { options }
    }

    /// The program body for `paths`, in the given order. Every emitted line
    /// ends with `\n`.
    pub fn emit(&self, paths: &[CutPath]) -> String {
        let mut gcode = String::new();

        if self.options.annotate {
            self.write_banner(&mut gcode, paths.len());
        }
        if self.options.emit_preamble {
            gcode.push_str("G21\n");
            gcode.push_str("G90\n");
        }
        for path in paths {
            self.write_path(&mut gcode, path);
        }
        if self.options.emit_program_end {
            gcode.push_str("M30\n");
        }

        tracing::debug!(paths = paths.len(), bytes = gcode.len(), "emitted G-code body");
        gcode
    }

    fn write_banner(&self, gcode: &mut String, path_count: usize) {
        let o = &self.options;
        gcode.push_str("; dxf2gcode\n");
        let _ = writeln!(
            gcode,
            "; power S{} ({} {}), feed F{}, rapid F{}",
            o.power,
            o.laser_mode,
            o.laser_mode.command(),
            self.number(o.feed_rate),
            self.number(o.rapid_rate),
        );
        let _ = writeln!(gcode, "; {} cut paths", path_count);
    }

    fn write_path(&self, gcode: &mut String, path: &CutPath) {
        let o = &self.options;

        if o.annotate {
            let _ = match &path.source.handle {
                Some(handle) => writeln!(
                    gcode,
                    "; {} {} layer {}",
                    path.source.entity_type, handle, path.layer
                ),
                None => writeln!(gcode, "; {} layer {}", path.source.entity_type, path.layer),
            };
        }

        let _ = writeln!(
            gcode,
            "G0 X{} Y{} F{} S0",
            self.number(path.start.x),
            self.number(path.start.y),
            self.number(o.rapid_rate)
        );
        let _ = writeln!(gcode, "{} S{}", o.laser_mode.command(), o.power);

        for (from, segment) in path.segments_with_start() {
            self.write_segment(gcode, from, segment);
        }

        gcode.push_str("M5\n");
    }

    fn write_segment(&self, gcode: &mut String, from: Point, segment: &Segment) {
        let feed = self.number(self.options.feed_rate);
        let _ = match segment {
            Segment::Line { end } => writeln!(
                gcode,
                "G1 X{} Y{} F{}",
                self.number(end.x),
                self.number(end.y),
                feed
            ),
            Segment::Arc {
                end,
                center,
                direction,
                ..
            } => {
                let word = match direction {
                    ArcDirection::Clockwise => "G2",
                    ArcDirection::CounterClockwise => "G3",
                };
                writeln!(
                    gcode,
                    "{} X{} Y{} I{} J{} F{}",
                    word,
                    self.number(end.x),
                    self.number(end.y),
                    self.number(center.x - from.x),
                    self.number(center.y - from.y),
                    feed
                )
            }
        };
    }

    /// Formats `value` with the configured precision.
    pub fn number(&self, value: f64) -> String {
        format_number(value, self.options.precision)
    }
}

/// Fixed-point formatting that never prints a negative zero.
pub fn format_number(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}
