//! Laser Cutter
//!
//! Converts one DXF drawing into a complete laser program: read the
//! drawing, plan the cut paths, emit the body and splice the templates.
//! Unsupported and degenerate entities do not stop the run; they are
//! collected in the [`ConversionReport`].

use crate::templates::TemplateSplicer;
use dxf2gcode_core::{Diagnostic, DiagnosticKind, DrawingUnit, Error, Result};
use dxf2gcode_designer::{
    DxfParser, EmitterOptions, GcodeEmitter, LaserMode, ParserOptions, PathOrdering, PathPlanner,
};
use std::path::Path;
use std::time::Duration;

/// Largest supported number of decimal places.
pub const MAX_PRECISION: usize = 8;

/// Parameters for one program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramConfig {
    /// Laser power (S word).
    pub power: u32,
    /// Cutting feed rate in mm/min.
    pub feed_rate: f64,
    /// Rapid travel rate in mm/min.
    pub rapid_rate: f64,
    /// Decimal places for coordinates, offsets and rates.
    pub precision: usize,
    pub laser_mode: LaserMode,
    pub ordering: PathOrdering,
    /// Emit `;` comments.
    pub annotate: bool,
    /// Unit assumed for drawings that declare none.
    pub fallback_unit: DrawingUnit,
    /// Header template text. Replaces the `G21`/`G90` preamble.
    pub header: Option<String>,
    /// Footer template text. Replaces the closing `M30`.
    pub footer: Option<String>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            power: 1000,
            feed_rate: 6000.0,
            rapid_rate: 6000.0,
            precision: 4,
            laser_mode: LaserMode::Dynamic,
            ordering: PathOrdering::FileOrder,
            annotate: true,
            fallback_unit: DrawingUnit::Millimeters,
            header: None,
            footer: None,
        }
    }
}

impl ProgramConfig {
    /// Reject rates and precisions the emitter cannot express.
    pub fn validate(&self) -> Result<()> {
        if !(self.feed_rate.is_finite() && self.feed_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "feed rate must be positive, got {}",
                self.feed_rate
            )));
        }
        if !(self.rapid_rate.is_finite() && self.rapid_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "rapid rate must be positive, got {}",
                self.rapid_rate
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(Error::InvalidConfig(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }
        Ok(())
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            fallback_unit: self.fallback_unit,
        }
    }

    pub fn emitter_options(&self) -> EmitterOptions {
        EmitterOptions {
            power: self.power,
            feed_rate: self.feed_rate,
            rapid_rate: self.rapid_rate,
            precision: self.precision,
            laser_mode: self.laser_mode,
            annotate: self.annotate,
            emit_preamble: self.header.is_none(),
            emit_program_end: self.footer.is_none(),
        }
    }
}

/// What a conversion did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// Unit the drawing was read in.
    pub unit: DrawingUnit,
    /// Supported entities read from the drawing.
    pub entities_read: usize,
    /// Cut paths in the program.
    pub paths: usize,
    /// Total cutting distance in mm.
    pub cut_length: f64,
    /// Total rapid travel in mm, starting from the origin.
    pub rapid_length: f64,
    /// Estimated run time in seconds at the configured rates.
    pub estimated_seconds: f64,
    pub diagnostics: Vec<Diagnostic>,
}

impl ConversionReport {
    pub fn estimated_time(&self) -> Duration {
        Duration::try_from_secs_f64(self.estimated_seconds).unwrap_or_default()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// One-line summary for logs and the terminal.
    pub fn summary(&self) -> String {
        let secs = self.estimated_time().as_secs_f64().round() as u64;
        let mut summary = format!(
            "{} paths from {} entities, cut {:.1} mm, travel {:.1} mm, est. {}:{:02}",
            self.paths,
            self.entities_read,
            self.cut_length,
            self.rapid_length,
            secs / 60,
            secs % 60
        );
        let unsupported = self.count(DiagnosticKind::UnsupportedEntity);
        let degenerate = self.count(DiagnosticKind::DegenerateGeometry);
        if unsupported > 0 {
            summary.push_str(&format!(", {} unsupported skipped", unsupported));
        }
        if degenerate > 0 {
            summary.push_str(&format!(", {} degenerate dropped", degenerate));
        }
        summary
    }
}

/// A finished program and its report.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub program: String,
    pub report: ConversionReport,
}

/// Runs the conversion pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct LaserCutter {
    config: ProgramConfig,
}

impl LaserCutter {
    pub fn new(config: ProgramConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Convert DXF text.
    pub fn convert_str(&self, content: &str) -> Result<Conversion> {
        self.convert_bytes(content.as_bytes())
    }

    /// Convert raw DXF file content.
    pub fn convert_bytes(&self, content: &[u8]) -> Result<Conversion> {
        let drawing = DxfParser::parse_bytes(content, &self.config.parser_options())?;
        let planned = PathPlanner::new(self.config.ordering)
            .with_precision(self.config.precision)
            .plan(&drawing.entities);
        let body = GcodeEmitter::new(self.config.emitter_options()).emit(&planned.paths);
        let program = TemplateSplicer::new(
            self.config.header.as_deref(),
            self.config.footer.as_deref(),
        )
        .splice(&body);

        let cut_length = planned.cut_length();
        let rapid_length = planned.rapid_length();
        let estimated_seconds =
            (cut_length / self.config.feed_rate + rapid_length / self.config.rapid_rate) * 60.0;

        let mut diagnostics = drawing.diagnostics;
        diagnostics.extend(planned.diagnostics);

        let report = ConversionReport {
            unit: drawing.unit,
            entities_read: drawing.entities.len(),
            paths: planned.paths.len(),
            cut_length,
            rapid_length,
            estimated_seconds,
            diagnostics,
        };
        tracing::info!("{}", report.summary());

        Ok(Conversion { program, report })
    }

    /// Read and convert a DXF file.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<Conversion> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "converting drawing");
        let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        self.convert_bytes(&content)
    }
}
