//! # dxf2gcode
//!
//! Converts 2D DXF drawings into G-code for laser cutters.
//!
//! ## Architecture
//!
//! dxf2gcode is organized as a workspace with multiple crates:
//!
//! 1. **dxf2gcode-core** - points, drawing units, errors and diagnostics
//! 2. **dxf2gcode-designer** - DXF reading, cut path planning, G-code emission
//! 3. **dxf2gcode-camtools** - template splicing, single and batch conversion
//! 4. **dxf2gcode-settings** - configuration files
//! 5. **dxf2gcode** - command-line binary that integrates all crates

pub mod cli;

pub use dxf2gcode_camtools::{
    convert_batch, BatchJob, BatchOutcome, Conversion, ConversionReport, LaserCutter,
    ProgramConfig,
};
pub use dxf2gcode_core::{Diagnostic, DiagnosticKind, DrawingUnit, Error, Result};
pub use dxf2gcode_designer::{LaserMode, PathOrdering};
pub use dxf2gcode_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string shown by `--version`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

/// Initialize logging
///
/// Logs go to stderr so a program written to stdout stays clean.
/// `RUST_LOG` takes precedence; otherwise `verbosity` selects
/// warn (0), info (1) or debug (2+).
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .with_level(true)
        .with_line_number(verbosity > 1)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
