//! # dxf2gcode CAM Tools
//!
//! Turns drawings into complete laser programs.
//!
//! - **Templates**: splices user header/footer G-code around a program body
//! - **Laser Cutter**: runs read, plan, emit and splice for one drawing and
//!   reports what was skipped
//! - **Batch**: converts many drawings independently on a worker pool

pub mod batch;
pub mod laser_cutter;
pub mod templates;

pub use batch::{convert_batch, default_output_path, BatchJob, BatchOutcome};
pub use laser_cutter::{Conversion, ConversionReport, LaserCutter, ProgramConfig};
pub use templates::{load_template, TemplateSplicer};
