//! Batch conversion of many drawings.
//!
//! Each drawing is an independent job on the rayon pool; one failing file
//! never affects the others. Outcomes come back in input order.

use crate::laser_cutter::{ConversionReport, LaserCutter};
use dxf2gcode_core::{Error, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// One drawing to convert and where to write its program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl BatchJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Job writing next to the input with a `.gcode` extension.
    pub fn beside(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = default_output_path(&input);
        Self { input, output }
    }
}

/// Result of one batch job.
#[derive(Debug)]
pub struct BatchOutcome {
    pub job: BatchJob,
    pub result: Result<ConversionReport>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// `drawing.dxf` becomes `drawing.gcode` in the same directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("gcode")
}

/// Convert every job in parallel.
pub fn convert_batch(cutter: &LaserCutter, jobs: Vec<BatchJob>) -> Vec<BatchOutcome> {
    tracing::info!(
        jobs = jobs.len(),
        threads = rayon::current_num_threads(),
        "starting batch conversion"
    );

    let outcomes: Vec<BatchOutcome> = jobs
        .into_par_iter()
        .map(|job| {
            let result = run_job(cutter, &job);
            if let Err(e) = &result {
                tracing::error!(input = %job.input.display(), error = %e, "conversion failed");
            }
            BatchOutcome { job, result }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    tracing::info!(
        converted = outcomes.len() - failed,
        failed,
        "batch conversion finished"
    );
    outcomes
}

fn run_job(cutter: &LaserCutter, job: &BatchJob) -> Result<ConversionReport> {
    let conversion = cutter.convert_file(&job.input)?;
    std::fs::write(&job.output, conversion.program.as_bytes())
        .map_err(|e| Error::io(&job.output, e))?;
    tracing::debug!(output = %job.output.display(), "wrote program");
    Ok(conversion.report)
}
