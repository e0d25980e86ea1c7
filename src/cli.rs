//! Command-line interface.
//!
//! Settings are layered: built-in defaults, then the config file, then
//! command-line flags.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use dxf2gcode_camtools::{
    convert_batch, default_output_path, BatchJob, LaserCutter, ProgramConfig,
};
use dxf2gcode_core::DrawingUnit;
use dxf2gcode_designer::{LaserMode, PathOrdering};
use dxf2gcode_settings::Config;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Convert DXF drawings into laser-cutter G-code.
#[derive(Parser, Debug, Clone)]
#[command(name = "dxf2gcode")]
#[command(version, long_version = crate::LONG_VERSION)]
pub struct Args {
    /// DXF files to convert
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output file, `-` for stdout (single input only) [default: INPUT with .gcode extension]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Laser power (S value) while cutting [default: 1000]
    #[arg(short, long)]
    pub power: Option<u32>,

    /// Cutting feed rate in mm/min [default: 6000]
    #[arg(short, long = "feed", value_name = "RATE")]
    pub feed: Option<f64>,

    /// Rapid travel rate in mm/min [default: 6000]
    #[arg(short, long = "rapid", value_name = "RATE")]
    pub rapid: Option<f64>,

    /// G-code file to place before the program
    #[arg(long, value_name = "FILE")]
    pub header: Option<PathBuf>,

    /// G-code file to place after the program
    #[arg(long, value_name = "FILE")]
    pub footer: Option<PathBuf>,

    /// Do not use any header template
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Do not use any footer template
    #[arg(long = "no-footer")]
    pub no_footer: bool,

    /// Decimal places for coordinates and rates [default: 4]
    #[arg(long, value_name = "DIGITS")]
    pub precision: Option<usize>,

    /// Path order: file or nearest [default: file]
    #[arg(long, value_name = "ORDER")]
    pub order: Option<PathOrdering>,

    /// Laser mode: dynamic (M4) or constant (M3) [default: dynamic]
    #[arg(long = "laser-mode", value_name = "MODE")]
    pub laser_mode: Option<LaserMode>,

    /// Do not write `;` comments
    #[arg(long = "no-comments")]
    pub no_comments: bool,

    /// Unit for drawings that do not declare one [default: mm]
    #[arg(long, value_name = "UNIT")]
    pub units: Option<DrawingUnit>,

    /// Config file (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    fn writes_stdout(&self) -> bool {
        self.output.as_deref() == Some(Path::new("-"))
    }
}

/// Load the config file named on the command line, or the per-user one if
/// it exists.
pub fn load_config(args: &Args) -> Result<Config> {
    if let Some(path) = &args.config {
        return Config::load_from_file(path)
            .with_context(|| format!("cannot load config {}", path.display()));
    }
    match Config::default_path().filter(|p| p.is_file()) {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("cannot load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Merge defaults, the config file and command-line flags. Validation runs
/// once, on the merged result.
pub fn build_program_config(args: &Args, mut config: Config) -> Result<ProgramConfig> {
    if let Some(power) = args.power {
        config.laser.power = power;
    }
    if let Some(feed) = args.feed {
        config.laser.feed_rate = feed;
    }
    if let Some(rapid) = args.rapid {
        config.laser.rapid_rate = rapid;
    }
    if let Some(mode) = args.laser_mode {
        config.laser.mode = mode;
    }
    if let Some(precision) = args.precision {
        config.output.precision = precision;
    }
    if let Some(order) = args.order {
        config.output.ordering = order;
    }
    if let Some(unit) = args.units {
        config.output.fallback_unit = unit.to_string();
    }
    if args.no_comments {
        config.output.annotate = false;
    }
    if let Some(header) = &args.header {
        config.templates.header = Some(header.clone());
    }
    if let Some(footer) = &args.footer {
        config.templates.footer = Some(footer.clone());
    }
    config.templates.no_header |= args.no_header;
    config.templates.no_footer |= args.no_footer;

    Ok(config.to_program_config()?)
}

/// Run a conversion as described by `args`.
pub fn run(args: &Args) -> Result<()> {
    if args.inputs.len() > 1 && args.output.is_some() {
        bail!("--output can only be used with a single input file");
    }

    let config = load_config(args)?;
    let program = build_program_config(args, config)?;
    tracing::debug!(
        power = program.power,
        feed = program.feed_rate,
        rapid = program.rapid_rate,
        ordering = %program.ordering,
        header = program.header.is_some(),
        footer = program.footer.is_some(),
        "resolved program configuration"
    );
    let cutter = LaserCutter::new(program)?;

    if let [input] = args.inputs.as_slice() {
        convert_one(&cutter, input, args)
    } else {
        convert_many(&cutter, &args.inputs)
    }
}

fn convert_one(cutter: &LaserCutter, input: &Path, args: &Args) -> Result<()> {
    let conversion = cutter
        .convert_file(input)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    if args.writes_stdout() {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(conversion.program.as_bytes())
            .and_then(|_| stdout.flush())
            .context("failed to write program to stdout")?;
    } else {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(input));
        std::fs::write(&output, conversion.program.as_bytes())
            .with_context(|| format!("failed to write {}", output.display()))?;
        eprintln!("{} -> {}", input.display(), output.display());
    }

    eprintln!("{}", conversion.report.summary());
    Ok(())
}

fn convert_many(cutter: &LaserCutter, inputs: &[PathBuf]) -> Result<()> {
    let jobs = inputs.iter().map(BatchJob::beside).collect();
    let outcomes = convert_batch(cutter, jobs);

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => eprintln!(
                "{} -> {}: {}",
                outcome.job.input.display(),
                outcome.job.output.display(),
                report.summary()
            ),
            Err(e) => {
                failed += 1;
                eprintln!("{}: error: {}", outcome.job.input.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} conversions failed", failed, outcomes.len());
    }
    Ok(())
}
