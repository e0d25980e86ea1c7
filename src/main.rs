use clap::Parser;
use dxf2gcode::cli::{self, Args};
use dxf2gcode::init_logging;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose)?;

    cli::run(&args)
}
