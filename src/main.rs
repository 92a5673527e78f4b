//! Runs a force profile sweep described by a YAML file.
//!
//! ```bash
//! kforce demos/k39_molasses.yaml --output-dir out
//! ```

use clap::Parser;
use kforce::output::{self, plot::PlotMode};
use kforce::{LogProgress, Result, SweepConfiguration};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Laser cooling force profiles for potassium
#[derive(Parser)]
#[command(name = "kforce")]
#[command(version)]
#[command(about = "Sweeps laser cooling force profiles over velocity and position")]
struct Cli {
    /// Path to the sweep configuration
    config: PathBuf,

    /// Directory the results are written to
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Do not produce figures
    #[arg(long)]
    no_plot: bool,

    /// Write gnuplot scripts without rendering them
    #[arg(long)]
    script_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(err) = run(&cli) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = SweepConfiguration::load(&cli.config)?;
    if cli.no_plot {
        config.output.plot = false;
    }
    let plot_mode = if cli.script_only {
        PlotMode::ScriptOnly
    } else {
        PlotMode::Render
    };

    let start = Instant::now();
    let results = config.run(&mut LogProgress::default())?;
    info!(
        profiles = results.len(),
        elapsed_s = start.elapsed().as_secs_f64(),
        "sweep finished"
    );

    let isotope = config.isotope()?;
    let title = format!("{} force profiles", isotope);
    output::write_results(
        &results,
        &config.natural_units()?,
        &config.output,
        &title,
        plot_mode,
        &cli.output_dir,
    )?;
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
