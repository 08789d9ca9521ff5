use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use lossim_config::LossimConfig;
use lossim_engine::{load_config, run_single_mode, run_sweep_mode};
use lossim_telemetry::{EventLogger, MetricsRecorder};

#[derive(Parser)]
#[command(version, about = "Multi-server loss system simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one simulation and write a text report
    Run(RunArgs),
    /// Re-run the simulation over increasing mean interarrival times and write a CSV
    Sweep(SweepArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Parameter file: YAML (.yaml/.yml) or the four-value legacy layout
    #[arg(short, long, default_value = "config.in")]
    pub config: PathBuf,
    /// Fixed RNG seed (overrides the configuration)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Report destination
    #[arg(short, long, default_value = "report.txt")]
    pub report: PathBuf,
    /// Fail unless the run's trace digest equals this hex string
    #[arg(long)]
    pub validate_hash: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// CSV destination
    #[arg(short, long, default_value = "sim_data.csv")]
    pub output: PathBuf,
    /// Number of runs
    #[arg(long)]
    pub iterations: Option<usize>,
    /// Increment of the mean interarrival time between runs
    #[arg(long)]
    pub step: Option<f64>,
    /// Worker threads (0 = one per CPU)
    #[arg(long)]
    pub workers: Option<usize>,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => {
            let config = prepare(&args.config, |_| {})?;
            let metrics = MetricsRecorder::new()?;
            let outcome = run_single_mode(
                &config,
                &args.report,
                args.validate_hash.as_deref(),
                &metrics,
            )?;
            info!(
                report = %args.report.display(),
                digest = %outcome.digest,
                "report written"
            );
            print_metrics(&config, &metrics)
        }
        Commands::Sweep(args) => {
            let config = prepare(&args.config, |config| {
                if let Some(iterations) = args.iterations {
                    config.sweep.iterations = iterations;
                }
                if let Some(step) = args.step {
                    config.sweep.interarrival_step = step;
                }
                if let Some(workers) = args.workers {
                    config.sweep.workers = workers;
                }
            })?;
            let metrics = MetricsRecorder::new()?;
            let rows = run_sweep_mode(&config, &args.output, &metrics)?;
            info!(rows = rows.len(), output = %args.output.display(), "sweep written");
            print_metrics(&config, &metrics)
        }
    }
}

/// Loads the configuration, applies command-line overrides and installs logging.
fn prepare(
    args: &ConfigArgs,
    overrides: impl FnOnce(&mut LossimConfig),
) -> anyhow::Result<LossimConfig> {
    let mut config = load_config(&args.config)
        .with_context(|| format!("loading parameters from {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    overrides(&mut config);
    let config = config.validated()?;

    EventLogger::init(&config.telemetry.log_level);
    info!(
        path = %args.config.display(),
        servers = config.simulation.servers,
        seed = ?config.simulation.seed,
        "configuration loaded"
    );
    Ok(config)
}

fn print_metrics(config: &LossimConfig, metrics: &MetricsRecorder) -> anyhow::Result<()> {
    if config.telemetry.metrics {
        print!("{}", metrics.gather_metrics()?);
    }
    Ok(())
}
