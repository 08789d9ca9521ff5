//! Run modes: a single run with a text report, or a parameter sweep to CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use opentelemetry::KeyValue;
use tracing::{info, instrument, warn};

use lossim_config::LossimConfig;
use lossim_core::variates::{time_derived_seed, ExponentialVariates};
use lossim_simulator::sweep::{sweep, SweepRow};
use lossim_simulator::{RunOutcome, Simulator};
use lossim_telemetry::{EventLogger, MetricsRecorder};

use crate::export::SweepCsvWriter;
use crate::report::write_report;
use crate::EngineError;

/// Loads and validates the configuration at `path`.
///
/// Nothing is logged here: callers usually install the subscriber from the
/// loaded telemetry settings.
pub fn load_config(path: &Path) -> Result<LossimConfig, EngineError> {
    Ok(LossimConfig::load_from_path(path)?)
}

/// Runs the simulation once and writes the report to `report_path`.
///
/// The report is opened before the run starts so that an unwritable destination
/// fails fast. When `validate_hash` is given, the trace digest must match it.
#[instrument(level = "info", name = "run_single_mode", skip(config, metrics))]
pub fn run_single_mode(
    config: &LossimConfig,
    report_path: &Path,
    validate_hash: Option<&str>,
    metrics: &MetricsRecorder,
) -> Result<RunOutcome, EngineError> {
    let mut report = create_output(report_path)?;

    let params = &config.simulation;
    let seed = params.seed.unwrap_or_else(time_derived_seed);
    info!(seed, servers = params.servers, "starting simulation");

    let mut simulator = Simulator::new(params, ExponentialVariates::seeded(seed))?;
    let outcome = simulator.run();

    write_report(&mut report, params, seed, &outcome)?;
    report.flush()?;
    metrics.record_summary(&outcome.summary);

    EventLogger::log_event(
        "simulation_complete",
        vec![
            KeyValue::new("seed", seed.to_string()),
            KeyValue::new("events", outcome.events as i64),
            KeyValue::new("customers_lost", outcome.summary.customers_lost as i64),
            KeyValue::new("final_hash", outcome.digest.clone()),
        ],
    );

    if let Some(expected) = validate_hash {
        if !expected.eq_ignore_ascii_case(&outcome.digest) {
            warn!(expected, actual = %outcome.digest, "trace digest mismatch");
            return Err(EngineError::HashMismatch {
                expected: expected.to_string(),
                actual: outcome.digest,
            });
        }
    }

    Ok(outcome)
}

/// Runs the configured sweep and writes one CSV row per run to `output_path`.
#[instrument(level = "info", name = "run_sweep_mode", skip(config, metrics))]
pub fn run_sweep_mode(
    config: &LossimConfig,
    output_path: &Path,
    metrics: &MetricsRecorder,
) -> Result<Vec<SweepRow>, EngineError> {
    let mut writer = SweepCsvWriter::new(create_output(output_path)?)?;

    let rows = sweep(&config.simulation, &config.sweep)?;
    for row in &rows {
        writer.write_row(row)?;
        metrics.record_summary(&row.summary);
        EventLogger::log_event(
            "sweep_row",
            vec![
                KeyValue::new("iteration", row.iteration as i64),
                KeyValue::new("mean_interarrival", row.mean_interarrival),
                KeyValue::new("seed", row.seed.to_string()),
                KeyValue::new("customers_lost", row.summary.customers_lost as i64),
            ],
        );
    }
    writer.finish()?.flush()?;

    EventLogger::log_event(
        "sweep_complete",
        vec![
            KeyValue::new("rows", rows.len() as i64),
            KeyValue::new("output", output_path.display().to_string()),
        ],
    );
    Ok(rows)
}

fn create_output(path: &Path) -> Result<BufWriter<File>, EngineError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| EngineError::OutputUnavailable {
            path: path.to_path_buf(),
            source,
        })
}
