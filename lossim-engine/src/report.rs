//! Human-readable single-run report.

use std::io::{self, Write};

use lossim_config::SimulationParams;
use lossim_simulator::RunOutcome;

const UNDEFINED: &str = "undefined";

/// Writes the input parameters and run statistics. Ratios with a zero
/// denominator are printed as `undefined`.
pub fn write_report<W: Write>(
    out: &mut W,
    params: &SimulationParams,
    seed: u64,
    outcome: &RunOutcome,
) -> io::Result<()> {
    let summary = &outcome.summary;

    writeln!(out, "Multiple Server Queueing System with Loss Simulation Report")?;
    writeln!(out)?;
    writeln!(out, "Input parameters")?;
    writeln!(out, "Number of servers: {:>11} servers", params.servers)?;
    writeln!(out, "Mean interarrival time: {:>13.6} seconds", params.mean_interarrival)?;
    writeln!(out, "Mean service time: {:>18.6} seconds", params.mean_service)?;
    writeln!(out, "Stop accepting arrivals at: {:.6} seconds", params.closing_time)?;
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out)?;
    writeln!(out, "Simulation stats")?;
    writeln!(out, "Number of customers lost: {:>5} customers", summary.customers_lost)?;
    writeln!(out, "Number of customers served: {} customers", summary.customers_served)?;
    writeln!(out, "Total customers: {:>22}", summary.total_customers())?;
    writeln!(
        out,
        "Blocking probability: {:>14}",
        percent(summary.blocking_probability())
    )?;
    writeln!(
        out,
        "Average server utilisation: {}",
        percent(summary.utilization())
    )?;
    writeln!(
        out,
        "Realized mean interarrival time: {}",
        seconds(summary.mean_interarrival())
    )?;
    writeln!(
        out,
        "Realized arrival rate: {}",
        match summary.arrival_rate() {
            Some(rate) => format!("{rate:.6} per second"),
            None => UNDEFINED.to_string(),
        }
    )?;
    writeln!(out, "Duration of simulation: {:>16.6} seconds", summary.duration)?;
    writeln!(out, "Trace digest: {}", outcome.digest)?;
    Ok(())
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(ratio) => format!("{:.6}%", ratio * 100.0),
        None => UNDEFINED.to_string(),
    }
}

fn seconds(value: Option<f64>) -> String {
    match value {
        Some(time) => format!("{time:.6} seconds"),
        None => UNDEFINED.to_string(),
    }
}
