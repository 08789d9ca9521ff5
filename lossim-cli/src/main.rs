//! ## lossim-cli
//! Command-line entry point: single runs with a text report, or parameter
//! sweeps written to CSV.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::run_command(cli)
}
