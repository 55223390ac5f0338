//! Multi-State Simulation CLI
//!
//! Runs a scenario file to completion and writes the realized history.

use clap::Parser;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use multistate_core::output::{HistoryFormat, HistoryWriter, OccupancySummary};
use multistate_core::{ScenarioConfig, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "multistate")]
#[command(about = "Discrete-event multi-state simulation")]
struct Args {
    /// Scenario file (TOML)
    #[arg(long)]
    scenario: PathBuf,

    /// Random seed, overriding the scenario's
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the history (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// History output format
    #[arg(long, value_enum, default_value_t = HistoryFormat::Jsonl)]
    format: HistoryFormat,

    /// Log a per-state occupancy summary when the run completes
    #[arg(long)]
    summary: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut scenario = ScenarioConfig::from_file(&args.scenario)?;
    if let Some(seed) = args.seed {
        scenario = scenario.with_seed(seed);
    }
    tracing::info!("Loaded scenario {}", args.scenario.display());

    let mut sim = Simulation::from_scenario(&scenario)?;
    let summary = sim.run()?;
    tracing::info!(
        events = summary.events_processed,
        final_clock = summary.final_clock.value(),
        "Run finished"
    );

    if args.summary {
        let occupancy =
            OccupancySummary::from_history(sim.history(), sim.registry().len(), sim.individuals());
        tracing::info!("Occupancy summary:\n{}", occupancy.to_json()?);
    }

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut writer = HistoryWriter::new(sink, args.format);
    writer.write_all(sim.history())?;
    writer.flush()?;
    if let Some(path) = &args.output {
        tracing::info!("Wrote {} entries to {}", writer.entry_count(), path.display());
    }
    Ok(())
}
