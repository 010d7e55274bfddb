//! `atm-sim` - command-line reporter for the ATM simulator
//!
//! Streams each event as a line of text, then prints a run summary.

mod reporter;

use anyhow::{Context, Result};
use atm_simulator_core::{Orchestrator, SimulationConfig};
use clap::Parser;
use reporter::TextReporter;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "atm-sim")]
#[command(about = "Simulate customers and ATMs with failures, depletion and maintenance")]
#[command(version)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of customers (1-50)
    #[arg(long)]
    customers: Option<usize>,

    /// Number of ATMs (1-10)
    #[arg(long)]
    atms: Option<usize>,

    /// Maximum number of rounds
    #[arg(long, conflicts_with = "unbounded")]
    max_rounds: Option<usize>,

    /// Run until every ATM is down
    #[arg(long)]
    unbounded: bool,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Sleep through simulated pauses to animate the event stream
    #[arg(long)]
    animate: bool,

    /// Suppress per-event output
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn build_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };

        if let Some(customers) = self.customers {
            config.num_customers = customers;
        }
        if let Some(atms) = self.atms {
            config.num_atms = atms;
        }
        if let Some(max_rounds) = self.max_rounds {
            config.max_rounds = Some(max_rounds);
        }
        if self.unbounded {
            config.max_rounds = None;
        }
        if let Some(seed) = self.seed {
            config.rng_seed = seed;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.build_config()?;
    let mut orchestrator = Orchestrator::new(config).context("invalid simulation config")?;

    let mut reporter = TextReporter::new(std::io::stdout().lock())
        .with_events(!args.quiet && !args.json)
        .with_animation(args.animate);

    let report = orchestrator
        .run_with(&mut reporter)
        .context("simulation failed")?;
    let mut out = reporter.finish().context("writing event stream")?;

    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        reporter::write_summary(&mut out, &report)?;
    }

    Ok(())
}
