//! mind-sim - run agent decision scenarios from YAML.
//!
//! - `mind-sim run <scenario>` - tick a scenario and print the active state per tick
//! - `mind-sim check <scenario>` - validate a scenario without running it

mod behavior;
mod runner;
mod scenario;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use crate::runner::RunOptions;
use crate::scenario::{Scenario, Strategy};

#[derive(Parser)]
#[command(name = "mind-sim")]
#[command(about = "Run agent decision scenarios", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario
    Run {
        /// Scenario file (YAML)
        scenario: PathBuf,

        /// Override the number of ticks
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the tick delta in seconds
        #[arg(long)]
        dt: Option<f32>,

        /// Override the FSM tie-break seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a scenario
    Check {
        /// Scenario file (YAML)
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            dt,
            seed,
            json,
        } => {
            let loaded = Scenario::load(&scenario)?;
            let defaults = RunOptions::from_scenario(&loaded);
            let options = RunOptions {
                ticks: ticks.unwrap_or(defaults.ticks),
                dt: dt.unwrap_or(defaults.dt),
                seed: seed.unwrap_or(defaults.seed),
            };
            run_scenario(&loaded, &options, json)
        }
        Commands::Check { scenario } => check_scenario(&scenario),
    }
}

fn run_scenario(scenario: &Scenario, options: &RunOptions, json: bool) -> Result<()> {
    tracing::info!(
        strategy = ?scenario.strategy,
        ticks = options.ticks,
        dt = options.dt,
        seed = options.seed,
        "Running scenario"
    );

    let report = runner::run(scenario, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for row in &report.ticks {
        println!("{:>5}  {}", row.tick, row.state.as_deref().unwrap_or("-"));
    }
    println!();
    println!("{}", report.summary());
    Ok(())
}

fn check_scenario(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let strategy = match scenario.strategy {
        Strategy::Fsm => "fsm",
        Strategy::Utility => "utility",
    };
    println!(
        "ok: {} scenario, {} states, {} transitions, {} script steps",
        strategy,
        scenario.states.len(),
        scenario.transitions.len(),
        scenario.script.len()
    );
    Ok(())
}
