#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs batches of Fire Escape scenarios.

mod report;
mod scenario_input;

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use fire_escape_system_simulation::run_scenario;
use fire_escape_world::{Grid, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use report::ScenarioReport;
use scenario_input::Scenario;

/// Supported batch encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Scenario count, then `rows columns` and the rows of every scenario.
    Text,
    /// Versioned TOML manifest with named scenarios.
    Toml,
}

/// Supported report encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `Y`/`N` line per scenario.
    Symbols,
    /// JSON array of scenario records.
    Json,
}

/// Decides whether the agent escapes the fire in every scenario of a batch.
#[derive(Debug, Parser)]
#[command(name = "fire-escape", long_about = None)]
struct CliArgs {
    /// Batch file to read. Standard input is used when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Encoding of the batch.
    #[arg(short, long, value_enum, default_value_t = InputFormat::Text)]
    format: InputFormat,
    /// Encoding of the report written to standard output.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Symbols)]
    output: OutputFormat,
    /// Raises log verbosity; repeat for more detail. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the Fire Escape command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let contents = read_batch(args.input.as_deref())?;
    let scenarios = match args.format {
        InputFormat::Text => scenario_input::parse_text(&contents),
        InputFormat::Toml => scenario_input::parse_manifest(&contents),
    }
    .context("failed to read scenario batch")?;

    let reports = run_batch(scenarios)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.output {
        OutputFormat::Symbols => report::write_symbols(&mut out, &reports),
        OutputFormat::Json => report::write_json(&mut out, &reports),
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_batch(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario batch at {}", path.display())),
        None => {
            let mut contents = String::new();
            let _ = io::stdin()
                .read_to_string(&mut contents)
                .context("failed to read scenario batch from standard input")?;
            Ok(contents)
        }
    }
}

/// Validates every board before the first scenario runs, so a malformed batch
/// produces no partial report.
fn run_batch(scenarios: Vec<Scenario>) -> Result<Vec<ScenarioReport>> {
    let mut boards = Vec::with_capacity(scenarios.len());
    for (index, scenario) in scenarios.into_iter().enumerate() {
        let grid = Grid::from_rows(&scenario.rows).with_context(|| {
            format!(
                "scenario {} ({}) has an invalid board",
                index + 1,
                scenario.name
            )
        })?;
        boards.push((scenario.name, grid));
    }

    Ok(boards
        .into_iter()
        .enumerate()
        .map(|(index, (name, grid))| {
            let outcome = run_scenario(World::from_grid(&grid));
            info!(index, name = %name, outcome = %outcome.symbol(), "scenario resolved");
            ScenarioReport::new(index, name, outcome)
        })
        .collect())
}
