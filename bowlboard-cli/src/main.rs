//! Bowlboard CLI — standings computation and fixture validation.
//!
//! Commands:
//! - `run` — compute standings from a tournament fixture file, print the
//!   report, and save artifacts
//! - `check` — validate a fixture and configuration, reporting what would
//!   be excluded, without publishing standings

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use bowlboard_runner::{
    generate_report, recompute, save_artifacts, InMemoryStore, StandingsConfig,
};

#[derive(Parser)]
#[command(
    name = "bowlboard",
    about = "Bowlboard CLI — standings engine for judged team competitions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute standings from a tournament fixture file.
    Run {
        /// Path to a JSON tournament fixture.
        #[arg(long)]
        fixture: PathBuf,

        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Master seed for coin-flip draws; overrides the config value.
        #[arg(long)]
        seed: Option<u64>,

        /// Count only matches up to this round.
        #[arg(long)]
        through_round: Option<u32>,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Skip writing artifacts to disk.
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
    /// Validate a fixture and configuration without publishing standings.
    Check {
        /// Path to a JSON tournament fixture.
        #[arg(long)]
        fixture: PathBuf,

        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            fixture,
            config,
            seed,
            through_round,
            output_dir,
            no_save,
        } => cmd_run(&fixture, config.as_deref(), seed, through_round, &output_dir, no_save),
        Commands::Check { fixture, config } => cmd_check(&fixture, config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<StandingsConfig> {
    Ok(match path {
        Some(path) => StandingsConfig::load(path)?,
        None => StandingsConfig::default(),
    })
}

fn cmd_run(
    fixture: &Path,
    config_path: Option<&Path>,
    seed: Option<u64>,
    through_round: Option<u32>,
    output_dir: &Path,
    no_save: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(seed) = seed {
        config.master_seed = seed;
    }
    if through_round.is_some() {
        config.through_round = through_round;
    }

    let store = InMemoryStore::load(fixture)?;
    let artifact = recompute(&store, &config)?;

    println!("{}", generate_report(&artifact));

    if !no_save {
        let run_dir = save_artifacts(&artifact, output_dir)?;
        println!("Artifacts saved to {}", run_dir.display());
    }
    Ok(())
}

fn cmd_check(fixture: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let store = InMemoryStore::load(fixture)?;
    let artifact = recompute(&store, &config)?;
    let report = &artifact.report;

    println!(
        "Fixture OK: {} teams, {} matches counted, {} excluded",
        report.standings.len(),
        report.matches_used,
        report.excluded.len()
    );
    for excluded in &report.excluded {
        println!("  would exclude {}: {}", excluded.match_id, excluded.reason);
    }
    if report.matches_used == 0 && report.excluded.is_empty() {
        bail!("fixture has no eligible completed matches");
    }
    Ok(())
}
