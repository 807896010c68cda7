//! Peer governance CLI
//!
//! Generates genesis files and replays governance calls on a simulated chain.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use peergov_cli::genesis::{generate_genesis_toml, GenesisFile};
use peergov_cli::replay::replay;
use peergov_cli::script::Script;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "peergov")]
#[command(about = "Validator-set governance tooling")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a genesis configuration with deterministic validator keys
    Genesis {
        /// Number of genesis validators
        #[arg(long, default_value = "4")]
        validators: u32,
    },

    /// Replay a call script on a simulated chain
    Replay {
        /// Genesis TOML file
        #[arg(long)]
        genesis: PathBuf,

        /// Call script TOML file
        #[arg(long)]
        script: PathBuf,

        /// Exit with an error if any call fails
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Genesis { validators } => {
            // Don't initialize tracing for genesis - output goes to stdout
            let toml = generate_genesis_toml(validators).context("generating genesis")?;
            print!("{}", toml);
        }

        Commands::Replay {
            genesis,
            script,
            strict,
        } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();

            let genesis = GenesisFile::load(&genesis)
                .with_context(|| format!("loading genesis {}", genesis.display()))?;
            let script = Script::load(&script)
                .with_context(|| format!("loading script {}", script.display()))?;

            let report = replay(&genesis, &script)?;
            report.print();

            if strict && report.failures() > 0 {
                bail!("{} of {} calls failed", report.failures(), report.outcomes.len());
            }
        }
    }

    Ok(())
}
