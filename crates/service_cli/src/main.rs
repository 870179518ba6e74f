//! auditrix - Command Line Operations for Audit Sampling
//!
//! This is the operational entry point for the sampling engine.
//!
//! # Commands
//!
//! - `auditrix validate --params <file>` - Check parameters against the business rules
//! - `auditrix sample --population <file> --params <file>` - Generate a sample
//! - `auditrix verify --population <file> --params <file> --result <file>` - Re-run a stored plan
//! - `auditrix batch --population <file> --params <a> --params <b>` - Run requests in parallel
//!
//! # Architecture
//!
//! As the service layer, this crate only loads inputs, calls the engine and
//! renders results; all sampling semantics live in `sampling_engine`.

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod loader;

pub use error::{CliError, Result};

use commands::sample::SampleArgs;
use config::CliConfig;

/// Statistical audit sampling CLI
#[derive(Parser)]
#[command(name = "auditrix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "auditrix.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate sampling parameters
    Validate {
        /// Parameter file (JSON or TOML); defaults to the [params] table
        #[arg(short, long)]
        params: Option<String>,
    },

    /// Generate a sample from a population
    Sample {
        /// Population file (JSON array or CSV)
        #[arg(short = 'P', long)]
        population: String,

        /// Parameter file (JSON or TOML); defaults to the [params] table
        #[arg(short, long)]
        params: Option<String>,

        /// Override the RNG seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (json, table)
        #[arg(short, long)]
        format: Option<String>,

        /// Sample even when the parameters fail validation
        #[arg(long)]
        force: bool,
    },

    /// Check that a stored plan reproduces
    Verify {
        /// Population file (JSON array or CSV)
        #[arg(short = 'P', long)]
        population: String,

        /// Parameter file (JSON or TOML); defaults to the [params] table
        #[arg(short, long)]
        params: Option<String>,

        /// Stored result (JSON)
        #[arg(short, long)]
        result: String,
    },

    /// Run several sampling requests in parallel
    Batch {
        /// Population file (JSON array or CSV)
        #[arg(short = 'P', long)]
        population: String,

        /// Parameter files, one request each
        #[arg(short, long = "params", required = true)]
        params: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_with_env_and_validate(Path::new(&cli.config))
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.cli.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    debug!(config = %cli.config, "Configuration loaded");

    match cli.command {
        Commands::Validate { params } => commands::validate::run(&config, params.as_deref()),
        Commands::Sample {
            population,
            params,
            seed,
            output,
            format,
            force,
        } => commands::sample::run(
            &config,
            &SampleArgs {
                population,
                params,
                seed,
                output,
                format,
                force,
            },
        ),
        Commands::Verify {
            population,
            params,
            result,
        } => commands::verify::run(&config, &population, params.as_deref(), &result),
        Commands::Batch { population, params } => {
            commands::batch::run(&config, &population, &params)
        }
    }?;

    Ok(())
}
