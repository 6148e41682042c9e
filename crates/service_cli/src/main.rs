//! gbm-pricer - Monte Carlo option pricing from the command line
//!
//! # Commands
//!
//! - `gbm-pricer price` - Price a European or arithmetic Asian option
//! - `gbm-pricer check` - Print the resolved configuration
//!
//! Inputs are resolved from defaults, an optional TOML file, `PRICER_*`
//! environment variables and flags, in increasing order of precedence.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use error::Result;

use commands::price::OutputFormat;
use config::Overrides;

/// GBM Monte Carlo option pricer
#[derive(Parser)]
#[command(name = "gbm-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option by Monte Carlo simulation
    Price {
        #[command(flatten)]
        overrides: Overrides,

        /// Also print the closed-form value (European only)
        #[arg(long)]
        reference: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check the resolved configuration
    Check {
        #[command(flatten)]
        overrides: Overrides,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let overrides = match &cli.command {
        Commands::Price { overrides, .. } | Commands::Check { overrides } => overrides,
    };
    let config = config::build_config(cli.config.as_deref(), overrides)
        .context("failed to resolve configuration")?;
    debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Price {
            reference, format, ..
        } => commands::price::run(&config, reference, format),
        Commands::Check { .. } => commands::check::run(&config),
    }
    .context("command failed")?;

    info!("done");
    Ok(())
}
