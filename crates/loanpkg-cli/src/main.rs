//! loanpkg - loan package contract harness
//!
//! Runs loan package contracts against JSON scope and input files, the way
//! a host platform would invoke them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loanpkg_core::EngineConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

/// loanpkg - loan package contract harness
#[derive(Parser, Debug)]
#[command(name = "loanpkg")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered contracts
    Contracts(commands::contracts::ContractsArgs),

    /// Execute a contract against a scope
    Execute(commands::execute::ExecuteArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    // Initialize logging
    let level = cli.log_level.as_deref().unwrap_or(&config.log.level);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Contracts(args) => {
            commands::contracts::run_contracts(&args);
            Ok(())
        },
        Commands::Execute(args) => {
            // 0=success, 1=contract rejected the request, 2=error
            let exit_code = commands::execute::run_execute(&args, &config);
            std::process::exit(i32::from(exit_code));
        },
    }
}
