//! Worldlapse CLI
//!
//! Scheduled time-lapse capture for world simulations.
//!
//! # Usage
//!
//! ```bash
//! # Capture the built-in demo world once
//! worldlapse snapshot
//!
//! # Preview the next scheduled capture hours
//! worldlapse schedule
//!
//! # Create a default config file
//! worldlapse config init
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Worldlapse - scheduled time-lapse capture for world simulations
#[derive(Parser)]
#[command(name = "worldlapse")]
#[command(version)]
#[command(about = "Scheduled time-lapse capture for world simulations", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture the built-in demo world once, through the full pipeline
    Snapshot(commands::SnapshotArgs),

    /// Preview upcoming scheduled capture hours
    Schedule(commands::ScheduleArgs),

    /// Manage configuration files
    Config(commands::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("worldlapse={}", level).parse().unwrap()),
        )
        .with_target(false)
        .init();

    // Run the appropriate command
    match cli.command {
        Commands::Snapshot(args) => commands::snapshot(args).await?,
        Commands::Schedule(args) => commands::schedule(args).await?,
        Commands::Config(args) => commands::config(args).await?,
    }

    Ok(())
}
