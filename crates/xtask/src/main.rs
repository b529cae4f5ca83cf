//! Development tasks for the NPC AI workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{InspectTree, Simulate};

/// Development tasks for the NPC AI workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for NPC behavior trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run NPC trees against an ASCII level
    Simulate(Simulate),

    /// Read and inspect a saved tree record
    InspectTree(InspectTree),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for AI_* tuning and SAVE_DATA_DIR)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::InspectTree(cmd) => cmd.execute(),
    }
}
