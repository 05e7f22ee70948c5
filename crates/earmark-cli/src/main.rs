//! Earmark CLI - demo binding over the funding ledger
//!
//! Drives the public operation surface against a process-local ledger with
//! an in-memory custody backend: useful for walking the full program
//! lifecycle end to end. Durable storage and network transports are the
//! business of whatever wraps the ledger in production.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Earmark CLI - pooled funds, earmarked programs, audited withdrawal
#[derive(Parser)]
#[command(name = "earmark")]
#[command(author = "Earmark Contributors")]
#[command(version)]
#[command(about = "Pooled-fund program ledger with all-or-nothing allocation", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run demos walking the ledger end to end
    Demo {
        #[command(subcommand)]
        demo_type: DemoCommands,
    },
}

#[derive(Subcommand)]
enum DemoCommands {
    /// Full lifecycle: register, deposit, allocate, draw down, audit
    Full {
        /// Print the final programs and pool state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Every guard rail in action: wrong roles, bad arguments, short pools
    Safety,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo { demo_type } => match demo_type {
            DemoCommands::Full { json } => commands::run_full_demo(json).await,
            DemoCommands::Safety => commands::run_safety_demo().await,
        },
    }
}
