//! Regatta — reconcile a directory of declarative manifests against a
//! remote target by fanning out an external apply command.
//!
//! # Usage
//!
//! ```text
//! regatta sync [--root <dir>] [--context <name>] [--apply] [-j <n>] [--tool <bin>] [--json]
//! regatta list [--root <dir>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{list::ListArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "regatta",
    version,
    about = "Reconcile a directory of declarative manifests against a remote target",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply every discovered manifest through the reconciliation tool.
    Sync(SyncArgs),

    /// List discovered manifests and the set fingerprint without applying.
    List(ListArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::List(args) => args.run(),
    }
}
