//! # chainviz CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

use chainviz_cli::inspect::{run_inspect, InspectArgs};
use chainviz_cli::visualize::{run_visualize, VisualizeArgs};

/// Chainviz — chainpoint v3 receipt visualization.
///
/// Replays the hash chain a chainpoint receipt declares, resolves the
/// ledger-facing Merkle root and Bitcoin OP_RETURN values, and renders the
/// proof as a graph in any image format Graphviz supports.
#[derive(Parser, Debug)]
#[command(name = "chainviz", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Render a receipt's proof graph via Graphviz.
    Visualize(VisualizeArgs),
    /// Print a receipt's replay trace and anchor values.
    Inspect(InspectArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Visualize(args) => run_visualize(&args),
        Commands::Inspect(args) => run_inspect(&args),
    }
}
