use clap::{Parser, Subcommand};
use std::process;

use lineage_flow::commands;
use lineage_flow::display;

/// LineageFlow (lf) CLI - data lineage visualizer
#[derive(Parser)]
#[clap(name = "lf", about = "LineageFlow - data lineage visualizer", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch lineage from the warehouse and render it as a directed graph
    Lineage(commands::lineage::LineageArgs),

    /// Build and display the lineage query without executing it
    Query(commands::query::QueryArgs),

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Lineage(args) => {
            if let Err(err) = commands::lineage::lineage_command(&args) {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        }
        Command::Query(args) => {
            if let Err(err) = commands::query::query_command(&args) {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        }
        Command::Version => {
            display::display_version();
        }
    }
}
