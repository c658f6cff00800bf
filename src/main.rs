//! autocite CLI
//!
//! Harvard reference generator for web pages. Fetches each URL and
//! infers author, title and publication year from page metadata.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cite;
mod extract;
mod fetch;
mod page;
mod schema;

use cite::{run_cite, CiteArgs};

#[derive(Parser)]
#[command(name = "autocite")]
#[command(version)]
#[command(about = "Generate Harvard references for web pages")]
#[command(
    long_about = "Fetches web pages and builds Harvard-style references from page metadata.\n\nCommands:\n  cite    Generate references for a URL list file, single URL, or stdin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Harvard references for URLs
    Cite(CiteArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Cite(args) => run_cite(args).await,
    }
}
