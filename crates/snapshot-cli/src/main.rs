//! Command-line interface for the ticker snapshot pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snapshot::{Store, Symbol, YahooProvider};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "snapshot", version, about = "Fetch and filter ticker snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch all data categories for a ticker and write raw and cleaned
    /// snapshots.
    Fetch {
        /// Ticker symbol, e.g. GOOG.
        ticker: String,

        /// Storage root for the full/ and cleaned/ directories.
        #[arg(long, default_value = "memory")]
        data_dir: PathBuf,
    },
    /// Re-filter a previously fetched raw snapshot file.
    Clean {
        /// Path to a raw snapshot JSON file.
        input: PathBuf,

        /// Storage root for the cleaned/ directory.
        #[arg(long, default_value = "memory")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Fetch { ticker, data_dir } => {
            let store = Store::new(data_dir)?;
            let provider = YahooProvider::new();
            let cleaned = snapshot::pipeline::run(&provider, &Symbol::new(&ticker), &store).await?;
            println!("{}", cleaned.display());
        }
        Command::Clean { input, data_dir } => {
            let store = Store::new(data_dir)?;
            let cleaned = snapshot::pipeline::clean_file(&input, &store)?;
            println!("{}", cleaned.display());
        }
    }

    Ok(())
}
