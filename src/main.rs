//! Chain harness CLI
//!
//! Drives an external chain node, its execution engine, and the wallet CLI
//! as black-box subprocesses for integration testing.

use std::path::PathBuf;

use clap::Parser;

use chain_harness::commands::Commands;
use chain_harness::common::{config::Config, logging};
use chain_harness::cli;

#[derive(Parser)]
#[command(name = "chain-harness", about = "Integration-test harness for a chain node and its wallet CLI")]
#[command(version, long_about = None)]
struct Cli {
    /// Path to the harness configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::dispatch(cli.command, &config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
