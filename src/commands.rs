//! CLI command definitions
//!
//! Defines the clap commands for the harness CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the execution engine and the node daemon, stop them on Ctrl-C
    Up,

    /// Initialize a fresh single-node chain ready to start
    ///
    /// Runs the canonical bootstrap sequence: init, manifest install,
    /// client config, validator wallet, genesis account, gentx, collect,
    /// validate.
    Bootstrap {
        /// Node moniker
        #[arg(long, default_value = "testnode")]
        moniker: String,

        /// Chain id
        #[arg(long, default_value = "testchain")]
        chain_id: String,

        /// Chainspec manifest to install into the node config dir
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Alias for the bootstrap validator wallet
        #[arg(long, default_value = "validator")]
        alias: String,

        /// Passphrase for the bootstrap validator wallet
        #[arg(long, default_value = "12345678")]
        passphrase: String,

        /// Initial coins for the genesis account
        #[arg(long, default_value_t = 500_000_000)]
        coins: u64,

        /// Initial stake for the genesis account
        #[arg(long, default_value_t = 1_000_000)]
        stake: u64,
    },

    /// Remove node config, node data, and the client keystore
    Clean,

    /// Run YAML test scenarios
    Test {
        /// Scenario files
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,

        /// Show setup command output
        #[arg(long, short)]
        verbose: bool,
    },
}
