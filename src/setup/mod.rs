//! Chain bootstrap operations
//!
//! Thin sequential wrappers over the node binary: initialize a chain,
//! install the chainspec manifest, register genesis accounts, and produce
//! the genesis transactions that bootstrap the initial validator set.
//! Each operation is a single external command invocation; failures from
//! the underlying command propagate unchanged.

use std::path::{Path, PathBuf};

use crate::common::config::{Binaries, Config, Timeouts};
use crate::common::paths::ChainHome;
use crate::common::Result;
use crate::driver::exec;
use crate::driver::interactive;

/// Driver for the node binary's setup subcommands
#[derive(Debug, Clone)]
pub struct NodeSetup {
    bin: PathBuf,
    home: ChainHome,
    client_home: PathBuf,
    timeouts: Timeouts,
}

impl NodeSetup {
    pub fn new(config: &Config, home: &ChainHome) -> Result<Self> {
        Ok(Self {
            bin: Binaries::resolve(&config.binaries.node)?,
            home: home.clone(),
            client_home: home.client_home().to_path_buf(),
            timeouts: config.timeouts.clone(),
        })
    }

    fn bin(&self) -> String {
        self.bin.display().to_string()
    }

    /// `--home-client <keystore>` argument for genesis-account commands
    fn client_arg(&self) -> String {
        format!("--home-client {}", self.client_home.display())
    }

    /// Initialize a fresh chain under the node home
    pub async fn init_chain(&self, moniker: &str, chain_id: &str) -> Result<()> {
        let cmd = format!("{} init {} --chain-id {}", self.bin(), moniker, chain_id);
        exec::run(&cmd).await?;
        Ok(())
    }

    /// Install a chainspec manifest into the node config dir
    pub async fn copy_manifest(&self, source: &Path) -> Result<()> {
        let dest = self.home.manifest_path();
        if let Some(dir) = dest.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::copy(source, &dest).await?;
        tracing::debug!(source = %source.display(), dest = %dest.display(), "installed manifest");
        Ok(())
    }

    /// Register an account with initial coins and stake in genesis state
    pub async fn add_genesis_account(&self, address: &str, coin: u64, stake: u64) -> Result<()> {
        let cmd = format!(
            "{} add-el-genesis-account {} {} {} {}",
            self.bin(),
            address,
            coin,
            stake,
            self.client_arg()
        );
        exec::run(&cmd).await?;
        Ok(())
    }

    /// Load the installed chainspec into the genesis state
    pub async fn load_chainspec(&self) -> Result<()> {
        let cmd = format!(
            "{} load-chainspec {}",
            self.bin(),
            self.home.manifest_path().display()
        );
        exec::run(&cmd).await?;
        Ok(())
    }

    /// Generate a genesis transaction for a validator wallet
    ///
    /// Prompts once for the wallet passphrase.
    pub async fn gentx(&self, alias: &str, passphrase: &str) -> Result<()> {
        let cmd = format!(
            "{} gentx --name {} {}",
            self.bin(),
            alias,
            self.client_arg()
        );
        interactive::run_prompted(
            &cmd,
            &[passphrase],
            self.timeouts.confirm(),
            self.timeouts.confirm(),
        )
        .await?;
        Ok(())
    }

    /// Collect generated genesis transactions into the genesis file
    pub async fn collect_gentxs(&self) -> Result<()> {
        exec::run(&format!("{} collect-gentxs", self.bin())).await?;
        Ok(())
    }

    /// Validate the assembled genesis file
    pub async fn validate_genesis(&self) -> Result<()> {
        exec::run(&format!("{} validate-genesis", self.bin())).await?;
        Ok(())
    }

    /// Reset the node's local state (keeps config)
    pub async fn unsafe_reset_all(&self) -> Result<()> {
        exec::run(&format!("{} unsafe-reset-all", self.bin())).await?;
        Ok(())
    }
}
