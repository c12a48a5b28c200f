//! Black-box driver for the command-line wallet client
//!
//! Every chain operation spawns the external client, feeds it scripted
//! responses where it prompts, and scrapes the resulting text stream into
//! a structured result. Control flow is strictly linear per call:
//! spawn, feed input, read until EOF or timeout, parse, return.

mod configure;
mod contract;
pub mod exec;
pub mod interactive;
mod keys;
mod nickname;
mod query;
mod token;

use std::path::{Path, PathBuf};

use crate::common::config::{Binaries, Config, Timeouts};
use crate::common::paths::ChainHome;
use crate::common::Result;

pub use contract::RunType;
pub use exec::{probe_json, ParseOutcome};
pub use keys::WalletRecord;
pub use query::{TxLog, TxStatus};
pub use token::ValidatorDescription;

/// Driver for one wallet client binary against one keystore home
///
/// Holds only filesystem paths and the target endpoint; there is no shared
/// mutable state between operations. Concurrent drivers sharing one home
/// race on the keystore and are unsupported.
#[derive(Debug, Clone)]
pub struct Client {
    bin: PathBuf,
    home: PathBuf,
    node: String,
    timeouts: Timeouts,
}

impl Client {
    pub fn new(config: &Config, chain_home: &ChainHome) -> Result<Self> {
        Ok(Self {
            bin: Binaries::resolve(&config.binaries.client)?,
            home: chain_home.client_home().to_path_buf(),
            node: config.chain.node_endpoint.clone(),
            timeouts: config.timeouts.clone(),
        })
    }

    /// Target a different node endpoint (multi-node clusters)
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = node.into();
        self
    }

    /// Keystore/config home this driver operates on
    pub fn home(&self) -> &Path {
        &self.home
    }

    pub(crate) fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// `<client binary>` as a command-line prefix
    pub(crate) fn bin(&self) -> String {
        self.bin.display().to_string()
    }

    /// `--home <keystore>` argument shared by every client invocation
    pub(crate) fn home_arg(&self) -> String {
        format!("--home {}", self.home.display())
    }

    /// `--node <endpoint> --home <keystore>` tail for chain-touching calls
    pub(crate) fn node_args(&self) -> String {
        format!("--node {} {}", self.node, self.home_arg())
    }
}
