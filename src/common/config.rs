//! Configuration file handling
//!
//! All environment-derived state (home directory, keystore location, node
//! endpoint, binary paths) is explicit configuration so test cases do not
//! couple through ambient process state.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// External binaries driven by the harness
    #[serde(default)]
    pub binaries: Binaries,

    /// Chain layout and endpoint settings
    #[serde(default)]
    pub chain: ChainConfig,

    /// Interactive read timeouts
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Remote cluster access
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// External binaries driven by the harness
#[derive(Debug, Deserialize, Clone)]
pub struct Binaries {
    /// The node daemon
    #[serde(default = "default_node_bin")]
    pub node: PathBuf,

    /// The command-line wallet client
    #[serde(default = "default_client_bin")]
    pub client: PathBuf,

    /// The execution-engine gRPC server
    #[serde(default = "default_engine_bin")]
    pub engine: PathBuf,
}

impl Default for Binaries {
    fn default() -> Self {
        Self {
            node: default_node_bin(),
            client: default_client_bin(),
            engine: default_engine_bin(),
        }
    }
}

fn default_node_bin() -> PathBuf {
    PathBuf::from("nodef")
}
fn default_client_bin() -> PathBuf {
    PathBuf::from("clif")
}
fn default_engine_bin() -> PathBuf {
    PathBuf::from("casperlabs-engine-grpc-server")
}

impl Binaries {
    /// Resolve a configured binary to an absolute path
    ///
    /// A bare name falls back to a PATH lookup; an explicit path is used
    /// as given.
    pub fn resolve(bin: &Path) -> Result<PathBuf> {
        if bin.components().count() > 1 {
            return Ok(bin.to_path_buf());
        }
        which::which(bin).map_err(|_| Error::BinaryNotFound(bin.display().to_string()))
    }
}

/// Chain layout and endpoint settings
#[derive(Debug, Deserialize, Clone)]
pub struct ChainConfig {
    /// Base home directory; defaults to the OS home dir when unset
    pub home: Option<PathBuf>,

    /// Client keystore/config home, relative to the base home
    #[serde(default = "default_client_home")]
    pub client_home: PathBuf,

    /// Node endpoint targeted by the client
    #[serde(default = "default_node_endpoint")]
    pub node_endpoint: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            home: None,
            client_home: default_client_home(),
            node_endpoint: default_node_endpoint(),
        }
    }
}

fn default_client_home() -> PathBuf {
    PathBuf::from(".test_clif")
}
fn default_node_endpoint() -> String {
    "tcp://localhost:26657".to_string()
}

/// Interactive read timeouts in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct Timeouts {
    /// Budget for the first prompt of an interactive command
    #[serde(default = "default_prompt")]
    pub prompt_secs: u64,

    /// Budget for follow-up prompts (confirmation, repeat passphrase)
    #[serde(default = "default_confirm")]
    pub confirm_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            prompt_secs: default_prompt(),
            confirm_secs: default_confirm(),
        }
    }
}

fn default_prompt() -> u64 {
    3
}
fn default_confirm() -> u64 {
    1
}

impl Timeouts {
    pub fn prompt(&self) -> Duration {
        Duration::from_secs(self.prompt_secs)
    }

    pub fn confirm(&self) -> Duration {
        Duration::from_secs(self.confirm_secs)
    }
}

/// Remote cluster access
#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    /// SSH identity file, relative to the base home
    #[serde(default = "default_identity_file")]
    pub identity_file: PathBuf,

    /// Command run on the remote host to print the validator pubkey
    #[serde(default = "default_show_validator")]
    pub show_validator_cmd: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            identity_file: default_identity_file(),
            show_validator_cmd: default_show_validator(),
        }
    }
}

fn default_identity_file() -> PathBuf {
    PathBuf::from("ci_nodes.pem")
}
fn default_show_validator() -> String {
    "~/go/bin/nodef tendermint show-validator".to_string()
}

impl Config {
    /// Load configuration from a file, or the default config location
    ///
    /// Returns default configuration if no file exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => config_path(),
        };

        if let Some(path) = path {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
                return toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_chain_layout() {
        let config = Config::default();
        assert_eq!(config.binaries.node, PathBuf::from("nodef"));
        assert_eq!(config.binaries.client, PathBuf::from("clif"));
        assert_eq!(config.chain.client_home, PathBuf::from(".test_clif"));
        assert_eq!(config.chain.node_endpoint, "tcp://localhost:26657");
        assert_eq!(config.timeouts.prompt_secs, 3);
        assert_eq!(config.timeouts.confirm_secs, 1);
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [chain]
            node_endpoint = "tcp://10.0.0.5:26657"
            "#,
        )
        .unwrap();
        assert_eq!(config.chain.node_endpoint, "tcp://10.0.0.5:26657");
        assert_eq!(config.chain.client_home, PathBuf::from(".test_clif"));
        assert_eq!(config.timeouts.prompt_secs, 3);
    }

    #[test]
    fn explicit_binary_path_is_not_searched() {
        let path = PathBuf::from("/opt/chain/bin/nodef");
        assert_eq!(Binaries::resolve(&path).unwrap(), path);
    }
}
