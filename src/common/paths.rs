//! Chain filesystem layout
//!
//! All paths the external binaries read and write live under one base home
//! directory: the node home (`.nodef`), the execution-engine socket
//! (`.casperlabs`), and the client keystore home.

use std::io;
use std::path::{Path, PathBuf};

use super::config::Config;
use super::{Error, Result};

/// Node home directory name
const NODE_HOME: &str = ".nodef";

/// Engine socket path relative to the base home
const ENGINE_SOCKET: &str = ".casperlabs/.casper-node.sock";

/// Resolved filesystem layout for one chain home
#[derive(Debug, Clone)]
pub struct ChainHome {
    home: PathBuf,
    client_home: PathBuf,
}

impl ChainHome {
    /// Resolve the layout from configuration
    ///
    /// Falls back to the OS home directory when no base home is configured.
    pub fn new(config: &Config) -> Result<Self> {
        let home = match &config.chain.home {
            Some(home) => home.clone(),
            None => directories::BaseDirs::new()
                .map(|dirs| dirs.home_dir().to_path_buf())
                .ok_or(Error::HomeDirNotFound)?,
        };
        let client_home = home.join(&config.chain.client_home);
        Ok(Self { home, client_home })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Client keystore/config home
    pub fn client_home(&self) -> &Path {
        &self.client_home
    }

    pub fn node_home(&self) -> PathBuf {
        self.home.join(NODE_HOME)
    }

    pub fn node_config_dir(&self) -> PathBuf {
        self.node_home().join("config")
    }

    pub fn node_data_dir(&self) -> PathBuf {
        self.node_home().join("data")
    }

    /// Chainspec manifest installed into the node config dir
    pub fn manifest_path(&self) -> PathBuf {
        self.node_config_dir().join("manifest.toml")
    }

    /// Domain socket the execution engine listens on
    pub fn engine_socket(&self) -> PathBuf {
        self.home.join(ENGINE_SOCKET)
    }

    /// Remove node config, node data, and the client keystore
    ///
    /// Idempotent: missing directories are not an error. After cleanup,
    /// initialization behaves as on a fresh home directory.
    pub fn cleanup(&self) -> Result<()> {
        for dir in [self.node_config_dir(), self.node_data_dir(), self.client_home.clone()] {
            match std::fs::remove_dir_all(&dir) {
                Ok(()) => tracing::debug!(dir = %dir.display(), "removed"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Get the path to the harness configuration file
///
/// Uses the directories crate for platform-appropriate locations,
/// e.g. `~/.config/chain-harness/config.toml` on Linux.
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "chain-harness")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::ChainConfig;

    fn home_in(dir: &Path) -> ChainHome {
        let config = Config {
            chain: ChainConfig {
                home: Some(dir.to_path_buf()),
                ..ChainConfig::default()
            },
            ..Config::default()
        };
        ChainHome::new(&config).unwrap()
    }

    #[test]
    fn layout_is_rooted_at_the_configured_home() {
        let tmp = tempfile::tempdir().unwrap();
        let home = home_in(tmp.path());
        assert_eq!(home.node_config_dir(), tmp.path().join(".nodef/config"));
        assert_eq!(home.client_home(), tmp.path().join(".test_clif"));
        assert!(home.engine_socket().ends_with(".casperlabs/.casper-node.sock"));
    }

    #[test]
    fn cleanup_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let home = home_in(tmp.path());

        std::fs::create_dir_all(home.node_config_dir()).unwrap();
        std::fs::create_dir_all(home.node_data_dir()).unwrap();
        std::fs::create_dir_all(home.client_home()).unwrap();
        std::fs::write(home.manifest_path(), "chainspec").unwrap();

        home.cleanup().unwrap();
        assert!(!home.node_home().join("config").exists());
        assert!(!home.client_home().exists());

        // Nothing left to remove; must still succeed.
        home.cleanup().unwrap();
    }
}
