//! Helpers for multi-node test clusters reachable over SSH
//!
//! Operational conveniences only; output is returned as raw text with no
//! parsing.

use std::process::Stdio;

use tokio::process::Command;

use crate::common::config::Config;
use crate::common::paths::ChainHome;
use crate::common::{Error, Result};

/// Fetch a remote validator's consensus pubkey
///
/// Opens an SSH session to `host` with the configured identity file and
/// runs the node's show-validator subcommand there.
pub async fn validator_pubkey(config: &Config, home: &ChainHome, host: &str) -> Result<String> {
    let identity = home.home().join(&config.remote.identity_file);
    let command = format!(
        "ssh -i {} {} \"{}\"",
        identity.display(),
        host,
        config.remote.show_validator_cmd
    );
    tracing::debug!(%command, "fetching remote validator pubkey");

    let output = Command::new("ssh")
        .arg("-i")
        .arg(&identity)
        .arg(host)
        .arg(&config.remote.show_validator_cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| Error::Spawn {
            command: command.clone(),
            source: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::error!(%command, %stderr, "remote command failed");
        return Err(Error::NonZeroExit {
            command,
            status: output.status.to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
