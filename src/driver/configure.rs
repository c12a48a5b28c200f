//! Client configuration commands
//!
//! Writes the four client settings the test suite relies on. The first
//! command returning a non-zero exit code aborts the sequence; later
//! settings are left unset and stderr is logged before the error returns.

use std::process::Stdio;

use tokio::process::Command;

use crate::common::{Error, Result};

use super::exec::split_command;
use super::Client;

impl Client {
    /// Write chain id, JSON output, trust-node, and indentation settings
    pub async fn write_config(&self, chain_id: &str) -> Result<()> {
        let home = self.home_arg();
        let cmds = [
            format!("{} config chain-id {} {}", self.bin(), chain_id, home),
            format!("{} config output json {}", self.bin(), home),
            format!("{} config trust-node true {}", self.bin(), home),
            format!("{} config indent true {}", self.bin(), home),
        ];

        for cmd in &cmds {
            tracing::debug!(command = %cmd, "writing client config");
            let parts = split_command(cmd)?;
            let output = Command::new(&parts[0])
                .args(&parts[1..])
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .map_err(|e| Error::Spawn {
                    command: cmd.clone(),
                    source: e,
                })?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                tracing::error!(command = %cmd, %stderr, "configuration command failed");
                return Err(Error::FinishedWithError(format!(
                    "'{}' exited with {}",
                    cmd, output.status
                )));
            }
        }
        Ok(())
    }
}
