//! Nickname registration
//!
//! Human-readable aliases mapped to on-chain addresses.

use serde_json::Value;

use crate::common::Result;

use super::exec;
use super::interactive;
use super::Client;

impl Client {
    /// Register a nickname for an address
    pub async fn set_nickname(
        &self,
        nickname: &str,
        address: &str,
        passphrase: &str,
    ) -> Result<String> {
        let cmd = format!(
            "{} nickname set {} --from {} {}",
            self.bin(),
            nickname,
            address,
            self.node_args()
        );
        interactive::run_tx(&cmd, passphrase, self.timeouts()).await
    }

    /// Point an existing nickname at a new address
    pub async fn change_nickname_address(
        &self,
        nickname: &str,
        new_address: &str,
        old_address: &str,
        passphrase: &str,
    ) -> Result<String> {
        let cmd = format!(
            "{} nickname change-to {} {} --from {} {}",
            self.bin(),
            nickname,
            new_address,
            old_address,
            self.node_args()
        );
        interactive::run_tx(&cmd, passphrase, self.timeouts()).await
    }

    /// Resolve a nickname to its registered address
    pub async fn resolve_nickname(&self, nickname: &str) -> Result<Value> {
        let cmd = format!(
            "{} nickname get-address {} {}",
            self.bin(),
            nickname,
            self.node_args()
        );
        exec::run_json(&cmd).await
    }
}
