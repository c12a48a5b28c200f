//! Token transfers and staking
//!
//! The chain's custom token subcommands: transfers, bonding, balance
//! queries, and validator registration.

use serde_json::Value;

use crate::common::Result;

use super::exec;
use super::interactive;
use super::Client;

impl Client {
    /// Transfer tokens to a recipient
    pub async fn transfer_to(
        &self,
        recipient: &str,
        amount: u64,
        fee: u64,
        gas_price: u64,
        from: &str,
        passphrase: &str,
    ) -> Result<String> {
        let cmd = format!(
            "{} hdac transfer-to {} {} {} {} --from {} {}",
            self.bin(),
            recipient,
            amount,
            fee,
            gas_price,
            from,
            self.node_args()
        );
        interactive::run_tx(&cmd, passphrase, self.timeouts()).await
    }

    /// Bond tokens as stake
    pub async fn bond(
        &self,
        amount: u64,
        fee: u64,
        gas_price: u64,
        from: &str,
        passphrase: &str,
    ) -> Result<String> {
        let cmd = format!(
            "{} hdac bond {} {} {} --from {} {}",
            self.bin(),
            amount,
            fee,
            gas_price,
            from,
            self.node_args()
        );
        interactive::run_tx(&cmd, passphrase, self.timeouts()).await
    }

    /// Unbond previously staked tokens
    pub async fn unbond(
        &self,
        amount: u64,
        fee: u64,
        gas_price: u64,
        from: &str,
        passphrase: &str,
    ) -> Result<String> {
        let cmd = format!(
            "{} hdac unbond {} {} {} --from {} {}",
            self.bin(),
            amount,
            fee,
            gas_price,
            from,
            self.node_args()
        );
        interactive::run_tx(&cmd, passphrase, self.timeouts()).await
    }

    /// Query the balance of an address or alias
    pub async fn get_balance(&self, from: &str) -> Result<Value> {
        let cmd = format!(
            "{} hdac getbalance --from {} {}",
            self.bin(),
            from,
            self.node_args()
        );
        exec::run_json(&cmd).await
    }

    /// Register the sender as a validator
    pub async fn create_validator(
        &self,
        from: &str,
        pubkey: &str,
        moniker: &str,
        description: ValidatorDescription<'_>,
        passphrase: &str,
    ) -> Result<String> {
        let cmd = format!(
            r#"{} hdac create-validator --from {} --pubkey {} --moniker {} --identity "{}" --website "{}" --details "{}" {}"#,
            self.bin(),
            from,
            pubkey,
            moniker,
            description.identity,
            description.website,
            description.details,
            self.node_args()
        );
        interactive::run_tx(&cmd, passphrase, self.timeouts()).await
    }
}

/// Optional descriptive fields of a validator registration
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorDescription<'a> {
    pub identity: &'a str,
    pub website: &'a str,
    pub details: &'a str,
}
