//! Scenario configuration types
//!
//! Defines the data structures for deserializing YAML test scenarios.

use serde::Deserialize;

/// A complete test scenario loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct Scenario {
    /// Name of the scenario
    pub name: String,
    /// Optional description of what the scenario verifies
    pub description: Option<String>,
    /// Optional shell steps to run before the scenario (e.g. chain bootstrap)
    pub setup: Option<Vec<SetupStep>>,
    /// Run against a throwaway home directory instead of the configured one
    #[serde(default)]
    pub ephemeral_home: bool,
    /// The sequence of steps to execute
    pub steps: Vec<Step>,
}

/// A setup step that runs before the scenario
#[derive(Deserialize, Debug)]
pub struct SetupStep {
    /// Shell command to execute
    pub shell: String,
}

/// A single step in the scenario
///
/// `from`, `to`, and `owner` fields accept either a wallet alias created
/// earlier in the scenario or a literal address.
#[derive(Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Create a wallet and remember it under its alias
    CreateWallet { alias: String, passphrase: String },

    /// Delete a wallet from the keystore
    DeleteWallet { alias: String, passphrase: String },

    /// Transfer tokens
    Transfer {
        from: String,
        to: String,
        amount: u64,
        #[serde(default = "default_fee")]
        fee: u64,
        #[serde(default = "default_gas_price")]
        gas_price: u64,
        passphrase: String,
    },

    /// Bond tokens as stake
    Bond {
        from: String,
        amount: u64,
        #[serde(default = "default_fee")]
        fee: u64,
        #[serde(default = "default_gas_price")]
        gas_price: u64,
        passphrase: String,
    },

    /// Unbond staked tokens
    Unbond {
        from: String,
        amount: u64,
        #[serde(default = "default_fee")]
        fee: u64,
        #[serde(default = "default_gas_price")]
        gas_price: u64,
        passphrase: String,
    },

    /// Register a nickname for a wallet
    SetNickname {
        nickname: String,
        owner: String,
        passphrase: String,
    },

    /// Execute a contract
    RunContract {
        run_type: String,
        value: String,
        #[serde(default = "default_contract_args")]
        args: String,
        #[serde(default = "default_fee")]
        fee: u64,
        #[serde(default = "default_gas_price")]
        gas_price: u64,
        from: String,
        passphrase: String,
    },

    /// Assert that the most recent transaction was executed successfully
    AssertTxOk,

    /// Query a balance, optionally asserting on the response
    CheckBalance {
        from: String,
        /// Substring that must appear in the serialized response
        contains: Option<String>,
    },
}

fn default_fee() -> u64 {
    100_000_000
}

fn default_gas_price() -> u64 {
    30_000_000
}

fn default_contract_args() -> String {
    "{}".to_string()
}
