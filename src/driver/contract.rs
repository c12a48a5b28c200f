//! Smart-contract execution
//!
//! The run-type argument is a closed enumeration; anything else is
//! rejected before a process is spawned.

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, Result};

use super::interactive;
use super::Client;

/// How the contract to run is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunType {
    /// Inline wasm module
    Wasm,
    /// Unforgeable reference
    Uref,
    /// Contract hash
    Hash,
    /// Named key
    Name,
}

impl RunType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wasm => "wasm",
            Self::Uref => "uref",
            Self::Hash => "hash",
            Self::Name => "name",
        }
    }
}

impl FromStr for RunType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wasm" => Ok(Self::Wasm),
            "uref" => Ok(Self::Uref),
            "hash" => Ok(Self::Hash),
            "name" => Ok(Self::Name),
            other => Err(Error::InvalidContractRunType(other.to_string())),
        }
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Client {
    /// Execute a contract through the engine
    ///
    /// `args` is the JSON argument document passed through to the
    /// contract verbatim.
    #[allow(clippy::too_many_arguments)]
    pub async fn run_contract(
        &self,
        run_type: RunType,
        run_type_value: &str,
        args: &str,
        fee: u64,
        gas_price: u64,
        from: &str,
        passphrase: &str,
    ) -> Result<String> {
        let cmd = format!(
            "{} contract run {} {} '{}' {} {} --from {} {}",
            self.bin(),
            run_type,
            run_type_value,
            args,
            fee,
            gas_price,
            from,
            self.node_args()
        );
        interactive::run_tx(&cmd, passphrase, self.timeouts()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_type_accepts_exactly_the_four_names() {
        for (name, expected) in [
            ("wasm", RunType::Wasm),
            ("uref", RunType::Uref),
            ("hash", RunType::Hash),
            ("name", RunType::Name),
        ] {
            assert_eq!(name.parse::<RunType>().unwrap(), expected);
        }
    }

    #[test]
    fn unknown_run_type_is_rejected() {
        let err = "WASM".parse::<RunType>().unwrap_err();
        assert!(matches!(err, Error::InvalidContractRunType(s) if s == "WASM"));
    }
}
