//! Wallet key lifecycle
//!
//! Key creation drives the client's passphrase prompts and scrapes the
//! result. Output format differs across client versions: newer builds
//! print a JSON document, older ones loosely structured text, so parsing
//! probes for JSON first and falls back to regex extraction.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::common::{Error, Result};

use super::exec::{self, probe_json, ParseOutcome};
use super::interactive;
use super::Client;

lazy_static! {
    static ref ADDRESS_RE: Regex = Regex::new(r"address: ([a-z0-9]+)").unwrap();
    static ref PUBKEY_RE: Regex = Regex::new(r"pubkey: ([a-z0-9]+)").unwrap();
}

/// A created wallet: ephemeral, held only in the caller's test scope
#[derive(Debug, Clone, Deserialize)]
pub struct WalletRecord {
    pub address: String,
    pub pubkey: String,
    pub mnemonic: String,
}

impl Client {
    /// Create a key in the keystore and return the wallet record
    ///
    /// Drives `keys add` through its passphrase and confirmation prompts.
    /// Address, pubkey, and mnemonic are non-empty on success regardless
    /// of which parse path was taken.
    pub async fn create_wallet(&self, alias: &str, passphrase: &str) -> Result<WalletRecord> {
        let cmd = format!("{} keys add {} {}", self.bin(), alias, self.home_arg());
        let outs = interactive::run_prompted(
            &cmd,
            &[passphrase, passphrase],
            self.timeouts().prompt(),
            self.timeouts().confirm(),
        )
        .await?;

        let record = match probe_json(&outs) {
            ParseOutcome::Structured(value) => serde_json::from_value(value)
                .map_err(|_| Error::unexpected_output("parsing key-add output", &outs))?,
            ParseOutcome::Text(text) => parse_legacy_key_output(&text)?,
        };
        ensure_complete(record, &outs)
    }

    /// Look up a key by alias
    pub async fn wallet_info(&self, alias: &str) -> Result<Value> {
        let cmd = format!("{} keys show {} {}", self.bin(), alias, self.home_arg());
        exec::run_json(&cmd).await
    }

    /// Delete a key from the keystore
    pub async fn delete_wallet(&self, alias: &str, passphrase: &str) -> Result<()> {
        let cmd = format!("{} keys delete {} {}", self.bin(), alias, self.home_arg());
        interactive::run_prompted(
            &cmd,
            &[passphrase],
            self.timeouts().confirm(),
            self.timeouts().confirm(),
        )
        .await?;
        Ok(())
    }
}

/// Scrape a wallet record out of the legacy text format
///
/// Address and pubkey sit on labelled lines; the mnemonic is the last
/// non-blank line of the output.
fn parse_legacy_key_output(outs: &str) -> Result<WalletRecord> {
    let address = ADDRESS_RE
        .captures(outs)
        .map(|c| c[1].to_string())
        .ok_or_else(|| Error::unexpected_output("extracting address from key-add output", outs))?;
    let pubkey = PUBKEY_RE
        .captures(outs)
        .map(|c| c[1].to_string())
        .ok_or_else(|| Error::unexpected_output("extracting pubkey from key-add output", outs))?;
    let mnemonic = outs
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_string())
        .ok_or_else(|| Error::unexpected_output("extracting mnemonic from key-add output", outs))?;

    Ok(WalletRecord {
        address,
        pubkey,
        mnemonic,
    })
}

fn ensure_complete(record: WalletRecord, raw: &str) -> Result<WalletRecord> {
    if record.address.is_empty() || record.pubkey.is_empty() || record.mnemonic.is_empty() {
        return Err(Error::unexpected_output("reading created wallet fields", raw));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_OUTPUT: &str = "\
NAME:\tTYPE:\tADDRESS:\t\tPUBKEY:
alice\tlocal\taddress: friday1w9s8u2z\tpubkey: fridaypub1addwnpep
**Important** write this mnemonic phrase in a safe place.

salute vague tower mango tonight slush badge exotic tomato usage mind tragic
";

    #[test]
    fn legacy_output_yields_all_three_fields() {
        let record = parse_legacy_key_output(LEGACY_OUTPUT).unwrap();
        assert_eq!(record.address, "friday1w9s8u2z");
        assert_eq!(record.pubkey, "fridaypub1addwnpep");
        assert!(record.mnemonic.starts_with("salute vague"));
    }

    #[test]
    fn legacy_output_without_address_is_rejected() {
        let err = parse_legacy_key_output("no key material here").unwrap_err();
        assert!(matches!(err, Error::UnexpectedOutput(_)));
    }

    #[test]
    fn structured_output_missing_fields_is_rejected() {
        let record = WalletRecord {
            address: "friday1w9s8u2z".into(),
            pubkey: String::new(),
            mnemonic: "words".into(),
        };
        assert!(ensure_complete(record, "{}").is_err());
    }
}
