//! Transaction queries
//!
//! A transaction hash returned by any transaction-executing operation must
//! be queryable here against the node's query endpoint.

use serde::Deserialize;
use serde_json::Value;

use crate::common::{Error, Result};

use super::exec;
use super::Client;

/// Typed view over the query-by-hash result
#[derive(Debug, Clone, Deserialize)]
pub struct TxStatus {
    #[serde(default)]
    pub logs: Vec<TxLog>,
}

/// One execution log entry of a transaction
#[derive(Debug, Clone, Deserialize)]
pub struct TxLog {
    pub success: bool,
    #[serde(default)]
    pub log: String,
}

impl Client {
    /// Query a transaction by hash, returning the raw JSON document
    pub async fn query_tx(&self, tx_hash: &str) -> Result<Value> {
        let cmd = format!("{} query tx {} {}", self.bin(), tx_hash, self.home_arg());
        exec::run_json(&cmd).await
    }

    /// Query a transaction by hash, returning the typed status view
    pub async fn tx_status(&self, tx_hash: &str) -> Result<TxStatus> {
        let value = self.query_tx(tx_hash).await?;
        serde_json::from_value(value.clone()).map_err(|_| {
            Error::unexpected_output("reading tx status", &value.to_string())
        })
    }

    /// Success flag of the transaction's first log entry
    ///
    /// The full log list is logged when the transaction failed.
    pub async fn tx_succeeded(&self, tx_hash: &str) -> Result<bool> {
        let status = self.tx_status(tx_hash).await?;
        let first = status.logs.first().ok_or_else(|| {
            Error::unexpected_output("reading tx logs", &format!("{:?}", status.logs))
        })?;
        if !first.success {
            tracing::warn!(tx_hash, logs = ?status.logs, "transaction failed");
        }
        Ok(first.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_deserializes_from_query_output() {
        let value: Value = serde_json::from_str(
            r#"{"height": "12", "txhash": "AB12", "logs": [{"msg_index": 0, "success": true, "log": ""}]}"#,
        )
        .unwrap();
        let status: TxStatus = serde_json::from_value(value).unwrap();
        assert!(status.logs[0].success);
    }
}
