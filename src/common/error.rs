//! Error types for the chain harness
//!
//! Every failure surfaces immediately to the caller; no operation retries
//! internally. Multi-step sequences abort at the first failure.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the chain harness
#[derive(Error, Debug)]
pub enum Error {
    // === Daemon Errors ===
    #[error("Daemon '{0}' is no longer running")]
    DeadDaemon(String),

    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    // === Driver Errors ===
    #[error("Command finished with error: {0}")]
    FinishedWithError(String),

    #[error("Invalid contract run type '{0}': expected one of wasm, uref, hash, name")]
    InvalidContractRunType(String),

    #[error("Unexpected output while {0}")]
    UnexpectedOutput(String),

    #[error("Command line could not be parsed: {0}")]
    CommandParse(String),

    #[error("Command '{command}' exited with {status}")]
    NonZeroExit { command: String, status: String },

    // === Configuration Errors ===
    #[error("Binary '{0}' not found in configuration or PATH")]
    BinaryNotFound(String),

    #[error("Could not determine a home directory")]
    HomeDirNotFound,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === Scenario Errors ===
    #[error("Scenario assertion failed: {0}")]
    Scenario(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unexpected-output error, logging the raw offending text first
    pub fn unexpected_output(context: &str, raw: &str) -> Self {
        tracing::error!(context, output = %raw, "unparseable command output");
        Self::UnexpectedOutput(context.to_string())
    }

    /// Create a finished-with-error for an interactive read that timed out
    pub fn read_timed_out(command: &str, waited_secs: u64) -> Self {
        Self::FinishedWithError(format!("no output from '{command}' within {waited_secs}s"))
    }
}
