//! Non-interactive command executor
//!
//! Runs a full command line to completion and captures its output,
//! optionally parsing it as JSON. A malformed response is a hard failure;
//! there is no retry.

use std::process::Stdio;

use serde_json::Value;
use tokio::process::Command;

use crate::common::{Error, Result};

/// Outcome of probing command output for structure
///
/// The wallet CLI's output format is inconsistent across versions: some
/// builds emit well-formed JSON, some loosely structured text. The probe
/// classifies once at the boundary so callers branch on a tag instead of
/// catching a decode error.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// Output parsed as a JSON document
    Structured(Value),
    /// Anything else, verbatim
    Text(String),
}

/// Classify raw command output as JSON or legacy text
pub fn probe_json(raw: &str) -> ParseOutcome {
    match serde_json::from_str(raw.trim()) {
        Ok(value) => ParseOutcome::Structured(value),
        Err(_) => ParseOutcome::Text(raw.to_string()),
    }
}

/// Split a command line into program + arguments
pub(crate) fn split_command(line: &str) -> Result<Vec<String>> {
    let parts = shlex::split(line).ok_or_else(|| Error::CommandParse(line.to_string()))?;
    if parts.is_empty() {
        return Err(Error::CommandParse(line.to_string()));
    }
    Ok(parts)
}

/// Run a command line to completion and return its stdout
///
/// A non-zero exit code is an error; stderr is logged before returning it.
pub async fn run(cmd_line: &str) -> Result<String> {
    tracing::debug!(command = %cmd_line, "running command");
    let parts = split_command(cmd_line)?;

    let output = Command::new(&parts[0])
        .args(&parts[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| Error::Spawn {
            command: cmd_line.to_string(),
            source: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::error!(command = %cmd_line, %stderr, "command exited with failure");
        return Err(Error::NonZeroExit {
            command: cmd_line.to_string(),
            status: output.status.to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a command line and parse its stdout as JSON
pub async fn run_json(cmd_line: &str) -> Result<Value> {
    let raw = run(cmd_line).await?;
    match probe_json(&raw) {
        ParseOutcome::Structured(value) => Ok(value),
        ParseOutcome::Text(raw) => Err(Error::unexpected_output(
            "parsing command output as JSON",
            &raw,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_classifies_json_objects() {
        match probe_json(r#"  {"address": "friday1abc"} "#) {
            ParseOutcome::Structured(v) => assert_eq!(v["address"], "friday1abc"),
            ParseOutcome::Text(_) => panic!("expected structured outcome"),
        }
    }

    #[test]
    fn probe_falls_back_to_text() {
        let raw = "NAME:\tTYPE:\tADDRESS:\nvalidator\tlocal\tfriday1abc";
        match probe_json(raw) {
            ParseOutcome::Text(t) => assert_eq!(t, raw),
            ParseOutcome::Structured(_) => panic!("expected text outcome"),
        }
    }

    #[test]
    fn split_handles_quoted_arguments() {
        let parts = split_command(r#"clif contract run wasm '{"name": "counter"}' 100"#).unwrap();
        assert_eq!(parts[3], r#"{"name": "counter"}"#);
    }

    #[test]
    fn empty_command_line_is_rejected() {
        assert!(matches!(split_command("   "), Err(Error::CommandParse(_))));
    }
}
