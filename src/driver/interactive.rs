//! Interactive command executor
//!
//! Drives commands that prompt on their output stream: read whatever is
//! available within a short budget, answer with a scripted line, repeat,
//! then drain to EOF. A read that exceeds its timeout maps to the
//! finished-with-error condition rather than hanging or returning a
//! partial result.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};

use crate::common::config::Timeouts;
use crate::common::{Error, Result};

use super::exec::split_command;

lazy_static! {
    /// Transaction hash in the broadcast response log line
    static ref TXHASH_RE: Regex = Regex::new(r#""txhash":\s*"([A-Z0-9]+)""#).unwrap();
}

/// A spawned command with scripted access to its prompts
pub struct InteractiveProcess {
    command: String,
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
    stderr: Option<ChildStderr>,
}

impl InteractiveProcess {
    /// Spawn a command line with piped stdio
    pub fn spawn(cmd_line: &str) -> Result<Self> {
        tracing::debug!(command = %cmd_line, "spawning interactive command");
        let parts = split_command(cmd_line)?;

        let mut child = Command::new(&parts[0])
            .args(&parts[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Spawn {
                command: cmd_line.to_string(),
                source: e,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::FinishedWithError("no stdin pipe".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::FinishedWithError("no stdout pipe".to_string()))?;
        let stderr = child.stderr.take();

        Ok(Self {
            command: cmd_line.to_string(),
            child,
            stdin,
            stdout,
            stderr,
        })
    }

    /// Read whatever output is available within `timeout`
    ///
    /// Returns as soon as the process writes anything. An empty read means
    /// the process closed its output.
    pub async fn read_chunk(&mut self, timeout: Duration) -> Result<String> {
        let mut buf = vec![0u8; 64 * 1024];
        let n = match tokio::time::timeout(timeout, self.stdout.read(&mut buf)).await {
            Ok(read) => read?,
            Err(_) => {
                return Err(Error::read_timed_out(&self.command, timeout.as_secs()));
            }
        };
        buf.truncate(n);
        let chunk = String::from_utf8_lossy(&buf).into_owned();
        tracing::trace!(command = %self.command, %chunk, "prompt chunk");
        Ok(chunk)
    }

    /// Answer the current prompt with one scripted line
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Drain stdout until the process closes it
    pub async fn read_to_end(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        self.stdout.read_to_end(&mut buf).await?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Reap the process
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        Ok(self.child.wait().await?)
    }

    /// Drain whatever the process wrote to stderr, for diagnostics
    pub async fn stderr_tail(&mut self) -> String {
        match self.stderr.take() {
            Some(mut stderr) => {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf).await;
                String::from_utf8_lossy(&buf).into_owned()
            }
            None => String::new(),
        }
    }
}

/// Drive a transaction command through its confirmation and passphrase
/// prompts and extract the broadcast transaction hash
///
/// Protocol: read the signing prompt, confirm with `Y`, read the
/// passphrase prompt, send the passphrase, then read until the client
/// exits. The hash must appear in a `"txhash": "..."` log line.
pub async fn run_tx(cmd_line: &str, passphrase: &str, timeouts: &Timeouts) -> Result<String> {
    let mut proc = InteractiveProcess::spawn(cmd_line)?;

    proc.read_chunk(timeouts.prompt()).await?;
    proc.send_line("Y").await?;
    proc.read_chunk(timeouts.confirm()).await?;
    proc.send_line(passphrase).await?;

    let outs = proc.read_to_end().await?;
    let status = proc.wait().await?;
    tracing::debug!(command = %cmd_line, %status, "transaction command finished");

    match TXHASH_RE.captures(&outs) {
        Some(caps) => Ok(caps[1].to_string()),
        None => {
            let stderr = proc.stderr_tail().await;
            tracing::error!(command = %cmd_line, %stderr, "no txhash in output");
            Err(Error::unexpected_output("extracting txhash", &outs))
        }
    }
}

/// Drive a command that only asks for scripted line responses
///
/// Used for prompt flows without a confirmation step: passphrase entry on
/// key deletion and gentx, passphrase + repeat on key creation. Returns
/// the output that follows the last response.
pub async fn run_prompted(
    cmd_line: &str,
    responses: &[&str],
    first_timeout: Duration,
    next_timeout: Duration,
) -> Result<String> {
    let mut proc = InteractiveProcess::spawn(cmd_line)?;

    for (i, response) in responses.iter().enumerate() {
        let timeout = if i == 0 { first_timeout } else { next_timeout };
        proc.read_chunk(timeout).await?;
        proc.send_line(response).await?;
    }

    let outs = proc.read_to_end().await?;
    let status = proc.wait().await?;
    tracing::debug!(command = %cmd_line, %status, "prompted command finished");
    Ok(outs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txhash_regex_matches_broadcast_log_line() {
        let outs = r#"{"height": "0", "txhash": "B8E24B4A7A5D64A8CDE3A24A5D3A9E4F", "logs": []}"#;
        let caps = TXHASH_RE.captures(outs).unwrap();
        assert_eq!(&caps[1], "B8E24B4A7A5D64A8CDE3A24A5D3A9E4F");
    }

    #[test]
    fn txhash_regex_ignores_lowercase_hashes() {
        assert!(TXHASH_RE.captures(r#""txhash": "deadbeef""#).is_none());
    }
}
