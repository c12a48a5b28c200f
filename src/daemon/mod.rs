//! Daemon control for the node and the execution engine
//!
//! The harness starts both as background child processes and only ever
//! polls them for liveness. There is no restart, backoff, or crash
//! recovery: a dead daemon surfaces as `is_alive() == false` and the
//! caller owns the restart policy. These are disposable test fixtures.

use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::common::config::{Binaries, Config};
use crate::common::paths::ChainHome;
use crate::common::{Error, Result};

/// Handle to a spawned daemon process
///
/// Lifecycle is caller-managed: poll with [`is_alive`](Self::is_alive),
/// tear down with [`stop`](Self::stop). The child is killed if the handle
/// is dropped while it is still running.
pub struct DaemonHandle {
    name: String,
    child: Child,
}

impl DaemonHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// OS process id, while the process is running
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Non-blocking poll of the daemon's exit status
    pub fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Liveness check that surfaces the dead-daemon condition
    pub fn ensure_alive(&mut self) -> Result<()> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(Error::DeadDaemon(self.name.clone()))
        }
    }

    /// Kill the daemon and reap it
    pub async fn stop(&mut self) -> Result<()> {
        if self.is_alive() {
            self.child.start_kill()?;
        }
        let status = self.child.wait().await?;
        tracing::debug!(daemon = %self.name, %status, "daemon stopped");
        Ok(())
    }
}

fn spawn(name: &str, bin: &std::path::Path, args: &[&str]) -> Result<DaemonHandle> {
    let path = Binaries::resolve(bin)?;
    tracing::info!(daemon = name, bin = %path.display(), ?args, "starting daemon");

    let child = Command::new(&path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::Spawn {
            command: format!("{} {}", path.display(), args.join(" ")),
            source: e,
        })?;

    Ok(DaemonHandle {
        name: name.to_string(),
        child,
    })
}

/// Start the execution-engine server bound to the chain home's domain socket
pub fn spawn_engine(config: &Config, home: &ChainHome) -> Result<DaemonHandle> {
    let socket = home.engine_socket();
    if let Some(dir) = socket.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let socket = socket.display().to_string();
    spawn("engine", &config.binaries.engine, &[socket.as_str()])
}

/// Start the node daemon
pub fn spawn_node(config: &Config) -> Result<DaemonHandle> {
    spawn("node", &config.binaries.node, &["start"])
}

/// Check whether an externally started process still exists
///
/// Signal 0 tests process existence without side effects. Used for daemons
/// the harness did not spawn itself (multi-node clusters).
#[cfg(unix)]
pub fn pid_alive(pid: u32) -> bool {
    unsafe { libc::kill(pid as i32, 0) == 0 }
}
