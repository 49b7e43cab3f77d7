// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-tree termination.
//!
//! Children are launched as leaders of their own process group, so killing
//! the group reaches every descendant that did not deliberately leave it.

use crate::env::reap_timeout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Forcefully kill the process tree rooted at `pid`.
///
/// Errors (tree already gone, permission denied) are logged and ignored.
#[cfg(unix)]
pub fn kill_tree(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        tracing::warn!(pid, "pid out of range, not killing");
        return;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) => tracing::debug!(pid, "killed process group"),
        Err(nix::errno::Errno::ESRCH) => tracing::trace!(pid, "process group already gone"),
        Err(e) => tracing::warn!(pid, error = %e, "failed to kill process group"),
    }
}

/// Forcefully kill the process tree rooted at `pid`.
///
/// Errors (tree already gone, permission denied) are logged and ignored.
#[cfg(windows)]
pub fn kill_tree(pid: u32) {
    let status = std::process::Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/T", "/F"])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status();
    match status {
        Ok(s) if s.success() => tracing::debug!(pid, "killed process tree"),
        Ok(s) => tracing::debug!(pid, status = %s, "taskkill did not succeed"),
        Err(e) => tracing::warn!(pid, error = %e, "failed to run taskkill"),
    }
}

/// Only the direct child is killed on this platform.
#[cfg(not(any(unix, windows)))]
pub fn kill_tree(pid: u32) {
    tracing::debug!(pid, "process tree kill unsupported on this platform");
}

/// Shared handle for killing one run's process tree.
///
/// Released once the run has reaped its child, after which kills are no-ops
/// so a recycled pid is never signalled.
#[derive(Debug, Clone)]
pub struct ProcessGuard {
    pid: Option<u32>,
    released: Arc<AtomicBool>,
}

impl ProcessGuard {
    pub fn new(pid: Option<u32>) -> Self {
        Self { pid, released: Arc::new(AtomicBool::new(false)) }
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Mark the process as reaped.
    pub fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// Kill the tree unless the run already released the guard.
    pub fn kill_tree(&self) {
        if self.is_released() {
            return;
        }
        if let Some(pid) = self.pid {
            kill_tree(pid);
        }
    }

    /// Kill the tree as soon as `token` is cancelled.
    ///
    /// Makes cancellation take effect immediately, even while the run is
    /// blocked waiting on the process. Dropping the registration detaches it.
    pub fn cancel_on(&self, token: &CancellationToken) -> CancelRegistration {
        let guard = self.clone();
        let token = token.clone();
        let task = tokio::spawn(async move {
            token.cancelled().await;
            tracing::debug!(pid = ?guard.pid, "cancellation requested, killing process tree");
            guard.kill_tree();
        });
        CancelRegistration { task }
    }
}

/// Live cancellation hook from [`ProcessGuard::cancel_on`].
#[derive(Debug)]
pub struct CancelRegistration {
    task: JoinHandle<()>,
}

impl Drop for CancelRegistration {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Kill the whole tree and reap the direct child.
///
/// The group is signalled even when the leader already exited, since
/// descendants may still hold it. Never fails.
pub(crate) async fn terminate(child: &mut Child, guard: &ProcessGuard) {
    let leader_running = matches!(child.try_wait(), Ok(None));

    guard.kill_tree();

    if !leader_running {
        return;
    }
    if let Err(e) = child.start_kill() {
        tracing::debug!(error = %e, "direct kill failed");
    }
    match tokio::time::timeout(reap_timeout(), child.wait()).await {
        Ok(Ok(status)) => tracing::debug!(%status, "killed process reaped"),
        Ok(Err(e)) => tracing::warn!(error = %e, "failed to reap killed process"),
        Err(_) => tracing::warn!(pid = ?guard.pid(), "killed process was not reaped in time"),
    }
}

#[cfg(test)]
#[path = "terminate_tests.rs"]
mod tests;
