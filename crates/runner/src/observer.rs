// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Started/finished notifications.

use crate::{ExecutionResult, ProcessGuard, RunId};
use chrono::{DateTime, Utc};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result returned by observer handlers. Errors are logged, never propagated.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A process that has just been spawned.
#[derive(Debug, Clone)]
pub struct StartedProcess {
    run_id: RunId,
    command: String,
    pid: Option<u32>,
    started_at: DateTime<Utc>,
    guard: ProcessGuard,
}

impl StartedProcess {
    pub(crate) fn new(
        run_id: RunId,
        command: String,
        started_at: DateTime<Utc>,
        guard: ProcessGuard,
    ) -> Self {
        Self { run_id, command, pid: guard.pid(), started_at, guard }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Kill the process tree now. A no-op once the run has reaped it.
    pub fn kill_tree(&self) {
        self.guard.kill_tree();
    }
}

/// Receives lifecycle notifications for runs.
///
/// Handlers run synchronously on the run's task; keep them short. Returned
/// errors and panics are logged and otherwise ignored.
pub trait RunObserver: Send + Sync {
    /// Called once, right after the child process is spawned.
    fn on_started(&self, _process: &StartedProcess) -> HandlerResult {
        Ok(())
    }

    /// Called once with the assembled result, including after a cancellation.
    fn on_finished(&self, _result: &ExecutionResult) -> HandlerResult {
        Ok(())
    }
}

/// Lifecycle event forwarded by [`ChannelObserver`].
#[derive(Debug, Clone)]
pub enum RunEvent {
    Started { run_id: RunId, pid: Option<u32>, command: String },
    Finished(ExecutionResult),
}

impl RunEvent {
    pub fn run_id(&self) -> &RunId {
        match self {
            RunEvent::Started { run_id, .. } => run_id,
            RunEvent::Finished(result) => result.run_id(),
        }
    }
}

/// Forwards notifications into a bounded channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::Sender<RunEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<RunEvent>) -> Self {
        Self { tx }
    }

    /// Observer plus the receiving end of a channel with `capacity` slots.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<RunEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    fn forward(&self, event: RunEvent) -> HandlerResult {
        self.tx.try_send(event).map_err(|e| e.to_string().into())
    }
}

impl RunObserver for ChannelObserver {
    fn on_started(&self, process: &StartedProcess) -> HandlerResult {
        self.forward(RunEvent::Started {
            run_id: process.run_id().clone(),
            pid: process.pid(),
            command: process.command().to_string(),
        })
    }

    fn on_finished(&self, result: &ExecutionResult) -> HandlerResult {
        self.forward(RunEvent::Finished(result.clone()))
    }
}

/// Invoke `f` on every observer, isolating each from the others' faults.
pub(crate) fn notify<F>(observers: &[Arc<dyn RunObserver>], what: &'static str, f: F)
where
    F: Fn(&dyn RunObserver) -> HandlerResult,
{
    for observer in observers {
        match catch_unwind(AssertUnwindSafe(|| f(observer.as_ref()))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(handler = what, error = %e, "run observer failed"),
            Err(_) => tracing::warn!(handler = what, "run observer panicked"),
        }
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
