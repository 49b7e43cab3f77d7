// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run error types.

use crate::ArgsError;
use outrun_core::RunId;

/// The only failure a run reports to its caller.
///
/// Everything else (start failures, timeouts, internal faults) is folded
/// into the returned `ExecutionResult`.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The cancellation token fired before or during the run.
    #[error("run {run_id} of `{command}` was cancelled")]
    Cancelled { run_id: RunId, command: String },
}

impl RunError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunError::Cancelled { .. })
    }
}

/// Faults that end a run as `Outcome::Failed`.
///
/// These are logged and absorbed, never returned.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RunFault {
    #[error("invalid argument string: {0}")]
    Arguments(#[from] ArgsError),

    #[error("failed to spawn `{command}`: {source}")]
    Spawn { command: String, source: std::io::Error },

    #[error("launch of `{command}` created no process to observe")]
    NotCreated { command: String },

    #[error("spawned process has no {stream} pipe")]
    MissingPipe { stream: &'static str },

    #[error("failed to wait for `{command}`: {source}")]
    Wait { command: String, source: std::io::Error },
}
