// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run orchestration: launch, the completion race, termination and result
//! assembly.
//!
//! Each run resolves to exactly one decision:
//!
//! - **Ready**: the process exited and both output streams closed
//! - **TimedOut**: the configured timeout elapsed first
//! - **Cancelled**: the caller's token fired (re-checked after the race,
//!   so it wins over a result that was decided at the same moment)
//!
//! Every path except pre-start cancellation assembles an [`ExecutionResult`]
//! and notifies observers before returning.

use crate::env::stream_drain_grace;
use crate::error::RunFault;
use crate::launch::{build_command, Launch, Launcher, OsLauncher};
use crate::observer::{notify, RunObserver, StartedProcess};
use crate::stream::spawn_reader;
use crate::terminate::terminate;
use crate::{
    CompletionSignal, ExecutionResult, LineLevel, Outcome, OutputSink, ProcessGuard, RunError,
    RunId, RunnerConfig,
};
use chrono::{DateTime, Utc};
use outrun_core::format_duration;
use std::io;
use std::process::ExitStatus;
use std::sync::Arc;
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::field::Empty;
use tracing::Instrument;

/// Supervises exactly one run of a [`RunnerConfig`].
pub struct ProcessRunner {
    config: RunnerConfig,
    observers: Vec<Arc<dyn RunObserver>>,
    launcher: Arc<dyn Launcher>,
}

/// Per-run mutable state. Never shared across runs.
struct RunContext {
    run_id: RunId,
    command: String,
    sink: Arc<OutputSink>,
    stdout_closed: CompletionSignal,
    stderr_closed: CompletionSignal,
    start_time: DateTime<Utc>,
}

impl RunContext {
    fn new(run_id: RunId, config: &RunnerConfig) -> Self {
        Self {
            run_id,
            command: config.command_line(),
            sink: Arc::new(OutputSink::new(config.on_line.clone())),
            stdout_closed: CompletionSignal::new(),
            stderr_closed: CompletionSignal::new(),
            start_time: Utc::now(),
        }
    }

    fn finish(&self, outcome: Outcome) -> ExecutionResult {
        ExecutionResult::new(
            self.run_id.clone(),
            self.command.clone(),
            outcome,
            self.start_time,
            Utc::now(),
            self.sink.snapshot(),
        )
    }
}

enum Decision {
    Ready(io::Result<ExitStatus>),
    TimedOut,
    Cancelled,
}

enum Ended {
    Decided(Outcome),
    Cancelled,
}

impl ProcessRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config, observers: Vec::new(), launcher: Arc::new(OsLauncher) }
    }

    /// Add an observer for started/finished notifications.
    pub fn observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Replace the launcher (tests and embedders).
    pub fn launcher(mut self, launcher: Arc<dyn Launcher>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Run the process to a decision.
    ///
    /// Start failures, timeouts and internal faults are reported through the
    /// returned result. Only cancellation is an error.
    pub async fn run(self) -> Result<ExecutionResult, RunError> {
        let run_id = RunId::new();
        if self.config.cancel.is_cancelled() {
            tracing::debug!(run_id = %run_id, cmd = %self.config.program, "cancelled before start");
            return Err(RunError::Cancelled { run_id, command: self.config.command_line() });
        }

        let span = match &self.config.log_span {
            Some(parent) => tracing::info_span!(
                parent: parent,
                "process.run",
                run_id = %run_id,
                cmd = %self.config.program,
                args = %self.config.arguments,
                exit_code = Empty,
                duration_ms = Empty,
            ),
            None => tracing::info_span!(
                "process.run",
                run_id = %run_id,
                cmd = %self.config.program,
                args = %self.config.arguments,
                exit_code = Empty,
                duration_ms = Empty,
            ),
        };
        self.run_in_span(run_id).instrument(span).await
    }

    async fn run_in_span(self, run_id: RunId) -> Result<ExecutionResult, RunError> {
        let ctx = RunContext::new(run_id, &self.config);

        let (outcome, cancelled) = match self.execute(&ctx).await {
            Ok(Ended::Decided(outcome)) => (outcome, false),
            Ok(Ended::Cancelled) => (Outcome::Failed, true),
            Err(fault) => {
                tracing::error!(error = %fault, "process run failed");
                (Outcome::Failed, false)
            }
        };

        let result = ctx.finish(outcome);
        let span = tracing::Span::current();
        if let Some(code) = result.exit_code() {
            span.record("exit_code", code);
        }
        span.record("duration_ms", result.duration_ms());
        tracing::info!(
            outcome = %result.outcome(),
            lines = result.lines().len(),
            elapsed = %format_duration(result.duration()),
            "run finished"
        );

        notify(&self.observers, "on_finished", |o| o.on_finished(&result));

        if cancelled {
            return Err(RunError::Cancelled { run_id: ctx.run_id, command: ctx.command });
        }
        Ok(result)
    }

    async fn execute(&self, ctx: &RunContext) -> Result<Ended, RunFault> {
        let command = build_command(&self.config)?;
        let launched = self
            .launcher
            .launch(command)
            .map_err(|source| RunFault::Spawn { command: self.config.program.clone(), source })?;

        let mut child = match launched {
            Launch::Spawned(child) => child,
            Launch::NotCreated if self.config.shell_mediated => {
                tracing::info!("shell created no new process, treating as success without output");
                return Ok(Ended::Decided(Outcome::Exited(0)));
            }
            Launch::NotCreated => {
                ctx.sink.error("failed to start process");
                return Err(RunFault::NotCreated { command: self.config.program.clone() });
            }
        };

        let guard = ProcessGuard::new(child.id());
        let _registration = guard.cancel_on(&self.config.cancel);
        tracing::debug!(pid = ?guard.pid(), "process started");

        let ended = self.supervise(ctx, &mut child, &guard).await;
        guard.release();
        ended
    }

    async fn supervise(
        &self,
        ctx: &RunContext,
        child: &mut Child,
        guard: &ProcessGuard,
    ) -> Result<Ended, RunFault> {
        let started =
            StartedProcess::new(ctx.run_id.clone(), ctx.command.clone(), Utc::now(), guard.clone());
        notify(&self.observers, "on_started", |o| o.on_started(&started));

        let redirected = self.config.streams_redirected();
        let readers = if redirected {
            match attach_readers(ctx, child) {
                Ok(readers) => readers,
                Err(fault) => {
                    terminate(child, guard).await;
                    return Err(fault);
                }
            }
        } else {
            Vec::new()
        };

        // A process that is already gone may never deliver stream-closed
        // callbacks; satisfy them now so the ready condition can resolve.
        if matches!(child.try_wait(), Ok(Some(_))) {
            ctx.stdout_closed.complete();
            ctx.stderr_closed.complete();
        }

        let cancel = &self.config.cancel;
        let timeout = self.config.timeout;
        let decision = {
            let ready = async {
                let (status, (), ()) = tokio::join!(
                    child.wait(),
                    wait_if(redirected, &ctx.stdout_closed),
                    wait_if(redirected, &ctx.stderr_closed),
                );
                status
            };
            let expire = async move {
                match timeout {
                    Some(duration) => tokio::time::sleep(duration).await,
                    None => std::future::pending::<()>().await,
                }
            };
            tokio::select! {
                biased;
                status = ready => Decision::Ready(status),
                () = cancel.cancelled() => Decision::Cancelled,
                () = expire => Decision::TimedOut,
            }
        };
        let decision = if cancel.is_cancelled() { Decision::Cancelled } else { decision };

        match decision {
            Decision::Ready(Ok(status)) => {
                drain(readers).await;
                Ok(Ended::Decided(Outcome::Exited(exit_code(status))))
            }
            Decision::Ready(Err(source)) => {
                terminate(child, guard).await;
                drain(readers).await;
                Err(RunFault::Wait { command: self.config.program.clone(), source })
            }
            Decision::TimedOut => {
                tracing::warn!(
                    timeout_ms = timeout.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
                    "process timed out, killing process tree"
                );
                terminate(child, guard).await;
                drain(readers).await;
                Ok(Ended::Decided(Outcome::TimedOut))
            }
            Decision::Cancelled => {
                tracing::info!("run cancelled, killing process tree");
                terminate(child, guard).await;
                drain(readers).await;
                Ok(Ended::Cancelled)
            }
        }
    }
}

fn attach_readers(ctx: &RunContext, child: &mut Child) -> Result<Vec<JoinHandle<()>>, RunFault> {
    let stdout = child.stdout.take().ok_or(RunFault::MissingPipe { stream: "stdout" })?;
    let stderr = child.stderr.take().ok_or(RunFault::MissingPipe { stream: "stderr" })?;
    Ok(vec![
        spawn_reader(stdout, LineLevel::Info, Arc::clone(&ctx.sink), ctx.stdout_closed.clone()),
        spawn_reader(stderr, LineLevel::Error, Arc::clone(&ctx.sink), ctx.stderr_closed.clone()),
    ])
}

async fn wait_if(enabled: bool, signal: &CompletionSignal) {
    if enabled {
        signal.wait().await;
    }
}

/// Give readers a shared grace period to deliver buffered lines, then abort
/// whatever is still running (e.g. a pipe held open by an escaped descendant).
async fn drain(readers: Vec<JoinHandle<()>>) {
    let deadline = tokio::time::Instant::now() + stream_drain_grace();
    for mut reader in readers {
        if tokio::time::timeout_at(deadline, &mut reader).await.is_err() {
            tracing::debug!("output reader still open after drain grace, aborting");
            reader.abort();
        }
    }
}

/// Exit code of a finished process; signal deaths map to `128 + signal`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

#[cfg(test)]
#[path = "run_tests/mod.rs"]
mod tests;
