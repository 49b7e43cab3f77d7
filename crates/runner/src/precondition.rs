// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup sanity checks.
//!
//! Confirms the engine can tell success from failure on this host before
//! anything depends on it, and probes for optional external tools.

use crate::{ExecutionResult, RunError, RunnerConfig};
use std::time::Duration;

const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Observed results of the known-good and known-bad runs.
#[derive(Debug, Clone)]
pub struct EngineReport {
    pub good: ExecutionResult,
    pub bad: ExecutionResult,
}

/// Whether an external tool could be run, and the version it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolAvailability {
    pub available: bool,
    pub version: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PreconditionError {
    #[error("known-good command `{command}` was not observed succeeding ({observed})")]
    GoodCommandFailed { command: String, observed: String },

    #[error("known-bad command `{command}` was not observed failing ({observed})")]
    BadCommandPassed { command: String, observed: String },

    #[error("required tool `{program}` is not available")]
    ToolMissing { program: String },

    #[error(transparent)]
    Cancelled(#[from] RunError),
}

#[cfg(unix)]
fn known_good() -> RunnerConfig {
    RunnerConfig::new("sh").args(["-c", "exit 0"])
}

#[cfg(windows)]
fn known_good() -> RunnerConfig {
    RunnerConfig::new("cmd").args(["/C", "exit 0"])
}

#[cfg(unix)]
fn known_bad() -> RunnerConfig {
    RunnerConfig::new("ls").arguments("--outrun-invalid-flag")
}

#[cfg(windows)]
fn known_bad() -> RunnerConfig {
    RunnerConfig::new("cmd").args(["/C", "dir /outrun-invalid-flag"])
}

fn describe(result: &ExecutionResult) -> String {
    let errors = result.error_lines().count();
    match result.exit_code() {
        Some(code) => format!("{}, exit code {code}, {errors} error lines", result.outcome()),
        None => format!("{}, {errors} error lines", result.outcome()),
    }
}

/// Run the known-good and known-bad commands and confirm the engine observes
/// success and failure correctly.
pub async fn check_engine() -> Result<EngineReport, PreconditionError> {
    let good_config = known_good().timeout(CHECK_TIMEOUT);
    let command = good_config.command_line();
    let good = good_config.run().await?;
    if !(good.completed() && good.exit_code() == Some(0)) {
        return Err(PreconditionError::GoodCommandFailed { command, observed: describe(&good) });
    }

    let bad_config = known_bad().timeout(CHECK_TIMEOUT);
    let command = bad_config.command_line();
    let bad = bad_config.run().await?;
    let failed = bad.exit_code().is_some_and(|code| code != 0);
    if !failed || bad.error_lines().next().is_none() {
        return Err(PreconditionError::BadCommandPassed { command, observed: describe(&bad) });
    }

    tracing::debug!("engine precondition check passed");
    Ok(EngineReport { good, bad })
}

/// Probe `program` by running it with `version_arg`.
///
/// The version is the trimmed combined output of a zero-exit run.
pub async fn check_tool(program: &str, version_arg: &str) -> Result<ToolAvailability, RunError> {
    let result = RunnerConfig::new(program).arguments(version_arg).timeout(CHECK_TIMEOUT).run().await?;
    if !result.succeeded() {
        tracing::debug!(program, outcome = %result.outcome(), "tool probe failed");
        return Ok(ToolAvailability { available: false, version: None });
    }
    let output = result.combined_output();
    let version = Some(output.trim().to_string()).filter(|v| !v.is_empty());
    Ok(ToolAvailability { available: true, version })
}

/// Like [`check_tool`] but a missing tool is an error.
pub async fn require_tool(
    program: &str,
    version_arg: &str,
) -> Result<ToolAvailability, PreconditionError> {
    let availability = check_tool(program, version_arg).await?;
    if !availability.available {
        return Err(PreconditionError::ToolMissing { program: program.to_string() });
    }
    Ok(availability)
}

#[cfg(test)]
#[path = "precondition_tests.rs"]
mod tests;
