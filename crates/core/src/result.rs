// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The consolidated result of one run.

use crate::{LineLevel, LineRecord, RunId};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::time::Duration;

/// How a run was decided.
///
/// Exactly one outcome is recorded per run; the flags exposed on
/// [`ExecutionResult`] are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Process exited and both output streams closed.
    Exited(i32),
    /// Timeout elapsed first; the process tree was killed.
    TimedOut,
    /// Process never started, or the run hit an internal fault.
    Failed,
}

crate::simple_display! {
    Outcome {
        Exited(..) => "exited",
        TimedOut => "timed out",
        Failed => "failed",
    }
}

/// Immutable summary of a completed (or aborted) run.
///
/// Invariants: `completed()` implies `exit_code().is_some()`, and
/// `timed_out()` implies `!completed()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    run_id: RunId,
    command: String,
    outcome: Outcome,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    lines: Vec<LineRecord>,
}

impl ExecutionResult {
    pub fn new(
        run_id: RunId,
        command: impl Into<String>,
        outcome: Outcome,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        lines: Vec<LineRecord>,
    ) -> Self {
        Self { run_id, command: command.into(), outcome, start_time, end_time, lines }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// The launched command line.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn completed(&self) -> bool {
        matches!(self.outcome, Outcome::Exited(_))
    }

    pub fn timed_out(&self) -> bool {
        matches!(self.outcome, Outcome::TimedOut)
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self.outcome {
            Outcome::Exited(code) => Some(code),
            Outcome::TimedOut | Outcome::Failed => None,
        }
    }

    /// True when the process completed with exit code 0.
    pub fn succeeded(&self) -> bool {
        self.exit_code() == Some(0)
    }

    pub fn was_killed(&self) -> bool {
        !self.completed()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Wall-clock time between start and end; zero if the clock went backwards.
    pub fn duration(&self) -> Duration {
        (self.end_time - self.start_time).to_std().unwrap_or_default()
    }

    /// [`duration`](Self::duration) in whole milliseconds, saturating at `u64::MAX`.
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<LineRecord> {
        self.lines
    }

    pub fn error_lines(&self) -> impl Iterator<Item = &LineRecord> {
        self.lines.iter().filter(|l| l.level() == LineLevel::Error)
    }

    /// Text of all lines, newline-joined.
    pub fn combined_output(&self) -> String {
        self.lines.iter().map(LineRecord::text).collect::<Vec<_>>().join("\n")
    }

    /// All lines with local timestamp and level, newline-joined.
    pub fn formatted_output(&self) -> String {
        self.lines.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }
}

impl Serialize for ExecutionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ExecutionResult", 9)?;
        s.serialize_field("run_id", &self.run_id)?;
        s.serialize_field("command", &self.command)?;
        s.serialize_field("completed", &self.completed())?;
        s.serialize_field("timed_out", &self.timed_out())?;
        s.serialize_field("exit_code", &self.exit_code())?;
        s.serialize_field("start_time", &self.start_time)?;
        s.serialize_field("end_time", &self.end_time)?;
        s.serialize_field("duration_ms", &self.duration_ms())?;
        s.serialize_field("lines", &self.lines)?;
        s.end()
    }
}

crate::test_builder! {
    pub struct ExecutionResultBuilder => ExecutionResult {
        set {
            run_id: RunId = RunId::from_string("run-test"),
            command: String = "true".to_string(),
            outcome: Outcome = Outcome::Exited(0),
            lines: Vec<LineRecord> = Vec::new(),
        }
        computed {
            start_time: DateTime<Utc> = Utc::now(),
            end_time: DateTime<Utc> = Utc::now(),
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
