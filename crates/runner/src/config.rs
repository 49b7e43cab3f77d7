// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable configuration for one run.

use crate::args::{quote_argument, split_arguments, ArgsError};
use crate::{ExecutionResult, LineRecord, ProcessRunner, RunError};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Observer invoked synchronously for every captured line.
pub type LineCallback = Arc<dyn Fn(&LineRecord) + Send + Sync>;

/// Arguments passed to the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arguments {
    /// A single argument string, split with [`split_arguments`] at launch
    /// (or handed verbatim to the shell when shell-mediated).
    Line(String),
    /// Pre-split argv words.
    List(Vec<String>),
}

impl Default for Arguments {
    fn default() -> Self {
        Arguments::Line(String::new())
    }
}

impl Arguments {
    /// Resolve to argv words.
    pub fn to_argv(&self) -> Result<Vec<String>, ArgsError> {
        match self {
            Arguments::Line(line) => split_arguments(line),
            Arguments::List(words) => Ok(words.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Arguments::Line(line) => line.trim().is_empty(),
            Arguments::List(words) => words.is_empty(),
        }
    }
}

/// Renders as a shell-readable argument string.
impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arguments::Line(line) => f.write_str(line.trim()),
            Arguments::List(words) => {
                let quoted: Vec<String> = words.iter().map(|w| quote_argument(w)).collect();
                f.write_str(&quoted.join(" "))
            }
        }
    }
}

/// Everything needed to launch and supervise one process.
///
/// A config describes exactly one run. Builder methods take and return
/// `self`:
///
/// ```ignore
/// let config = RunnerConfig::new("git")
///     .arguments("status --short")
///     .cwd(repo)
///     .timeout(Duration::from_secs(10))
///     .env("GIT_PAGER", "cat");
/// ```
#[derive(Clone)]
pub struct RunnerConfig {
    pub(crate) program: String,
    pub(crate) arguments: Arguments,
    pub(crate) timeout: Option<Duration>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) env: Vec<(String, String)>,
    pub(crate) on_line: Option<LineCallback>,
    pub(crate) log_span: Option<tracing::Span>,
    pub(crate) shell_mediated: bool,
    pub(crate) cancel: CancellationToken,
}

impl RunnerConfig {
    /// Configure a run of `program` with no arguments and no timeout.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            arguments: Arguments::default(),
            timeout: None,
            cwd: None,
            env: Vec::new(),
            on_line: None,
            log_span: None,
            shell_mediated: false,
            cancel: CancellationToken::new(),
        }
    }

    outrun_core::setters! {
        set {
            shell_mediated: bool,
        }
        option {
            cwd: PathBuf,
            log_span: tracing::Span,
        }
    }

    /// Set the argument string.
    pub fn arguments(mut self, line: impl Into<String>) -> Self {
        self.arguments = Arguments::Line(line.into());
        self
    }

    /// Set pre-split arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = Arguments::List(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Timeout in milliseconds; `0` means no timeout.
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = (ms > 0).then(|| Duration::from_millis(ms));
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Override one environment variable; the inherited environment is kept.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Override several environment variables.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env.extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn on_line<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LineRecord) + Send + Sync + 'static,
    {
        self.on_line = Some(Arc::new(callback));
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn argument_list(&self) -> &Arguments {
        &self.arguments
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    /// Output is captured unless the shell mediates the launch.
    pub fn streams_redirected(&self) -> bool {
        !self.shell_mediated
    }

    /// `program args...` for display and logging.
    pub fn command_line(&self) -> String {
        if self.arguments.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.arguments)
        }
    }

    /// Construct a [`ProcessRunner`] for this config and run it.
    pub async fn run(self) -> Result<ExecutionResult, RunError> {
        ProcessRunner::new(self).run().await
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("program", &self.program)
            .field("arguments", &self.arguments)
            .field("timeout", &self.timeout)
            .field("cwd", &self.cwd)
            .field("env", &self.env)
            .field("on_line", &self.on_line.is_some())
            .field("shell_mediated", &self.shell_mediated)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
