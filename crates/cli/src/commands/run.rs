// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `outrun run` - Run one program under the engine

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use outrun_core::{ExecutionResult, Outcome};
use outrun_runner::{RunError, RunnerConfig};

use crate::exit_error::{self, ExitError};
use crate::output::{self, OutputFormat};

/// Exit status table shown after `outrun run --help`.
pub const EXIT_STATUS_HELP: &str = "\
Exit status:
  N    the program's own exit code
  124  the run timed out and the process tree was killed
  125  the program could not be started
  130  the run was cancelled (Ctrl-C)

A program that itself exits 124, 125 or 130 yields the same status; use
`-o json` and check `completed` / `timed_out` to tell them apart.";

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Program to run
    pub program: String,

    /// Arguments passed to the program
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Argument string, split like a shell would (instead of trailing arguments)
    #[arg(long = "args", value_name = "STRING", conflicts_with = "args", allow_hyphen_values = true)]
    pub arg_string: Option<String>,

    /// Kill the process tree after this many milliseconds (0 = no timeout)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Working directory for the program
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Environment overrides (can be repeated: -e KEY=VALUE)
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = super::parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Let the system shell launch the program (output is not captured)
    #[arg(long)]
    pub shell: bool,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub output: OutputFormat,
}

impl RunArgs {
    pub(crate) fn config(&self) -> RunnerConfig {
        let config = RunnerConfig::new(&self.program)
            .shell_mediated(self.shell)
            .envs(self.env.iter().cloned());
        let config = match &self.arg_string {
            Some(line) => config.arguments(line),
            None => config.args(self.args.iter().cloned()),
        };
        let config = match self.timeout_ms.or_else(crate::env::default_timeout_ms) {
            Some(ms) => config.timeout_ms(ms),
            None => config.no_timeout(),
        };
        match &self.cwd {
            Some(dir) => config.cwd(dir.clone()),
            None => config,
        }
    }
}

/// Process exit status for a finished run.
pub(crate) fn exit_status(result: &ExecutionResult) -> i32 {
    match result.outcome() {
        Outcome::Exited(code) => code,
        Outcome::TimedOut => exit_error::TIMED_OUT,
        Outcome::Failed => exit_error::START_FAILED,
    }
}

pub async fn handle(args: RunArgs) -> Result<()> {
    let mut config = args.config().cancel_token(super::cancel_on_ctrl_c());
    if args.output == OutputFormat::Text {
        config = config.on_line(output::echo_line);
    }

    let result = match config.run().await {
        Ok(result) => result,
        Err(RunError::Cancelled { command, .. }) => {
            return Err(ExitError::new(exit_error::CANCELLED, format!("outrun: `{command}` cancelled")).into());
        }
    };

    match args.output {
        OutputFormat::Text => output::print_summary(&result),
        OutputFormat::Json => output::print_json(&result)?,
    }

    match exit_status(&result) {
        0 => Ok(()),
        code => Err(ExitError::silent(code).into()),
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
