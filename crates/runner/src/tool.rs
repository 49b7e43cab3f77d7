// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent tool that runs a command and renders the result as text.

use crate::{ExecutionResult, RunError, RunnerConfig};
use serde::Deserialize;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

fn default_timeout_ms() -> u64 {
    30_000
}

/// Arguments of one tool call, as sent by the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ToolRequest {
    pub file_name: String,
    #[serde(default)]
    pub arguments: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl ToolRequest {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            arguments: String::new(),
            timeout_ms: default_timeout_ms(),
            working_dir: None,
        }
    }

    outrun_core::setters! {
        into {
            arguments: String,
        }
        set {
            timeout_ms: u64,
        }
        option {
            working_dir: PathBuf,
        }
    }

    fn config(&self, cancel: &CancellationToken) -> RunnerConfig {
        let config = RunnerConfig::new(&self.file_name)
            .arguments(&self.arguments)
            .timeout_ms(self.timeout_ms)
            .cancel_token(cancel.clone());
        match &self.working_dir {
            Some(dir) => config.cwd(dir.clone()),
            None => config,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),
}

/// Runs an arbitrary command for a conversation and reports
/// `ExitCode: <n>` followed by the captured lines.
#[derive(Debug, Clone, Default)]
pub struct ProcessTool {
    cancel: CancellationToken,
}

impl ProcessTool {
    pub const NAME: &'static str = "run_process";

    pub const DESCRIPTION: &'static str = "Run a program with an argument string and return its \
        exit code followed by every line it wrote. Lines from standard error are tagged [Error], \
        lines from standard output [Info].";

    pub fn new() -> Self {
        Self::default()
    }

    /// Runs started by this tool are cancelled when `cancel` fires.
    pub fn with_cancel_token(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// JSON schema of [`ToolRequest`] for tool registration.
    pub fn parameters_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_name": { "type": "string", "description": "Program to run" },
                "arguments": { "type": "string", "description": "Argument string, split like a shell would" },
                "timeout_ms": {
                    "type": "integer",
                    "minimum": 0,
                    "default": default_timeout_ms(),
                    "description": "Kill the process tree after this many milliseconds (0 = no timeout)"
                },
                "working_dir": { "type": "string", "description": "Directory to run in" }
            },
            "required": ["file_name"]
        })
    }

    pub async fn invoke(&self, request: &ToolRequest) -> String {
        let outcome = request.config(&self.cancel).run().await;
        Self::render(&outcome)
    }

    /// Parse the model's arguments and run them.
    pub async fn invoke_json(&self, arguments: &serde_json::Value) -> Result<String, ToolError> {
        let request = ToolRequest::deserialize(arguments)?;
        Ok(self.invoke(&request).await)
    }

    pub fn render(outcome: &Result<ExecutionResult, RunError>) -> String {
        let result = match outcome {
            Ok(result) => result,
            Err(RunError::Cancelled { .. }) => return "process run was cancelled".to_string(),
        };
        match result.exit_code() {
            Some(code) if result.completed() => {
                let mut text = format!("ExitCode: {code}");
                for line in result.lines() {
                    text.push('\n');
                    text.push_str(&format!("[{}] {}", line.level(), line.text()));
                }
                text
            }
            code => format!(
                "process did not complete (timeout: {}, exit code: {})",
                result.timed_out(),
                code.map_or_else(|| "none".to_string(), |c| c.to_string()),
            ),
        }
    }
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
