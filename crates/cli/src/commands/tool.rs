// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `outrun tool` - Invoke the agent tool with JSON arguments

use anyhow::{Context, Result};
use clap::Args;
use outrun_runner::ProcessTool;

#[derive(Args, Debug)]
pub struct ToolArgs {
    /// Tool-call arguments as JSON, e.g. '{"file_name":"ls","arguments":"-la"}'
    #[arg(required_unless_present = "schema")]
    pub request: Option<String>,

    /// Print the tool's name, description and parameter schema instead
    #[arg(long)]
    pub schema: bool,
}

pub(crate) fn definition() -> serde_json::Value {
    serde_json::json!({
        "name": ProcessTool::NAME,
        "description": ProcessTool::DESCRIPTION,
        "parameters": ProcessTool::parameters_schema(),
    })
}

pub async fn handle(args: ToolArgs) -> Result<()> {
    let request = match (&args.request, args.schema) {
        (_, true) | (None, _) => return crate::output::print_json(&definition()),
        (Some(request), false) => request,
    };
    let arguments: serde_json::Value =
        serde_json::from_str(request).context("tool arguments are not valid JSON")?;

    let tool = ProcessTool::with_cancel_token(super::cancel_on_ctrl_c());
    let text = tool.invoke_json(&arguments).await?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
