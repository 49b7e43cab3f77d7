// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `outrun check` - Startup sanity check

use anyhow::Result;
use clap::Args;
use outrun_runner::precondition::{self, PreconditionError};
use serde::Serialize;

use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Also require this program to be runnable
    #[arg(long, value_name = "PROGRAM")]
    pub require: Option<String>,

    /// Argument used to probe the required program
    #[arg(long, value_name = "ARG", default_value = "--version", requires = "require", allow_hyphen_values = true)]
    pub version_arg: String,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    engine: bool,
    good_exit_code: Option<i32>,
    bad_exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool: Option<ToolReport>,
}

#[derive(Debug, Serialize)]
struct ToolReport {
    program: String,
    available: bool,
    version: Option<String>,
}

pub async fn handle(args: CheckArgs) -> Result<()> {
    let engine = precondition::check_engine().await.map_err(|e| {
        let code = match e {
            PreconditionError::Cancelled(_) => crate::exit_error::CANCELLED,
            _ => 1,
        };
        ExitError::new(code, format!("engine check failed: {e}"))
    })?;

    let tool = match &args.require {
        Some(program) => {
            let availability = precondition::check_tool(program, &args.version_arg)
                .await
                .map_err(|e| ExitError::new(crate::exit_error::CANCELLED, e.to_string()))?;
            Some(ToolReport {
                program: program.clone(),
                available: availability.available,
                version: availability.version,
            })
        }
        None => None,
    };

    let report = CheckReport {
        engine: true,
        good_exit_code: engine.good.exit_code(),
        bad_exit_code: engine.bad.exit_code(),
        tool,
    };
    match args.output {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => output::print_json(&report)?,
    }

    match &report.tool {
        Some(tool) if !tool.available => {
            Err(ExitError::new(1, format!("required tool `{}` is not available", tool.program)).into())
        }
        _ => Ok(()),
    }
}

fn print_text(report: &CheckReport) {
    let code = |c: Option<i32>| c.map_or_else(|| "none".to_string(), |c| c.to_string());
    println!(
        "engine: ok (good exit {}, bad exit {})",
        code(report.good_exit_code),
        code(report.bad_exit_code)
    );
    if let Some(tool) = &report.tool {
        match (&tool.version, tool.available) {
            (_, false) => println!("{}: missing", tool.program),
            (Some(version), true) => {
                println!("{}: ok ({})", tool.program, version.lines().next().unwrap_or(version))
            }
            (None, true) => println!("{}: ok", tool.program),
        }
    }
}
