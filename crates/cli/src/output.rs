// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use outrun_core::{format_duration, ExecutionResult, LineLevel, LineRecord, Outcome};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Echo a captured line to the stream it came from.
pub fn echo_line(line: &LineRecord) {
    match line.level() {
        LineLevel::Info => println!("{}", line.text()),
        LineLevel::Error => eprintln!("{}", line.text()),
    }
}

/// One-line description of a finished run.
pub fn summary(result: &ExecutionResult) -> String {
    let elapsed = format_duration(result.duration());
    match result.outcome() {
        Outcome::Exited(code) => {
            format!("outrun: `{}` exited with code {code} in {elapsed}", result.command())
        }
        Outcome::TimedOut => format!("outrun: `{}` timed out after {elapsed}", result.command()),
        Outcome::Failed => format!("outrun: `{}` failed to run", result.command()),
    }
}

/// Print the summary to stderr, colored by outcome.
pub fn print_summary(result: &ExecutionResult) {
    let text = summary(result);
    if result.succeeded() {
        eprintln!("{}", crate::color::muted(&text));
    } else {
        eprintln!("{}", crate::color::failure(&text));
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
