// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! outrun: run external programs with captured output, timeouts and
//! process-tree cleanup

mod color;
mod commands;
mod env;
mod exit_error;
mod logging;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(name = "outrun", version = env::VERSION, about = "Run external programs under supervision")]
#[command(styles = color::styles())]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program, capturing its output as leveled lines
    #[command(after_help = commands::run::EXIT_STATUS_HELP)]
    Run(commands::run::RunArgs),
    /// Invoke the agent tool with JSON arguments
    Tool(commands::tool::ToolArgs),
    /// Verify the engine observes success and failure correctly
    Check(commands::check::CheckArgs),
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Run(args)) => commands::run::handle(args).await,
        Some(Command::Tool(args)) => commands::tool::handle(args).await,
        Some(Command::Check(args)) => commands::check::handle(args).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let log_guard = logging::init();

    let code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(e) => match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("Error: {e:#}");
                1
            }
        },
    };

    drop(log_guard);
    std::process::exit(code);
}
