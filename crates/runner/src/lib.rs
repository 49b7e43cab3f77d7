// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! outrun-runner: asynchronous external-process execution engine
//!
//! Launches one child process per run, captures stdout/stderr as leveled
//! lines, enforces a timeout, honors cooperative cancellation and always
//! produces a single [`ExecutionResult`]. Only cancellation is reported as an
//! error.
//!
//! ```ignore
//! let result = RunnerConfig::new("ls")
//!     .arguments("-la /tmp")
//!     .timeout(Duration::from_secs(5))
//!     .run()
//!     .await?;
//! ```

pub mod args;
pub mod config;
mod env;
pub mod error;
pub mod launch;
pub mod observer;
pub mod precondition;
pub mod run;
pub mod signal;
pub mod sink;
mod stream;
pub mod terminate;
pub mod tool;

pub use args::{quote_argument, split_arguments, ArgsError};
pub use config::{Arguments, LineCallback, RunnerConfig};
pub use error::RunError;
#[cfg(any(test, feature = "test-support"))]
pub use launch::FakeLauncher;
pub use launch::{Launch, Launcher, OsLauncher};
pub use observer::{ChannelObserver, HandlerResult, RunEvent, RunObserver, StartedProcess};
pub use outrun_core::{ExecutionResult, LineLevel, LineRecord, Outcome, RunId};
pub use precondition::{EngineReport, PreconditionError, ToolAvailability};
pub use run::ProcessRunner;
pub use signal::CompletionSignal;
pub use sink::OutputSink;
pub use terminate::{kill_tree, ProcessGuard};
pub use tool::{ProcessTool, ToolError, ToolRequest};
pub use tokio_util::sync::CancellationToken;
