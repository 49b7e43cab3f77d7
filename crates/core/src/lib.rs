// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! outrun-core: value types shared by the process engine and its consumers

pub mod macros;

pub mod id;
pub mod line;
pub mod result;
pub mod time_fmt;

pub use id::{short, RunId};
pub use line::{LineLevel, LineRecord};
#[cfg(any(test, feature = "test-support"))]
pub use result::ExecutionResultBuilder;
pub use result::{ExecutionResult, Outcome};
pub use time_fmt::format_duration;
