// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

/// Version string: package version plus the git hash captured at build time.
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")");

/// Log filter directives: `OUTRUN_LOG` > `RUST_LOG` > `warn`.
pub fn log_filter() -> String {
    std::env::var("OUTRUN_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

/// Write logs to this file instead of stderr (`OUTRUN_LOG_FILE`).
pub fn log_file() -> Option<PathBuf> {
    std::env::var("OUTRUN_LOG_FILE").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Default run timeout in milliseconds when `--timeout-ms` is not given
/// (`OUTRUN_TIMEOUT_MS`; unset or `0` means no timeout).
pub fn default_timeout_ms() -> Option<u64> {
    std::env::var("OUTRUN_TIMEOUT_MS").ok().and_then(|s| s.parse::<u64>().ok()).filter(|&ms| ms > 0)
}

/// `NO_COLOR=1` disables color.
pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

/// `COLOR=1` forces color.
pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
