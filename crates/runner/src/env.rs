// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine.

use std::time::Duration;

fn millis_var(name: &str) -> Option<Duration> {
    std::env::var(name).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// How long output readers may keep draining after a run is decided
/// (default 250ms, configurable via `OUTRUN_STREAM_DRAIN_MS`).
pub(crate) fn stream_drain_grace() -> Duration {
    millis_var("OUTRUN_STREAM_DRAIN_MS").unwrap_or(Duration::from_millis(250))
}

/// How long to wait for a killed process to be reaped
/// (default 2s, configurable via `OUTRUN_REAP_TIMEOUT_MS`).
pub(crate) fn reap_timeout() -> Duration {
    millis_var("OUTRUN_REAP_TIMEOUT_MS").unwrap_or(Duration::from_secs(2))
}
