// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod cancellation;
mod launch_failures;
mod notifications;
#[cfg(unix)]
mod outcomes;
#[cfg(unix)]
mod output;

use super::*;
use crate::{ChannelObserver, FakeLauncher, RunEvent};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A redirected `sh -c` run with a generous safety timeout.
fn sh(script: &str) -> RunnerConfig {
    RunnerConfig::new("sh").args(["-c", script]).timeout(Duration::from_secs(10))
}

fn texts(result: &ExecutionResult, level: LineLevel) -> Vec<String> {
    result.lines().iter().filter(|l| l.level() == level).map(|l| l.text().to_string()).collect()
}

fn events(rx: &mut mpsc::Receiver<RunEvent>) -> Vec<RunEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Zombies awaiting reaping by init count as dead.
#[cfg(target_os = "linux")]
fn alive(pid: u32) -> bool {
    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.trim_start().chars().next())
            .is_some_and(|state| state != 'Z' && state != 'X'),
        Err(_) => false,
    }
}

#[cfg(all(unix, not(target_os = "linux")))]
fn alive(pid: u32) -> bool {
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), None).is_ok()
}

/// Poll until `pid` is gone, for at most five seconds.
#[cfg(unix)]
async fn gone(pid: u32) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if !alive(pid) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}
