// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn released_guard_never_kills() {
    let guard = ProcessGuard::new(Some(u32::MAX));
    guard.release();
    assert!(guard.is_released());
    // Would log a warning for an out-of-range pid if it tried.
    guard.kill_tree();
}

#[test]
fn guard_without_pid_is_inert() {
    let guard = ProcessGuard::new(None);
    assert_eq!(guard.pid(), None);
    guard.kill_tree();
}

#[test]
fn clones_share_release_state() {
    let guard = ProcessGuard::new(Some(1));
    let other = guard.clone();
    other.release();
    assert!(guard.is_released());
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::process::Stdio;
    use tokio::process::Command;

    fn spawn_group(script: &str) -> Child {
        Command::new("sh")
            .arg("-c")
            .arg(script)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .kill_on_drop(true)
            .spawn()
            .unwrap()
    }

    // Zombies awaiting reaping by init count as dead.
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

    #[cfg(not(target_os = "linux"))]
    fn alive(pid: u32) -> bool {
        nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), None).is_ok()
    }

    #[tokio::test]
    async fn terminate_kills_and_reaps_running_leader() {
        let mut child = spawn_group("sleep 30");
        let guard = ProcessGuard::new(child.id());

        tokio::time::timeout(Duration::from_secs(5), terminate(&mut child, &guard))
            .await
            .unwrap();

        assert!(child.try_wait().unwrap().is_some());
    }

    #[tokio::test]
    async fn terminate_reaches_grandchildren() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("grandchild.pid");
        let script = format!("sleep 30 & echo $! > {}; wait", pid_file.display());
        let mut child = spawn_group(&script);
        let guard = ProcessGuard::new(child.id());

        let grandchild = loop {
            if let Ok(text) = std::fs::read_to_string(&pid_file) {
                if let Ok(pid) = text.trim().parse::<u32>() {
                    break pid;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        };

        terminate(&mut child, &guard).await;

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while alive(grandchild) && std::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(!alive(grandchild), "grandchild {grandchild} survived");
    }

    #[tokio::test]
    async fn terminate_after_exit_is_harmless() {
        let mut child = spawn_group("exit 0");
        let guard = ProcessGuard::new(child.id());
        child.wait().await.unwrap();
        terminate(&mut child, &guard).await;
    }

    #[tokio::test]
    async fn cancel_registration_kills_on_cancel() {
        let mut child = spawn_group("sleep 30");
        let guard = ProcessGuard::new(child.id());
        let token = CancellationToken::new();
        let _registration = guard.cancel_on(&token);

        token.cancel();

        let status = tokio::time::timeout(Duration::from_secs(5), child.wait())
            .await
            .unwrap()
            .unwrap();
        assert!(!status.success());
    }

    #[tokio::test]
    async fn dropped_registration_does_not_kill() {
        let mut child = spawn_group("sleep 0.3");
        let guard = ProcessGuard::new(child.id());
        let token = CancellationToken::new();
        drop(guard.cancel_on(&token));
        tokio::task::yield_now().await;

        token.cancel();

        let status = child.wait().await.unwrap();
        assert!(status.success());
    }
}
