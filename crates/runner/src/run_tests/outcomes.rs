// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn silent_success_has_exit_zero_and_no_lines() {
    let result = RunnerConfig::new("true").timeout(Duration::from_secs(10)).run().await.unwrap();

    assert!(result.completed());
    assert!(!result.timed_out());
    assert_eq!(result.exit_code(), Some(0));
    assert!(result.lines().is_empty());
    assert!(result.start_time() <= result.end_time());
}

#[tokio::test]
async fn reports_exit_code() {
    for (script, expected) in [("exit 0", 0), ("exit 1", 1), ("exit 42", 42), ("kill -TERM $$", 143)] {
        let result = sh(script).run().await.unwrap();
        assert!(result.completed(), "{script}");
        assert_eq!(result.exit_code(), Some(expected), "{script}");
    }
}

#[tokio::test]
async fn rejected_flag_yields_nonzero_exit_and_error_line() {
    let result = RunnerConfig::new("ls")
        .arguments("--outrun-invalid-flag")
        .timeout(Duration::from_secs(10))
        .run()
        .await
        .unwrap();

    assert!(result.completed());
    assert_ne!(result.exit_code(), Some(0));
    assert!(result.error_lines().next().is_some());
}

#[tokio::test]
async fn short_lived_processes_never_hang() {
    for _ in 0..25 {
        let result = tokio::time::timeout(Duration::from_secs(5), sh("exit 0").run())
            .await
            .expect("run hung")
            .unwrap();
        assert_eq!(result.exit_code(), Some(0));
    }
}

#[tokio::test]
async fn timeout_kills_and_returns_promptly() {
    let started = Instant::now();
    let result = RunnerConfig::new("sleep")
        .arguments("10")
        .timeout(Duration::from_millis(50))
        .run()
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(!result.completed());
    assert!(result.timed_out());
    assert_eq!(result.exit_code(), None);
    assert!(result.was_killed());
}

#[tokio::test]
async fn timeout_kills_descendants() {
    let result = sh("sleep 30 & echo $!; wait").timeout(Duration::from_millis(300)).run().await.unwrap();

    assert!(result.timed_out());
    let pid: u32 = texts(&result, LineLevel::Info)[0].parse().unwrap();
    assert!(gone(pid).await, "background child {pid} outlived the timeout");
}

#[tokio::test]
async fn missing_program_is_a_failed_run() {
    let result = RunnerConfig::new("outrun-definitely-not-a-program").run().await.unwrap();

    assert!(!result.completed());
    assert!(!result.timed_out());
    assert_eq!(result.exit_code(), None);
    assert!(result.lines().is_empty());
    assert_eq!(result.outcome(), Outcome::Failed);
}

#[tokio::test]
async fn malformed_argument_string_is_a_failed_run() {
    let result = RunnerConfig::new("echo").arguments("\"unterminated").run().await.unwrap();
    assert_eq!(result.outcome(), Outcome::Failed);
}

#[tokio::test]
async fn shell_mediated_run_reports_exit_without_output() {
    let result = RunnerConfig::new("sh")
        .arguments("-c 'echo hidden; exit 3'")
        .shell_mediated(true)
        .timeout(Duration::from_secs(10))
        .run()
        .await
        .unwrap();

    assert!(result.completed());
    assert_eq!(result.exit_code(), Some(3));
    assert!(result.lines().is_empty());
}

#[tokio::test]
async fn shell_mediated_program_path_may_contain_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let tools = dir.path().join("my tools");
    std::fs::create_dir(&tools).unwrap();
    let program = tools.join("run");
    std::os::unix::fs::symlink("/bin/sh", &program).unwrap();

    let config = RunnerConfig::new(program.to_string_lossy()).arguments("-c 'exit 7'");
    let shelled = config.clone().shell_mediated(true).timeout(Duration::from_secs(10)).run();
    let direct = config.timeout(Duration::from_secs(10)).run();
    let (shelled, direct) = tokio::join!(shelled, direct);

    assert_eq!(shelled.unwrap().exit_code(), Some(7));
    assert_eq!(direct.unwrap().exit_code(), Some(7));
}

#[tokio::test]
async fn shell_syntax_in_program_is_not_interpreted() {
    let result = RunnerConfig::new("true; exit 5")
        .shell_mediated(true)
        .timeout(Duration::from_secs(10))
        .run()
        .await
        .unwrap();

    assert_eq!(result.exit_code(), Some(127));
}

#[tokio::test]
async fn no_timeout_waits_for_exit() {
    let result = sh("sleep 0.1; exit 5").no_timeout().run().await.unwrap();
    assert_eq!(result.exit_code(), Some(5));
}

#[tokio::test]
async fn result_records_command_line_and_run_id() {
    let result = RunnerConfig::new("true").arguments("ignored words").run().await.unwrap();
    assert_eq!(result.command(), "true ignored words");
    assert!(result.run_id().as_str().starts_with(RunId::PREFIX));
}
