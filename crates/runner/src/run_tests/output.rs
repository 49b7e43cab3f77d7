// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use parking_lot::Mutex;
use serial_test::serial;

#[tokio::test]
async fn stdout_is_info_and_stderr_is_error() {
    let result = sh("echo out; echo err >&2; echo more").run().await.unwrap();

    assert_eq!(texts(&result, LineLevel::Info), ["out", "more"]);
    assert_eq!(texts(&result, LineLevel::Error), ["err"]);
}

#[tokio::test]
async fn preserves_order_within_a_stream() {
    let script = "i=0; while [ $i -lt 200 ]; do echo $i; echo e$i >&2; i=$((i+1)); done";
    let result = sh(script).run().await.unwrap();

    let expected: Vec<String> = (0..200).map(|i| i.to_string()).collect();
    assert_eq!(texts(&result, LineLevel::Info), expected);
    let expected_err: Vec<String> = (0..200).map(|i| format!("e{i}")).collect();
    assert_eq!(texts(&result, LineLevel::Error), expected_err);
}

#[tokio::test]
async fn delivers_final_line_without_newline() {
    let result = sh("printf 'a\\nb'").run().await.unwrap();
    assert_eq!(texts(&result, LineLevel::Info), ["a", "b"]);
}

#[tokio::test]
async fn captures_large_output() {
    let result = RunnerConfig::new("seq").arguments("1 5000").run().await.unwrap();
    assert_eq!(result.exit_code(), Some(0));
    assert_eq!(result.lines().len(), 5000);
    assert_eq!(result.lines()[4999].text(), "5000");
}

#[tokio::test]
async fn line_callback_sees_every_line() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let result = sh("echo one; echo two >&2")
        .on_line(move |line| sink.lock().push(line.clone()))
        .run()
        .await
        .unwrap();

    let mut seen = seen.lock().clone();
    let mut captured = result.lines().to_vec();
    seen.sort_by_key(|l| l.text().to_string());
    captured.sort_by_key(|l| l.text().to_string());
    assert_eq!(seen, captured);
}

#[tokio::test]
async fn panicking_line_callback_does_not_break_the_run() {
    let result = sh("echo one; echo two")
        .on_line(|_| panic!("callback bug"))
        .run()
        .await
        .unwrap();

    assert_eq!(result.exit_code(), Some(0));
    assert_eq!(result.lines().len(), 2);
}

#[tokio::test]
async fn line_timestamps_fall_within_the_run() {
    let result = sh("echo a; sleep 0.05; echo b").run().await.unwrap();
    for line in result.lines() {
        assert!(line.timestamp() >= result.start_time());
        assert!(line.timestamp() <= result.end_time());
    }
}

#[tokio::test]
#[serial]
async fn env_overrides_merge_with_inherited_environment() {
    std::env::set_var("OUTRUN_INHERITED", "kept");
    let result = sh("echo \"$OUTRUN_INHERITED:$OUTRUN_OVERRIDE\"")
        .env("OUTRUN_OVERRIDE", "added")
        .run()
        .await
        .unwrap();
    std::env::remove_var("OUTRUN_INHERITED");

    assert_eq!(texts(&result, LineLevel::Info), ["kept:added"]);
}

#[tokio::test]
async fn runs_in_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    let result = RunnerConfig::new("pwd").arguments("-P").cwd(dir.path()).run().await.unwrap();

    let expected = dir.path().canonicalize().unwrap();
    assert_eq!(texts(&result, LineLevel::Info), [expected.display().to_string()]);
}
