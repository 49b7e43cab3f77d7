// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn cancelled_before_start_never_launches() {
    let token = CancellationToken::new();
    token.cancel();
    let launcher = Arc::new(FakeLauncher::not_created());
    let (observer, mut rx) = ChannelObserver::channel(8);

    let err = ProcessRunner::new(RunnerConfig::new("true").cancel_token(token))
        .launcher(launcher.clone())
        .observer(Arc::new(observer))
        .run()
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(launcher.calls(), 0);
    assert!(events(&mut rx).is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn cancel_mid_run_kills_and_errors() {
    let token = CancellationToken::new();
    let (observer, mut rx) = ChannelObserver::channel(8);
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let err = ProcessRunner::new(RunnerConfig::new("sleep").arguments("30").cancel_token(token))
        .observer(Arc::new(observer))
        .run()
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(5));

    let events = events(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], RunEvent::Started { .. }));
    match &events[1] {
        RunEvent::Finished(result) => {
            assert!(!result.completed());
            assert_eq!(result.exit_code(), None);
        }
        other => panic!("expected Finished, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn cancel_kills_the_whole_tree() {
    let token = CancellationToken::new();
    let grandchild = Arc::new(parking_lot::Mutex::new(None));
    let (seen, canceller) = (Arc::clone(&grandchild), token.clone());

    let err = sh("sleep 30 & echo $!; wait")
        .cancel_token(token)
        .on_line(move |line| {
            *seen.lock() = line.text().parse::<u32>().ok();
            canceller.cancel();
        })
        .run()
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    let pid = grandchild.lock().unwrap();
    assert!(gone(pid).await, "background child {pid} outlived cancellation");
}

#[cfg(unix)]
#[tokio::test]
async fn cancellation_wins_over_a_simultaneous_exit() {
    let token = CancellationToken::new();
    let canceller = token.clone();

    // The line arrives just before exit; cancelling there must still surface
    // as cancellation even though the process finishes on its own.
    let err = sh("echo done")
        .cancel_token(token)
        .on_line(move |_| canceller.cancel())
        .run()
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
}

#[cfg(unix)]
#[tokio::test]
async fn cancel_error_names_the_run() {
    let token = CancellationToken::new();
    token.cancel();
    let err = RunnerConfig::new("echo").arguments("hi").cancel_token(token).run().await.unwrap_err();

    let RunError::Cancelled { run_id, command } = &err;
    assert!(run_id.as_str().starts_with(RunId::PREFIX));
    assert_eq!(command, "echo hi");
    assert!(err.to_string().contains("was cancelled"));
}
