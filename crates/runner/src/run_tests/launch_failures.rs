// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io;

async fn run_with(
    launcher: Arc<FakeLauncher>,
    config: RunnerConfig,
) -> (ExecutionResult, Vec<RunEvent>) {
    let (observer, mut rx) = ChannelObserver::channel(8);
    let result = ProcessRunner::new(config)
        .launcher(launcher)
        .observer(Arc::new(observer))
        .run()
        .await
        .unwrap();
    (result, events(&mut rx))
}

#[tokio::test]
async fn no_new_process_with_redirection_is_a_failure() {
    let launcher = Arc::new(FakeLauncher::not_created());
    let (result, events) = run_with(launcher.clone(), RunnerConfig::new("viewer")).await;

    assert_eq!(launcher.calls(), 1);
    assert!(!result.completed());
    assert_eq!(result.exit_code(), None);
    let errors: Vec<_> = result.error_lines().map(|l| l.text()).collect();
    assert_eq!(errors, ["failed to start process"]);
    assert_eq!(result.lines().len(), 1);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], RunEvent::Finished(_)));
}

#[tokio::test]
async fn no_new_process_under_shell_mediation_is_success() {
    let launcher = Arc::new(FakeLauncher::not_created());
    let config = RunnerConfig::new("open").arguments("https://example.com").shell_mediated(true);
    let (result, events) = run_with(launcher, config).await;

    assert!(result.completed());
    assert_eq!(result.exit_code(), Some(0));
    assert!(result.lines().is_empty());
    assert_eq!(events.len(), 1);
}

#[yare::parameterized(
    not_found = { io::ErrorKind::NotFound },
    permission_denied = { io::ErrorKind::PermissionDenied },
    other = { io::ErrorKind::Other },
)]
fn spawn_error_is_a_failed_run(kind: io::ErrorKind) {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    let launcher = Arc::new(FakeLauncher::failing(kind));
    let (result, events) = runtime.block_on(run_with(launcher, RunnerConfig::new("tool")));

    assert_eq!(result.outcome(), Outcome::Failed);
    assert!(!result.timed_out());
    assert_eq!(result.exit_code(), None);
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn argument_error_never_reaches_the_launcher() {
    let launcher = Arc::new(FakeLauncher::not_created());
    let (result, _) = run_with(launcher.clone(), RunnerConfig::new("tool").arguments("trailing\\")).await;

    assert_eq!(launcher.calls(), 0);
    assert_eq!(result.outcome(), Outcome::Failed);
}
