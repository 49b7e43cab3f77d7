// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{HandlerResult, StartedProcess};
use parking_lot::Mutex;

#[derive(Default)]
struct Recorder {
    started: Mutex<Vec<(RunId, Option<u32>)>>,
    finished: Mutex<Vec<ExecutionResult>>,
}

impl RunObserver for Recorder {
    fn on_started(&self, process: &StartedProcess) -> HandlerResult {
        self.started.lock().push((process.run_id().clone(), process.pid()));
        Ok(())
    }

    fn on_finished(&self, result: &ExecutionResult) -> HandlerResult {
        self.finished.lock().push(result.clone());
        Ok(())
    }
}

struct Hostile;

impl RunObserver for Hostile {
    fn on_started(&self, _process: &StartedProcess) -> HandlerResult {
        panic!("started handler bug");
    }

    fn on_finished(&self, _result: &ExecutionResult) -> HandlerResult {
        Err("finished handler refused".into())
    }
}

#[cfg(unix)]
#[tokio::test]
async fn fires_started_and_finished_once() {
    let recorder = Arc::new(Recorder::default());
    let result = ProcessRunner::new(sh("echo hi"))
        .observer(recorder.clone())
        .run()
        .await
        .unwrap();

    let started = recorder.started.lock().clone();
    let finished = recorder.finished.lock().clone();
    assert_eq!(started.len(), 1);
    assert_eq!(finished.len(), 1);
    assert_eq!(&started[0].0, result.run_id());
    assert!(started[0].1.is_some());
    assert_eq!(finished[0], result);
}

#[cfg(unix)]
#[tokio::test]
async fn faulty_observers_do_not_affect_the_run() {
    let recorder = Arc::new(Recorder::default());
    let result = ProcessRunner::new(sh("echo hi; exit 4"))
        .observer(Arc::new(Hostile))
        .observer(recorder.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(result.exit_code(), Some(4));
    assert_eq!(texts(&result, LineLevel::Info), ["hi"]);
    assert_eq!(recorder.started.lock().len(), 1);
    assert_eq!(recorder.finished.lock().len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn started_handle_can_kill_the_tree() {
    struct Killer;
    impl RunObserver for Killer {
        fn on_started(&self, process: &StartedProcess) -> HandlerResult {
            process.kill_tree();
            Ok(())
        }
    }

    let result = ProcessRunner::new(RunnerConfig::new("sleep").arguments("30"))
        .observer(Arc::new(Killer))
        .run()
        .await
        .unwrap();

    // SIGKILL from outside the run is an ordinary exit as far as the race is concerned.
    assert!(result.completed());
    assert_eq!(result.exit_code(), Some(137));
}

#[cfg(unix)]
#[tokio::test]
async fn timed_out_run_still_notifies_finished() {
    let (observer, mut rx) = ChannelObserver::channel(4);
    let result = ProcessRunner::new(RunnerConfig::new("sleep").arguments("5").timeout(Duration::from_millis(50)))
        .observer(Arc::new(observer))
        .run()
        .await
        .unwrap();

    let events = events(&mut rx);
    assert_eq!(events.len(), 2);
    match &events[1] {
        RunEvent::Finished(finished) => assert_eq!(finished, &result),
        other => panic!("expected Finished, got {other:?}"),
    }
    assert!(result.timed_out());
}

#[cfg(unix)]
#[tokio::test]
async fn runs_inside_the_configured_log_span() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("outrun_runner=trace,outrun::output=trace")
        .with_test_writer()
        .finish();
    let _default = tracing::subscriber::set_default(subscriber);

    let parent = tracing::info_span!("caller", job = "unit-test");
    let result = sh("echo traced").log_span(parent).run().await.unwrap();

    assert_eq!(result.exit_code(), Some(0));
}
