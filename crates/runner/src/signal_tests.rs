// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn starts_incomplete() {
    assert!(!CompletionSignal::new().is_complete());
}

#[test]
fn completing_twice_is_a_no_op() {
    let signal = CompletionSignal::new();
    assert!(signal.complete());
    assert!(!signal.complete());
    assert!(signal.is_complete());
}

#[test]
fn clones_share_state() {
    let signal = CompletionSignal::new();
    let other = signal.clone();
    other.complete();
    assert!(signal.is_complete());
}

#[tokio::test]
async fn wait_returns_immediately_when_already_complete() {
    let signal = CompletionSignal::new();
    signal.complete();
    tokio::time::timeout(Duration::from_millis(100), signal.wait()).await.unwrap();
}

#[tokio::test]
async fn wait_wakes_every_waiter() {
    let signal = CompletionSignal::new();
    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        })
        .collect();

    tokio::task::yield_now().await;
    signal.complete();

    for waiter in waiters {
        tokio::time::timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn wait_pends_until_completed() {
    let signal = CompletionSignal::new();
    let pending = tokio::time::timeout(Duration::from_millis(20), signal.wait()).await;
    assert!(pending.is_err());
}
