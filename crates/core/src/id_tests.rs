// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;

#[test]
fn run_id_has_prefix_and_fixed_length() {
    let id = RunId::new();
    assert!(id.as_str().starts_with("run-"));
    assert_eq!(id.suffix().len(), 19);
    assert_eq!(id.as_str().len(), 23);
}

#[test]
fn run_ids_are_unique() {
    let ids: HashSet<RunId> = (0..100).map(|_| RunId::new()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn run_id_short_truncates_suffix() {
    let id = RunId::from_string("run-abcdefghijklmnop");
    assert_eq!(id.short(8), "abcdefgh");
    assert_eq!(id.short(100), "abcdefghijklmnop");
}

#[test]
fn run_id_suffix_without_prefix_is_whole_id() {
    let id = RunId::from_string("custom");
    assert_eq!(id.suffix(), "custom");
}

#[test]
fn run_id_serializes_transparently() {
    let id = RunId::from_string("run-xyz");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"run-xyz\"");
    assert_eq!(id, "run-xyz");
}

#[yare::parameterized(
    shorter = { "abc", 8, "abc" },
    exact = { "abcdefgh", 8, "abcdefgh" },
    longer = { "abcdefghijklmnop", 8, "abcdefgh" },
    multibyte = { "äöüß", 2, "äö" },
    zero = { "abc", 0, "" },
)]
fn short_fn_on_str(input: &str, n: usize, expected: &str) {
    assert_eq!(short(input, n), expected);
}
