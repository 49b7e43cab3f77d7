// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn plain() -> String {
    format!("{:?}", Styles::plain())
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");

    assert_ne!(format!("{:?}", styles()), plain());
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn no_color_wins_over_forced_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::set_var("COLOR", "1");

    assert_eq!(format!("{:?}", styles()), plain());
    assert_eq!(failure("timed out"), "timed out");
    std::env::remove_var("NO_COLOR");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn forced_color_wraps_in_ansi256() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");

    assert_eq!(muted("exited 0"), "\x1b[38;5;240mexited 0\x1b[0m");
    assert_eq!(failure("failed"), "\x1b[38;5;167mfailed\x1b[0m");
    std::env::remove_var("COLOR");
}
