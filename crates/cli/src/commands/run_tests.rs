// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;
use std::time::Duration;

#[derive(Parser)]
struct Harness {
    #[command(flatten)]
    run: RunArgs,
}

fn parse(argv: &[&str]) -> RunArgs {
    Harness::parse_from(std::iter::once("outrun-run").chain(argv.iter().copied())).run
}

#[test]
fn trailing_arguments_keep_hyphens() {
    let args = parse(&["--timeout-ms", "500", "ls", "-la", "/tmp"]);
    assert_eq!(args.program, "ls");
    assert_eq!(args.args, ["-la", "/tmp"]);

    let config = args.config();
    assert_eq!(config.command_line(), "ls -la /tmp");
    assert_eq!(config.timeout_duration(), Some(Duration::from_millis(500)));
}

#[test]
fn argument_string_is_split_at_launch() {
    let args = parse(&["--args", "-n 'two words'", "echo"]);
    let config = args.config();
    assert_eq!(config.argument_list().to_argv().unwrap(), ["-n", "two words"]);
}

#[test]
fn argument_string_conflicts_with_trailing_arguments() {
    let parsed = Harness::try_parse_from(["outrun-run", "--args", "x", "echo", "y"]);
    assert!(parsed.is_err());
}

#[test]
fn zero_timeout_means_none() {
    let config = parse(&["--timeout-ms", "0", "true"]).config();
    assert_eq!(config.timeout_duration(), None);
}

#[test]
fn collects_env_and_shell_flags() {
    let args = parse(&["-e", "A=1", "--env", "B=two", "--shell", "-o", "json", "true"]);
    assert_eq!(args.env, [("A".to_string(), "1".to_string()), ("B".to_string(), "two".to_string())]);
    assert!(args.shell);
    assert_eq!(args.output, OutputFormat::Json);
    assert!(!args.config().streams_redirected());
}

#[yare::parameterized(
    success = { Outcome::Exited(0), 0 },
    child_code = { Outcome::Exited(3), 3 },
    timed_out = { Outcome::TimedOut, 124 },
    failed = { Outcome::Failed, 125 },
)]
fn maps_outcome_to_exit_status(outcome: Outcome, expected: i32) {
    let result = ExecutionResult::builder().outcome(outcome).build();
    assert_eq!(exit_status(&result), expected);
}
