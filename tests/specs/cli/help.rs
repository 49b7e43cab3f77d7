//! CLI help output specs

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn help_lists_subcommands() {
    cli().args(&["--help"]).passes().stdout_has("run").stdout_has("tool").stdout_has("check");
}

#[test]
fn run_help_shows_flags() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--timeout-ms")
        .stdout_has("--shell")
        .stdout_has("--env");
}

#[test]
fn run_help_warns_about_exit_status_collisions() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("124  the run timed out")
        .stdout_has("A program that itself exits 124, 125 or 130 yields the same status");
}

#[test]
fn version_shows_package_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["explode"]).exits_with(2);
}
