// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::ffi::OsStr;

fn argv(command: &Command) -> Vec<String> {
    command.as_std().get_args().map(|a| a.to_string_lossy().into_owned()).collect()
}

#[test]
fn redirected_runs_program_directly() {
    let config = RunnerConfig::new("git").arguments("log --format='%h %s' -n 3");
    let command = build_command(&config).unwrap();

    assert_eq!(command.as_std().get_program(), OsStr::new("git"));
    assert_eq!(argv(&command), ["log", "--format=%h %s", "-n", "3"]);
}

#[test]
fn list_arguments_are_passed_untouched() {
    let config = RunnerConfig::new("echo").args(["a b", "'c'"]);
    let command = build_command(&config).unwrap();
    assert_eq!(argv(&command), ["a b", "'c'"]);
}

#[test]
fn malformed_argument_string_is_rejected() {
    let config = RunnerConfig::new("echo").arguments("'oops");
    assert!(build_command(&config).is_err());
}

#[cfg(unix)]
#[test]
fn shell_mediated_hands_line_to_sh() {
    let config = RunnerConfig::new("echo").arguments("$HOME").shell_mediated(true);
    let command = build_command(&config).unwrap();

    assert_eq!(command.as_std().get_program(), OsStr::new("sh"));
    assert_eq!(argv(&command), ["-c", "echo $HOME"]);
}

#[cfg(unix)]
#[yare::parameterized(
    plain = { "echo", "echo hi" },
    space_in_path = { "/opt/my tools/prog", "'/opt/my tools/prog' hi" },
    shell_syntax = { "true; exit 5", "'true; exit 5' hi" },
)]
fn shell_line_quotes_the_program(program: &str, expected: &str) {
    let config = RunnerConfig::new(program).arguments("hi").shell_mediated(true);
    assert_eq!(shell_line(&config), expected);
    assert_eq!(argv(&build_command(&config).unwrap()), ["-c", expected]);
}

#[test]
fn applies_cwd_and_env_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunnerConfig::new("pwd").cwd(dir.path()).env("OUTRUN_TEST_VAR", "1");
    let command = build_command(&config).unwrap();

    assert_eq!(command.as_std().get_current_dir(), Some(dir.path()));
    let envs: Vec<_> = command.as_std().get_envs().collect();
    assert!(envs.contains(&(OsStr::new("OUTRUN_TEST_VAR"), Some(OsStr::new("1")))));
}

#[test]
fn fake_launcher_counts_calls() {
    let launcher = FakeLauncher::not_created();
    assert!(matches!(launcher.launch(Command::new("x")), Ok(Launch::NotCreated)));
    assert!(matches!(launcher.launch(Command::new("x")), Ok(Launch::NotCreated)));
    assert_eq!(launcher.calls(), 2);

    let failing = FakeLauncher::failing(io::ErrorKind::NotFound);
    let err = failing.launch(Command::new("x")).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[tokio::test]
async fn os_launcher_reports_missing_program() {
    let config = RunnerConfig::new("outrun-definitely-not-a-program");
    let command = build_command(&config).unwrap();
    let err = OsLauncher.launch(command).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}
