//! `outrun run` specs: exit codes, output capture, timeouts.

use crate::prelude::*;

#[test]
fn silent_success_prints_nothing_to_stdout() {
    cli().args(&["run", "--", "true"]).passes().stdout_eq("").stderr_has("exited with code 0");
}

#[test]
fn stdout_and_stderr_are_forwarded() {
    let run = cli().args(&["run", "--", "sh", "-c", "echo to-out; echo to-err >&2"]).passes();
    assert_eq!(run.stdout, "to-out\n");
    assert!(run.stderr.contains("to-err"));
}

#[test]
fn child_exit_code_becomes_ours() {
    cli().args(&["run", "--", "sh", "-c", "exit 7"]).exits_with(7);
}

#[test]
fn rejected_flag_fails_with_error_output() {
    cli().args(&["run", "--", "ls", "--outrun-invalid-flag"]).fails().stderr_has("ls");
}

#[test]
fn timeout_exits_124() {
    cli()
        .args(&["run", "--timeout-ms", "100", "--", "sleep", "10"])
        .exits_with(124)
        .stderr_has("timed out");
}

#[test]
fn default_timeout_comes_from_environment() {
    cli()
        .env("OUTRUN_TIMEOUT_MS", "100")
        .args(&["run", "--", "sleep", "10"])
        .exits_with(124);
}

#[test]
fn missing_program_exits_125() {
    cli()
        .args(&["run", "--", "outrun-definitely-not-a-program"])
        .exits_with(125)
        .stderr_has("failed to run");
}

#[test]
fn argument_string_is_split() {
    cli()
        .args(&["run", "--args", "'two words' three", "--", "printf", "%s|"])
        .fails();
    cli()
        .args(&["run", "--args", "'%s|' 'two words' three", "printf"])
        .passes()
        .stdout_eq("two words|three|");
}

#[test]
fn env_overrides_reach_the_child() {
    cli()
        .args(&["run", "-e", "OUTRUN_SPEC=hello", "--", "sh", "-c", "echo $OUTRUN_SPEC"])
        .passes()
        .stdout_eq("hello\n");
}

#[test]
fn cwd_sets_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "").unwrap();
    cli()
        .args(&["run", "--cwd", dir.path().to_str().unwrap(), "--", "ls"])
        .passes()
        .stdout_has("marker.txt");
}

#[test]
fn json_output_reports_result_fields() {
    let run = cli()
        .args(&["run", "-o", "json", "--", "sh", "-c", "echo out; echo err >&2; exit 3"])
        .exits_with(3);
    let json = run.json();

    assert_eq!(json["completed"], true);
    assert_eq!(json["timed_out"], false);
    assert_eq!(json["exit_code"], 3);
    let lines: Vec<(String, String)> = json["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| (l["level"].as_str().unwrap().to_string(), l["text"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.contains(&("info".to_string(), "out".to_string())));
    assert!(lines.contains(&("error".to_string(), "err".to_string())));
    assert!(json["run_id"].as_str().unwrap().starts_with("run-"));
}

#[test]
fn json_output_for_timeout_has_no_exit_code() {
    let run = cli()
        .args(&["run", "-o", "json", "--timeout-ms", "50", "--", "sleep", "10"])
        .exits_with(124);
    let json = run.json();

    assert_eq!(json["completed"], false);
    assert_eq!(json["timed_out"], true);
    assert!(json["exit_code"].is_null());
}

#[test]
fn shell_mode_lets_the_shell_parse_the_command() {
    cli().args(&["run", "--shell", "--args", "$((6 * 7))", "echo"]).passes().stdout_has("42");
}

#[test]
fn log_file_receives_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("outrun.log");
    cli()
        .env("OUTRUN_LOG_FILE", &log)
        .env("OUTRUN_LOG", "debug")
        .args(&["run", "--", "true"])
        .passes();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("run finished"), "{contents}");
}
