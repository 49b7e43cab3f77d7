//! `outrun tool` specs: rendering for an agent conversation.

use crate::prelude::*;

#[test]
fn renders_exit_code_and_lines() {
    cli()
        .args(&["tool", r#"{"file_name":"sh","arguments":"-c 'echo hi; echo oops >&2; exit 2'"}"#])
        .passes()
        .stdout_has("ExitCode: 2\n")
        .stdout_has("[Info] hi")
        .stdout_has("[Error] oops");
}

#[test]
fn renders_timeout() {
    cli()
        .args(&["tool", r#"{"file_name":"sleep","arguments":"10","timeout_ms":50}"#])
        .passes()
        .stdout_eq("process did not complete (timeout: true, exit code: none)\n");
}

#[test]
fn schema_describes_parameters() {
    let run = cli().args(&["tool", "--schema"]).passes();
    let json = run.json();
    assert_eq!(json["name"], "run_process");
    assert_eq!(json["parameters"]["required"][0], "file_name");
}

#[test]
fn invalid_json_fails() {
    cli().args(&["tool", "{nope"]).fails().stderr_has("not valid JSON");
}
