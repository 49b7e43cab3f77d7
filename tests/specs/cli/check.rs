//! `outrun check` specs: startup sanity check.

use crate::prelude::*;

#[test]
fn engine_check_passes() {
    cli().args(&["check"]).passes().stdout_has("engine: ok (good exit 0");
}

#[test]
fn reports_required_tool_version() {
    cli()
        .args(&["check", "--require", "sh", "--version-arg", "-c 'echo 9.9'"])
        .passes()
        .stdout_has("sh: ok (9.9)");
}

#[test]
fn missing_required_tool_fails() {
    cli()
        .args(&["check", "--require", "outrun-definitely-not-a-tool"])
        .exits_with(1)
        .stdout_has("missing")
        .stderr_has("not available");
}

#[test]
fn json_report() {
    let run = cli().args(&["check", "-o", "json"]).passes();
    let json = run.json();
    assert_eq!(json["engine"], true);
    assert_eq!(json["good_exit_code"], 0);
    assert!(json.get("tool").is_none());
}
