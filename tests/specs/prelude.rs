//! Shared helpers for CLI specs.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Path to the `outrun` binary, building it once if the workspace test run
/// did not.
fn outrun_bin() -> &'static Path {
    static BIN: OnceLock<PathBuf> = OnceLock::new();
    BIN.get_or_init(|| {
        let path = assert_cmd::cargo::cargo_bin("outrun");
        if !path.exists() {
            let status = std::process::Command::new(env!("CARGO"))
                .args(["build", "-p", "outrun", "--bin", "outrun"])
                .current_dir(env!("CARGO_MANIFEST_DIR"))
                .status()
                .expect("failed to invoke cargo");
            assert!(status.success(), "building outrun failed");
        }
        path
    })
}

/// Builder for one `outrun` invocation with a clean, uncolored environment.
pub fn cli() -> Cli {
    let mut cmd = Command::new(outrun_bin());
    cmd.env("NO_COLOR", "1")
        .env_remove("COLOR")
        .env_remove("OUTRUN_LOG")
        .env_remove("OUTRUN_LOG_FILE")
        .env_remove("OUTRUN_TIMEOUT_MS")
        .env_remove("RUST_LOG");
    Cli { cmd }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    fn output(mut self) -> std::process::Output {
        self.cmd.output().expect("failed to run outrun")
    }

    /// Run and expect exit code 0.
    pub fn passes(self) -> Run {
        let run = Run::from(self.output());
        assert_eq!(run.code, Some(0), "expected success\nstdout:\n{}\nstderr:\n{}", run.stdout, run.stderr);
        run
    }

    /// Run and expect a non-zero exit code.
    pub fn fails(self) -> Run {
        let run = Run::from(self.output());
        assert_ne!(run.code, Some(0), "expected failure\nstdout:\n{}\nstderr:\n{}", run.stdout, run.stderr);
        run
    }

    /// Run and expect exactly `code`.
    pub fn exits_with(self, code: i32) -> Run {
        let run = Run::from(self.output());
        assert_eq!(run.code, Some(code), "unexpected exit\nstdout:\n{}\nstderr:\n{}", run.stdout, run.stderr);
        run
    }
}

/// Captured result of one invocation.
pub struct Run {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Run {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Run {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout.as_str(), expected);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout is not JSON")
    }
}
