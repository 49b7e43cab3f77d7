// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command construction and the process-launch seam.

#[cfg(unix)]
use crate::args::quote_argument;
use crate::args::ArgsError;
use crate::RunnerConfig;
use std::io;
use std::process::Stdio;
use tokio::process::{Child, Command};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// What a launch attempt produced.
#[derive(Debug)]
pub enum Launch {
    /// A new child process is running.
    Spawned(Child),
    /// The launch succeeded but no new process was created (for example the
    /// request was handed to an already running instance).
    NotCreated,
}

/// Starts processes. Implemented by the OS launcher and by test fakes.
pub trait Launcher: Send + Sync {
    fn launch(&self, command: Command) -> io::Result<Launch>;
}

/// Spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsLauncher;

impl Launcher for OsLauncher {
    fn launch(&self, mut command: Command) -> io::Result<Launch> {
        command.spawn().map(Launch::Spawned)
    }
}

/// Build the command for `config`.
///
/// Redirected runs execute the program directly with piped stdout/stderr and
/// a null stdin. Shell-mediated runs hand [`shell_line`] to the platform
/// shell and inherit stdio. Either way the child is isolated in its own
/// process group so the whole tree can be killed.
pub(crate) fn build_command(config: &RunnerConfig) -> Result<Command, ArgsError> {
    let mut command = if config.shell_mediated {
        let mut command = shell_command(&shell_line(config));
        command.stdin(Stdio::inherit()).stdout(Stdio::inherit()).stderr(Stdio::inherit());
        command
    } else {
        let mut command = Command::new(&config.program);
        command.args(config.arguments.to_argv()?);
        command.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        command
    };

    if let Some(cwd) = &config.cwd {
        command.current_dir(cwd);
    }
    command.envs(config.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    isolate(&mut command);
    command.kill_on_drop(true);
    Ok(command)
}

/// The line handed to the shell. The program path is quoted, so only the
/// arguments are open to shell interpretation.
pub(crate) fn shell_line(config: &RunnerConfig) -> String {
    let program = quote_program(&config.program);
    if config.arguments.is_empty() {
        program
    } else {
        format!("{program} {}", config.arguments)
    }
}

#[cfg(unix)]
fn quote_program(program: &str) -> String {
    quote_argument(program)
}

#[cfg(windows)]
fn quote_program(program: &str) -> String {
    let special = |c: char| c.is_whitespace() || "&|<>^()%!".contains(c);
    if program.contains(special) {
        format!("\"{}\"", program.replace('"', ""))
    } else {
        program.to_string()
    }
}

#[cfg(unix)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(line);
    command
}

#[cfg(unix)]
fn isolate(command: &mut Command) {
    command.process_group(0);
}

#[cfg(windows)]
fn isolate(command: &mut Command) {
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(any(unix, windows)))]
fn isolate(_command: &mut Command) {}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{Launch, Launcher};
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::process::Command;

    #[derive(Debug, Clone, Copy)]
    enum Behavior {
        NotCreated,
        Fail(io::ErrorKind),
    }

    /// Launcher that never spawns anything.
    #[derive(Debug)]
    pub struct FakeLauncher {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl FakeLauncher {
        /// Every launch reports that no new process was created.
        pub fn not_created() -> Self {
            Self { behavior: Behavior::NotCreated, calls: AtomicUsize::new(0) }
        }

        /// Every launch fails with `kind`.
        pub fn failing(kind: io::ErrorKind) -> Self {
            Self { behavior: Behavior::Fail(kind), calls: AtomicUsize::new(0) }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Launcher for FakeLauncher {
        fn launch(&self, _command: Command) -> io::Result<Launch> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::NotCreated => Ok(Launch::NotCreated),
                Behavior::Fail(kind) => Err(io::Error::new(kind, "fake launch failure")),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLauncher;

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
