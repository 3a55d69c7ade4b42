//! Process execution for the external chart generator.
//!
//! All process execution goes through [`CommandSpec`] to ensure argv-style
//! invocation: arguments are passed as discrete elements, never as shell
//! strings, and the working directory is an explicit field of the spec
//! rather than ambient process state.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Process execution errors.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to launch {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("process did not finish within {timeout_seconds}s")]
    Timeout { timeout_seconds: u64 },

    #[error("failed waiting for process: {reason}")]
    Wait { reason: String },
}

/// Specification for a command to execute.
///
/// # Example
///
/// ```rust
/// use chartprep::runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("chartgen").cwd("/path/to/Project_03_05_2024_1407");
///
/// assert_eq!(cmd.program, OsString::from("chartgen"));
/// assert!(cmd.args.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements (NOT shell strings)
    pub args: Vec<OsString>,
    /// Working directory the process observes
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` with the given program.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory the process will observe.
    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Program name for display and error messages.
    #[must_use]
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Build a `std::process::Command` from this spec.
    ///
    /// Stdio is left at the default (inherited), so the child's output
    /// passes straight through to the user's terminal.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Observed exit of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// Exit code (None if terminated by signal)
    pub exit_code: Option<i32>,
}

impl ProcessStatus {
    #[must_use]
    pub fn new(exit_code: Option<i32>) -> Self {
        Self { exit_code }
    }

    /// Check if the process exited successfully (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for synchronous process execution.
///
/// Implementations MUST use argv-style APIs only (no shell string
/// evaluation). The trait is the seam that lets tests substitute a scripted
/// collaborator for the real chart generator.
pub trait ProcessRunner {
    /// Execute a command with the given timeout.
    ///
    /// # Returns
    ///
    /// * `Ok(ProcessStatus)` - the process completed (possibly with a
    ///   non-zero exit code)
    /// * `Err(RunnerError::Timeout)` - the process exceeded the timeout and
    ///   was killed
    /// * `Err(RunnerError::*)` - other execution errors
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessStatus, RunnerError>;
}

/// Runner that spawns the process directly, blocking until it exits.
///
/// Stdio is inherited; the only thing observed is the exit status. The wait
/// is a `try_wait` poll loop so the timeout can be enforced without an async
/// runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner;

impl ProcessRunner for NativeRunner {
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessStatus, RunnerError> {
        let mut child = cmd.to_command().spawn().map_err(|e| RunnerError::Spawn {
            program: cmd.program_name(),
            reason: e.to_string(),
        })?;

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(ProcessStatus::new(status.code())),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(RunnerError::Timeout {
                            timeout_seconds: timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(RunnerError::Wait {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}
