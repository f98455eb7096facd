//! Command execution port and its process-backed implementation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::error::SyncError;

/// One command invocation: program, arguments, working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Program name (e.g., `git`).
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
}

impl CommandInvocation {
    /// Creates a new invocation.
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: impl AsRef<Path>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Program and arguments joined with spaces.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Whether the command exited successfully.
    pub ok: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code, or -1 when the process was terminated by a signal.
    pub exit_code: i32,
}

impl CommandOutcome {
    /// A successful outcome with the given stdout.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            ok: true,
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    /// A failed outcome with the given exit code and stderr.
    #[must_use]
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            ok: false,
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
        }
    }
}

/// Runs external commands on behalf of the sync orchestration.
pub trait CommandRunner {
    /// Executes one invocation and reports its outcome.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be started at all. A command
    /// that starts and fails is an `Ok` outcome with `ok == false`.
    fn run(&mut self, invocation: &CommandInvocation) -> Result<CommandOutcome, SyncError>;
}

/// Blocking process runner restricted to an allow-list of programs.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    allowlist: BTreeSet<String>,
}

impl ProcessRunner {
    /// Creates a runner allowed to execute only `programs`.
    #[must_use]
    pub fn new<I, S>(programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowlist: programs.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true when `program` may be executed.
    #[must_use]
    pub fn allows(&self, program: &str) -> bool {
        self.allowlist.contains(program)
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(["git", "make"])
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, invocation: &CommandInvocation) -> Result<CommandOutcome, SyncError> {
        if !self.allows(&invocation.program) {
            return Err(SyncError::UnsupportedCommand {
                program: invocation.program.clone(),
            });
        }

        debug!(
            "Running `{}` in {}",
            invocation.command_line(),
            invocation.cwd.display()
        );

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .output()
            .map_err(|source| SyncError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        Ok(CommandOutcome {
            ok: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
