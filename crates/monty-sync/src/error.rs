//! Error types for monty-sync.

use std::path::PathBuf;
use thiserror::Error;

/// A fail-closed sync orchestration error.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An external command ran and reported failure.
    #[error("{summary}: `{command}` failed with exit code {exit_code}: {details}")]
    CommandFailed {
        /// What the step was trying to do.
        summary: String,
        /// Program and arguments, space-joined.
        command: String,
        /// Exit code reported by the command.
        exit_code: i32,
        /// Trimmed stderr, else stdout, else a placeholder.
        details: String,
    },

    /// A worktree has tracked or untracked changes.
    #[error("{scope} worktree is not clean; commit or stash changes before running monty sync")]
    DirtyWorktree {
        /// Which checkout was inspected.
        scope: String,
    },

    /// The fork remote is not configured in the submodule.
    #[error("fork remote `{remote}` is missing in {submodule}")]
    MissingForkRemote {
        /// Expected remote name.
        remote: String,
        /// Submodule path relative to the repository root.
        submodule: String,
    },

    /// The runner was asked for a program outside its allow-list.
    #[error("unsupported command `{program}`")]
    UnsupportedCommand {
        /// Requested program.
        program: String,
    },

    /// The program could not be started.
    #[error("unable to launch `{program}`: {source}")]
    Spawn {
        /// Requested program.
        program: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Progress output could not be written.
    #[error("unable to write progress output: {0}")]
    Output(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
