//! Synchronises the vendored `full-monty` fork with upstream Monty.
//!
//! The workflow refuses to touch a dirty checkout, refreshes the fork branch
//! by fast-forwarding it onto upstream, stages the new submodule pointer in
//! the superproject, and finishes by running the repository's verification
//! gates. External commands go through a [`CommandRunner`], so the workflow
//! can be driven by a scripted runner in tests.
//!
//! # Example
//!
//! ```no_run
//! use monty_sync::{run_monty_sync, ProcessRunner, SyncConfig};
//!
//! let config = SyncConfig::load(std::path::Path::new(".")).unwrap();
//! let mut runner = ProcessRunner::default();
//! run_monty_sync(&mut runner, &config, &mut std::io::stdout()).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod error;
mod runner;
mod sync;

pub use config::{resolve, ConfigSource, SyncConfig};
pub use error::{ConfigError, SyncError};
pub use runner::{CommandInvocation, CommandOutcome, CommandRunner, ProcessRunner};
pub use sync::{run_monty_sync, PROGRESS_PREFIX};
