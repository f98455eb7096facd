//! # script-baseline-core
//!
//! Core framework for checking roadmap automation scripts against a fixed
//! baseline.
//!
//! This crate provides the foundational traits and types:
//!
//! - [`ScriptRule`] trait for per-script checks
//! - [`Checker`] for discovering scripts and running rules
//! - [`BaselineIssue`] and [`BaselineReport`] for findings and rendering
//! - [`parse_uv_metadata`] for the inline uv metadata block
//! - [`discovery`] helpers for eligibility and matching-test paths
//!
//! ## Example
//!
//! ```ignore
//! use script_baseline_core::Checker;
//!
//! let checker = Checker::builder()
//!     .root("./scripts")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let report = checker.check(&[]);
//! println!("{}", report.render(checker.root()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod context;
mod metadata;
mod rule;
mod types;

/// Script discovery and path conventions.
pub mod discovery;

pub use checker::{Checker, CheckerBuilder, CheckerError};
pub use context::ScriptContext;
pub use discovery::{expected_test_path, is_roadmap_script, Eligibility};
pub use metadata::{
    parse_uv_metadata, split_lines, Metadata, UV_BLOCK_END, UV_BLOCK_START, UV_SHEBANG,
};
pub use rule::{RuleBox, ScriptRule};
pub use types::{BaselineIssue, BaselineReport, FAILURE_HEADER};
