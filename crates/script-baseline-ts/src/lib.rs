//! # script-baseline-ts
//!
//! Tree-sitter based analysis of Python automation scripts.
//!
//! Baseline rules need to know whether a script builds Cuprum commands and
//! whether it executes them. This crate provides:
//!
//! - [`PythonExtractor`] for call and top-level import extraction
//! - [`ModuleAnalysis`] as the language-agnostic result
//! - [`CommandUsageDetector`] with a syntax-tree strategy
//!   ([`SyntaxTreeDetector`]) and a text strategy ([`TextDetector`])

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod detector;
pub mod extractor;
pub mod python;

pub use detector::{CommandUsageDetector, SyntaxTreeDetector, TextDetector};
pub use extractor::{CallInfo, Callee, ImportInfo, ModuleAnalysis};
pub use python::PythonExtractor;
