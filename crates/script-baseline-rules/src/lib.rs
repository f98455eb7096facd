//! # script-baseline-rules
//!
//! Built-in baseline rules for roadmap automation scripts.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SB001 | `runtime-metadata` | Requires the uv shebang, `requires-python >=3.13` and `dependencies` |
//! | SB002 | `forbidden-patterns` | Forbids plumbum, subprocess, `os.system`/`os.popen`, discouraged Cuprum imports |
//! | SB003 | `cuprum-posture` | Requires `scoped(...)` and `run()`/`run_sync()` in Cuprum scripts |
//! | SB004 | `matching-test` | Requires `tests/<dir>/test_<script>.py` |
//!
//! ## Usage
//!
//! ```ignore
//! use script_baseline_core::Checker;
//! use script_baseline_rules::baseline_rules;
//!
//! let mut builder = Checker::builder().root("./scripts");
//! for rule in baseline_rules() {
//!     builder = builder.rule_box(rule);
//! }
//! let report = builder.build()?.check(&[]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cuprum_posture;
mod forbidden_patterns;
mod presets;
mod runtime_metadata;

pub use cuprum_posture::CuprumPosture;
pub use forbidden_patterns::{ForbiddenPatterns, FORBIDDEN_PATTERNS};
pub use matching_test::MatchingTest;
pub use presets::baseline_rules;
pub use runtime_metadata::{has_required_python_baseline, RuntimeMetadata, REQUIRES_PYTHON};

/// Re-export core types for convenience.
pub use script_baseline_core::{BaselineIssue, ScriptRule};
