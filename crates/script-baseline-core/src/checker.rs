//! Checker orchestrating per-script validation.

use crate::context::ScriptContext;
use crate::discovery::{discover_roadmap_scripts, process_explicit_paths};
use crate::rule::{RuleBox, ScriptRule};
use crate::types::{BaselineIssue, BaselineReport};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a whole check run.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// IO error resolving the scan root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builder for configuring a [`Checker`].
#[derive(Default)]
pub struct CheckerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
}

impl CheckerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scripts root directory.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the checker.
    #[must_use]
    pub fn rule<R: ScriptRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the checker.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Builds the checker.
    ///
    /// The root is canonicalized when it exists and made absolute otherwise,
    /// so issue paths and display paths agree.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn build(self) -> Result<Checker, CheckerError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = match std::fs::canonicalize(&root) {
            Ok(resolved) => resolved,
            Err(_) if root.is_absolute() => root,
            Err(_) => std::env::current_dir()?.join(&root),
        };

        Ok(Checker {
            root,
            rules: self.rules,
        })
    }
}

/// Runs baseline rules over roadmap scripts.
///
/// Use [`Checker::builder()`] to construct an instance.
pub struct Checker {
    root: PathBuf,
    rules: Vec<RuleBox>,
}

impl Checker {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Returns the resolved scripts root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Checks explicit paths, or every discovered script when `paths` is empty.
    ///
    /// Explicit-path issues come first, followed by per-script issues in
    /// validation order. Problems with individual scripts are reported as
    /// issues and never abort the run.
    #[must_use]
    pub fn check(&self, paths: &[PathBuf]) -> BaselineReport {
        info!("Starting baseline check at {}", self.root.display());

        let (scripts, mut issues) = if paths.is_empty() {
            (discover_roadmap_scripts(&self.root), Vec::new())
        } else {
            let explicit = process_explicit_paths(paths, &self.root);
            (explicit.scripts, explicit.issues)
        };

        debug!("Validating {} script(s)", scripts.len());
        for script in &scripts {
            issues.extend(self.validate_script(script));
        }

        info!(
            "Baseline check complete: {} issue(s) in {} script(s)",
            issues.len(),
            scripts.len()
        );

        BaselineReport {
            issues,
            scripts_checked: scripts.len(),
        }
    }

    /// Validates one script against every rule.
    ///
    /// A script that cannot be read yields a single issue and no rule runs.
    #[must_use]
    pub fn validate_script(&self, script_path: &Path) -> Vec<BaselineIssue> {
        debug!("Validating: {}", script_path.display());

        let content = match std::fs::read_to_string(script_path) {
            Ok(content) => content,
            Err(error) => {
                return vec![BaselineIssue::new(
                    script_path,
                    format!("unable to read script: {}", read_error_detail(&error)),
                )];
            }
        };

        let ctx = ScriptContext::new(script_path, &content, &self.root);
        self.rules.iter().flat_map(|rule| rule.check(&ctx)).collect()
    }
}

/// OS error description without the trailing ` (os error N)` code.
fn read_error_detail(error: &std::io::Error) -> String {
    let text = error.to_string();
    let Some(code) = error.raw_os_error() else {
        return text;
    };
    match text.strip_suffix(&format!(" (os error {code})")) {
        Some(detail) => detail.to_string(),
        None => text,
    }
}
