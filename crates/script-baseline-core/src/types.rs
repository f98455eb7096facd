//! Core types for baseline issues and check results.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Header line of a failing report.
pub const FAILURE_HEADER: &str = "script baseline validation failed:";

/// One baseline violation for a script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaselineIssue {
    /// Path of the offending script (absolute when produced by the checker).
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
}

impl BaselineIssue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the path shown in reports: relative to `root` when possible.
    #[must_use]
    pub fn display_path(&self, root: &Path) -> PathBuf {
        self.path
            .strip_prefix(root)
            .map_or_else(|_| self.path.clone(), Path::to_path_buf)
    }

    fn sort_key(&self) -> (String, &str) {
        (self.path.to_string_lossy().into_owned(), &self.message)
    }
}

impl std::fmt::Display for BaselineIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result of a baseline check run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BaselineReport {
    /// Every issue found, explicit-path issues first.
    pub issues: Vec<BaselineIssue>,
    /// Number of scripts that entered validation.
    pub scripts_checked: usize,
}

impl BaselineReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when at least one issue was found.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Process exit status for this report: 1 with issues, 0 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_issues())
    }

    /// Returns issues ordered by `(path, message)`.
    #[must_use]
    pub fn sorted_issues(&self) -> Vec<&BaselineIssue> {
        let mut sorted: Vec<&BaselineIssue> = self.issues.iter().collect();
        sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        sorted
    }

    /// Renders the failure report.
    ///
    /// Paths are shown relative to `root`, falling back to the stored path
    /// when the issue lies outside it.
    #[must_use]
    pub fn render_failures(&self, root: &Path) -> String {
        let mut lines = vec![FAILURE_HEADER.to_string()];
        lines.extend(self.sorted_issues().into_iter().map(|issue| {
            format!("- {}: {}", issue.display_path(root).display(), issue.message)
        }));
        lines.join("\n")
    }

    /// Renders the success line.
    #[must_use]
    pub fn render_success(&self) -> String {
        format!(
            "script baseline validation passed for {} script(s)",
            self.scripts_checked
        )
    }

    /// Renders whichever of the success or failure reports applies.
    #[must_use]
    pub fn render(&self, root: &Path) -> String {
        if self.has_issues() {
            self.render_failures(root)
        } else {
            self.render_success()
        }
    }

    /// Adds issues and counts from another report.
    pub fn extend(&mut self, other: Self) {
        self.issues.extend(other.issues);
        self.scripts_checked += other.scripts_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(issues: Vec<BaselineIssue>) -> BaselineReport {
        BaselineReport {
            issues,
            scripts_checked: 2,
        }
    }

    #[test]
    fn empty_report_passes() {
        let r = report(vec![]);
        assert!(!r.has_issues());
        assert_eq!(r.exit_code(), 0);
        assert_eq!(
            r.render(Path::new("/repo/scripts")),
            "script baseline validation passed for 2 script(s)"
        );
    }

    #[test]
    fn failures_sorted_by_path_then_message() {
        let r = report(vec![
            BaselineIssue::new("/repo/scripts/b.py", "zeta"),
            BaselineIssue::new("/repo/scripts/a.py", "omega"),
            BaselineIssue::new("/repo/scripts/a.py", "alpha"),
        ]);

        assert_eq!(r.exit_code(), 1);
        assert_eq!(
            r.render(Path::new("/repo/scripts")),
            "script baseline validation failed:\n\
             - a.py: alpha\n\
             - a.py: omega\n\
             - b.py: zeta"
        );
    }

    #[test]
    fn display_path_falls_back_outside_root() {
        let issue = BaselineIssue::new("/elsewhere/tool.py", "explicit path is not a file");
        assert_eq!(
            issue.display_path(Path::new("/repo/scripts")),
            PathBuf::from("/elsewhere/tool.py")
        );
    }

    #[test]
    fn extend_accumulates() {
        let mut r = report(vec![BaselineIssue::new("/a.py", "x")]);
        r.extend(report(vec![BaselineIssue::new("/b.py", "y")]));
        assert_eq!(r.issues.len(), 2);
        assert_eq!(r.scripts_checked, 4);
    }
}
