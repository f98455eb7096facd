//! Roadmap script discovery and path conventions.

use crate::types::BaselineIssue;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Source file extension of roadmap scripts.
pub const SCRIPT_EXTENSION: &str = "py";

/// Directory reserved for tests; nothing beneath it is a roadmap script.
pub const TESTS_DIR: &str = "tests";

/// File name prefix marking private helpers.
pub const PRIVATE_PREFIX: &str = "_";

/// Package initializer file name.
pub const PACKAGE_INIT: &str = "__init__.py";

/// Prefix of matching test file names.
pub const TEST_FILE_PREFIX: &str = "test_";

/// Outcome of the roadmap-script eligibility predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// The path is a roadmap script entrypoint.
    Eligible,
    /// The path is under the root but is not an entrypoint.
    Ineligible,
    /// The path cannot be expressed relative to the scan root.
    OutsideRoot,
}

/// Classifies a path against the roadmap-script discovery rules.
///
/// Name checks run before the under-root check, so a non-script file
/// outside the root is reported as [`Eligibility::Ineligible`].
#[must_use]
pub fn classify(path: &Path, scripts_root: &Path) -> Eligibility {
    if path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION) {
        return Eligibility::Ineligible;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if name.starts_with(PRIVATE_PREFIX) || name == PACKAGE_INIT {
        return Eligibility::Ineligible;
    }

    let Ok(relative) = path.strip_prefix(scripts_root) else {
        return Eligibility::OutsideRoot;
    };

    let under_tests = relative
        .components()
        .any(|c| matches!(c, Component::Normal(s) if s == TESTS_DIR));
    if under_tests {
        Eligibility::Ineligible
    } else {
        Eligibility::Eligible
    }
}

/// Returns whether a path is a roadmap script entrypoint candidate.
#[must_use]
pub fn is_roadmap_script(path: &Path, scripts_root: &Path) -> bool {
    classify(path, scripts_root) == Eligibility::Eligible
}

/// Finds roadmap script entrypoints under `scripts_root`, sorted.
///
/// Symlinked directories are not descended into. Entries that cannot be
/// read are skipped; a missing root yields no scripts.
#[must_use]
pub fn discover_roadmap_scripts(scripts_root: &Path) -> Vec<PathBuf> {
    let mut scripts: Vec<PathBuf> = WalkDir::new(scripts_root)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(error) => {
                debug!("Skipping unreadable entry: {error}");
                None
            }
        })
        .filter(|path| {
            let eligible = is_roadmap_script(path, scripts_root);
            if !eligible && path.extension().is_some_and(|e| e == SCRIPT_EXTENSION) {
                debug!("Skipping non-roadmap path: {}", path.display());
            }
            eligible
        })
        .collect();

    scripts.sort();
    scripts
}

/// Returns the matching test file expected for a script.
///
/// The test keeps the script's directory nesting under `tests/`:
/// `ops/deploy.py` maps to `tests/ops/test_deploy.py`. Because only the
/// file name gains the prefix, `a_b.py` and `a/b.py` never collide.
#[must_use]
pub fn expected_test_path(script_path: &Path, scripts_root: &Path) -> PathBuf {
    let relative = script_path.strip_prefix(scripts_root).unwrap_or(script_path);
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let parent = relative.parent().unwrap_or_else(|| Path::new(""));

    scripts_root
        .join(TESTS_DIR)
        .join(parent)
        .join(format!("{TEST_FILE_PREFIX}{stem}.{SCRIPT_EXTENSION}"))
}

/// Scripts accepted from explicit arguments, plus issues for rejected ones.
#[derive(Debug, Default)]
pub struct ExplicitPaths {
    /// Resolved script paths to validate.
    pub scripts: Vec<PathBuf>,
    /// Issues for arguments that are not roadmap scripts.
    pub issues: Vec<BaselineIssue>,
}

/// Triages explicit path arguments.
///
/// Each path is resolved to an absolute, symlink-free form. Paths that do
/// not exist are skipped without an issue.
#[must_use]
pub fn process_explicit_paths(paths: &[PathBuf], scripts_root: &Path) -> ExplicitPaths {
    let mut result = ExplicitPaths::default();

    for path in paths {
        // canonicalize fails for missing paths; those are skipped silently.
        let Ok(resolved) = std::fs::canonicalize(path) else {
            debug!("Skipping nonexistent explicit path: {}", path.display());
            continue;
        };

        if !resolved.is_file() {
            result
                .issues
                .push(BaselineIssue::new(resolved, "explicit path is not a file"));
            continue;
        }

        match classify(&resolved, scripts_root) {
            Eligibility::Eligible => result.scripts.push(resolved),
            Eligibility::Ineligible => result.issues.push(BaselineIssue::new(
                resolved,
                "explicit path is not a roadmap-delivered script entrypoint",
            )),
            Eligibility::OutsideRoot => result.issues.push(BaselineIssue::new(
                resolved,
                "explicit path must be under scripts root and match roadmap script discovery rules",
            )),
        }
    }

    result
}
