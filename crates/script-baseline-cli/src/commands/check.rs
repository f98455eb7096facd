//! Check command implementation.

use anyhow::{Context, Result};
use script_baseline_core::Checker;
use script_baseline_rules::baseline_rules;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Runs the baseline check and returns the process exit code.
pub fn run(
    root: &Path,
    paths: &[PathBuf],
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<u8> {
    let mut builder = Checker::builder().root(root);
    for rule in baseline_rules() {
        builder = builder.rule_box(rule);
    }

    let checker = builder.build().context("Failed to build checker")?;

    tracing::info!(
        "Checking {} with {} rules",
        checker.root().display(),
        checker.rule_count()
    );

    let report = checker.check(paths);

    super::output::print(&report, checker.root(), format, out)?;

    Ok(u8::from(report.has_issues()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID_SCRIPT: &str = r#"#!/usr/bin/env -S uv run python
# /// script
# requires-python = ">=3.13"
# dependencies = ["cuprum==0.1.0"]
# ///
from __future__ import annotations

from cuprum import Program, scoped, sh

TOFU = Program("tofu")
tofu = sh.make(TOFU)

with scoped(allowlist=frozenset([TOFU])):
    result = tofu("plan").run_sync()
"#;

    fn scripts_root(tmp: &TempDir) -> PathBuf {
        let root = tmp.path().join("scripts");
        fs::create_dir_all(root.join("tests")).unwrap();
        root
    }

    fn run_text(root: &Path, paths: &[PathBuf]) -> (u8, String) {
        let mut out = Vec::new();
        let code = run(root, paths, OutputFormat::Text, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn compliant_tree_passes() {
        let tmp = TempDir::new().unwrap();
        let root = scripts_root(&tmp);
        fs::write(root.join("release.py"), VALID_SCRIPT).unwrap();
        fs::write(root.join("tests/test_release.py"), "").unwrap();

        let (code, output) = run_text(&root, &[]);
        assert_eq!(code, 0);
        assert_eq!(output, "script baseline validation passed for 1 script(s)\n");
    }

    #[test]
    fn failure_renders_relative_paths() {
        let tmp = TempDir::new().unwrap();
        let root = scripts_root(&tmp);
        fs::write(root.join("broken.py"), VALID_SCRIPT).unwrap();

        let (code, output) = run_text(&root, &[]);
        assert_eq!(code, 1);
        assert!(output.starts_with("script baseline validation failed:\n"));
        assert!(output.contains("- broken.py: missing matching test `tests/test_broken.py`"));
    }

    #[test]
    fn explicit_test_path_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let root = scripts_root(&tmp);
        let helper = root.join("tests/test_helper.py");
        fs::write(&helper, "def test_helper() -> None:\n    assert True\n").unwrap();

        let (code, output) = run_text(&root, &[helper]);
        assert_eq!(code, 1);
        assert!(output.contains("not a roadmap-delivered script entrypoint"));
    }

    #[test]
    fn explicit_path_outside_root_keeps_absolute_path() {
        let tmp = TempDir::new().unwrap();
        let root = scripts_root(&tmp);
        let outside = tmp.path().join("tool.py");
        fs::write(&outside, VALID_SCRIPT).unwrap();

        let (code, output) = run_text(&root, &[outside.clone()]);
        assert_eq!(code, 1);
        let shown = fs::canonicalize(&outside).unwrap();
        assert!(output.contains(&format!(
            "- {}: explicit path must be under scripts root",
            shown.display()
        )));
    }
}
