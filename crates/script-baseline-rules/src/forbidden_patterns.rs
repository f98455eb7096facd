//! Rule forbidding unsafe command-execution patterns.
//!
//! # Rationale
//!
//! Scripts must run external commands through Cuprum, which enforces an
//! allow-list. Shelling libraries and raw process APIs bypass it.
//!
//! # Detected Patterns
//!
//! - `import plumbum` / `from plumbum import ...`
//! - `import subprocess` / `from subprocess import ...`
//! - `subprocess.<fn>(...)`
//! - `os.system(...)` / `os.popen(...)`
//! - `from cuprum import local`
//! - `from cuprum.cmd import ...`
//!
//! Each pattern reports at most once per script, however often it matches.

use regex::Regex;
use script_baseline_core::{BaselineIssue, ScriptContext, ScriptRule};
use std::sync::LazyLock;

/// Rule code for forbidden-patterns.
pub const CODE: &str = "SB002";

/// Rule name for forbidden-patterns.
pub const NAME: &str = "forbidden-patterns";

/// `(pattern, message)` pairs, searched in multiline mode against the whole
/// script text.
pub const FORBIDDEN_PATTERNS: &[(&str, &str)] = &[
    (
        r"^\s*(from|import)\s+plumbum\b",
        "Plumbum imports are forbidden; use Cuprum",
    ),
    (
        r"^\s*import\s+subprocess\b",
        "subprocess imports are forbidden; use Cuprum",
    ),
    (
        r"^\s*from\s+subprocess\s+import\b",
        "subprocess imports are forbidden; use Cuprum",
    ),
    (
        r"\bsubprocess\.[A-Za-z_]+\(",
        "subprocess invocation is forbidden; use Cuprum",
    ),
    (
        r"\bos\.(system|popen)\(",
        "shell execution via os.system/os.popen is forbidden",
    ),
    (
        r"^\s*from\s+cuprum\s+import\s+local\b",
        "`from cuprum import local` is forbidden in baseline scripts",
    ),
    (
        r"^\s*from\s+cuprum\.cmd\s+import\b",
        "`cuprum.cmd` imports are forbidden in baseline scripts",
    ),
];

#[allow(clippy::expect_used)]
static COMPILED: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    FORBIDDEN_PATTERNS
        .iter()
        .map(|(pattern, message)| {
            let regex = Regex::new(&format!("(?m){pattern}")).expect("forbidden pattern is valid");
            (regex, *message)
        })
        .collect()
});

/// Reports every forbidden pattern found in a script.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForbiddenPatterns;

impl ForbiddenPatterns {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ScriptRule for ForbiddenPatterns {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids plumbum, subprocess, os.system/os.popen and discouraged Cuprum imports"
    }

    fn check(&self, ctx: &ScriptContext) -> Vec<BaselineIssue> {
        COMPILED
            .iter()
            .filter(|(regex, _)| regex.is_match(ctx.content))
            .map(|(_, message)| BaselineIssue::new(ctx.path, *message))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn check(content: &str) -> Vec<String> {
        let ctx = ScriptContext::new(Path::new("/s/a.py"), content, Path::new("/s"));
        ForbiddenPatterns::new()
            .check(&ctx)
            .into_iter()
            .map(|i| i.message)
            .collect()
    }

    #[test]
    fn all_patterns_compile() {
        assert_eq!(COMPILED.len(), FORBIDDEN_PATTERNS.len());
    }

    #[test]
    fn clean_script_passes() {
        assert!(check("from cuprum import Program, scoped, sh\nprint('ok')\n").is_empty());
    }

    #[test]
    fn plumbum_both_forms() {
        assert_eq!(
            check("import plumbum\n"),
            vec!["Plumbum imports are forbidden; use Cuprum"]
        );
        assert_eq!(
            check("    from plumbum import local\n"),
            vec!["Plumbum imports are forbidden; use Cuprum"]
        );
        assert!(check("import plumbumx\n").is_empty());
    }

    #[test]
    fn subprocess_import_and_call() {
        assert_eq!(
            check("import subprocess\nsubprocess.run(['ls'])\n"),
            vec![
                "subprocess imports are forbidden; use Cuprum",
                "subprocess invocation is forbidden; use Cuprum",
            ]
        );
    }

    #[test]
    fn both_subprocess_import_forms_report_separately() {
        assert_eq!(
            check("import subprocess\nfrom subprocess import run\n"),
            vec![
                "subprocess imports are forbidden; use Cuprum",
                "subprocess imports are forbidden; use Cuprum",
            ]
        );
    }

    #[test]
    fn repeated_matches_report_once() {
        assert_eq!(
            check("os.system('a')\nos.popen('b')\nos.system('c')\n"),
            vec!["shell execution via os.system/os.popen is forbidden"]
        );
    }

    #[test]
    fn discouraged_cuprum_imports() {
        assert_eq!(
            check("from cuprum import local\nfrom cuprum.cmd import Cmd\n"),
            vec![
                "`from cuprum import local` is forbidden in baseline scripts",
                "`cuprum.cmd` imports are forbidden in baseline scripts",
            ]
        );
        assert!(check("from cuprum import localize\n").is_empty());
    }

    #[test]
    fn import_must_start_line() {
        assert!(check("x = 'import subprocess'\n").is_empty());
    }
}
