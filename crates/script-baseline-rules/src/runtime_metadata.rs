//! Rule requiring the uv shebang and inline runtime metadata.
//!
//! # Rationale
//!
//! Roadmap scripts run through `uv run`, which reads the interpreter floor and
//! dependencies from an inline comment block. A script without them runs
//! against whatever Python happens to be installed.
//!
//! # Detected Patterns
//!
//! - First line differs from `#!/usr/bin/env -S uv run python`
//! - No `# /// script` ... `# ///` block (or an empty one)
//! - `requires-python` missing or without a `>=3.13` clause
//! - `dependencies` missing

use regex::Regex;
use script_baseline_core::{
    parse_uv_metadata, BaselineIssue, ScriptContext, ScriptRule, UV_SHEBANG,
};
use std::sync::LazyLock;

/// Rule code for runtime-metadata.
pub const CODE: &str = "SB001";

/// Rule name for runtime-metadata.
pub const NAME: &str = "runtime-metadata";

/// Interpreter floor every script must declare.
pub const REQUIRES_PYTHON: &str = ">=3.13";

#[allow(clippy::expect_used)]
static REQUIRED_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^>=\s*3\.13(?:\.\d+)?$").expect("requires-python clause pattern is valid")
});

const QUOTES: &[char] = &['\'', '"'];

/// Returns whether a `requires-python` value includes the baseline clause.
///
/// Quotes around the whole value and around each comma-separated clause are
/// ignored; `>=3.13` and `>=3.13.4` qualify, `>=3.12` and `>3.13` do not.
#[must_use]
pub fn has_required_python_baseline(requires_python: &str) -> bool {
    requires_python
        .trim()
        .trim_matches(QUOTES)
        .split(',')
        .map(|part| part.trim().trim_matches(QUOTES))
        .any(|part| REQUIRED_CLAUSE.is_match(part))
}

/// Requires the uv shebang and a complete metadata block.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeMetadata;

impl RuntimeMetadata {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ScriptRule for RuntimeMetadata {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the uv shebang and a metadata block declaring requires-python and dependencies"
    }

    fn check(&self, ctx: &ScriptContext) -> Vec<BaselineIssue> {
        let mut issues = Vec::new();

        if ctx.first_line() != UV_SHEBANG {
            issues.push(BaselineIssue::new(
                ctx.path,
                format!("missing expected uv shebang `{UV_SHEBANG}`"),
            ));
        }

        let metadata = parse_uv_metadata(ctx.content);
        if metadata.is_empty() {
            issues.push(BaselineIssue::new(
                ctx.path,
                "missing uv metadata block (`# /// script` ... `# ///`)",
            ));
            return issues;
        }

        if !metadata
            .get("requires-python")
            .is_some_and(has_required_python_baseline)
        {
            issues.push(BaselineIssue::new(
                ctx.path,
                format!("requires-python must include `{REQUIRES_PYTHON}`"),
            ));
        }

        if !metadata.contains("dependencies") {
            issues.push(BaselineIssue::new(
                ctx.path,
                "uv metadata must declare `dependencies`",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn check(content: &str) -> Vec<String> {
        let ctx = ScriptContext::new(Path::new("/s/a.py"), content, Path::new("/s"));
        RuntimeMetadata::new()
            .check(&ctx)
            .into_iter()
            .map(|i| i.message)
            .collect()
    }

    fn script(requires_python: &str) -> String {
        format!(
            "#!/usr/bin/env -S uv run python\n# /// script\n# requires-python = \"{requires_python}\"\n# dependencies = []\n# ///\n"
        )
    }

    #[test]
    fn compliant_header_passes() {
        assert!(check(&script(">=3.13")).is_empty());
        assert!(check(&script(">=3.13.4")).is_empty());
        assert!(check(&script(">= 3.13")).is_empty());
    }

    #[test]
    fn older_floor_is_reported() {
        assert_eq!(
            check(&script(">=3.12")),
            vec!["requires-python must include `>=3.13`"]
        );
    }

    #[test]
    fn clause_may_appear_among_others() {
        assert!(check(&script("<4, >=3.13")).is_empty());
        assert!(check("#!/usr/bin/env -S uv run python\n# /// script\n# requires-python = '>=3.13'\n# dependencies = []\n# ///\n").is_empty());
    }

    #[test]
    fn clause_must_match_exactly() {
        assert!(!has_required_python_baseline("\">3.13\""));
        assert!(!has_required_python_baseline("\">=3.130\""));
        assert!(!has_required_python_baseline("\">=3.13.x\""));
        assert!(has_required_python_baseline("\"'>=3.13'\""));
    }

    #[test]
    fn missing_header_reports_shebang_and_block() {
        assert_eq!(
            check("print('hi')\n"),
            vec![
                "missing expected uv shebang `#!/usr/bin/env -S uv run python`",
                "missing uv metadata block (`# /// script` ... `# ///`)",
            ]
        );
    }

    #[test]
    fn empty_script_reports_shebang_and_block() {
        assert_eq!(check("").len(), 2);
    }

    #[test]
    fn missing_fields_reported_individually() {
        let text = "#!/usr/bin/env -S uv run python\n# /// script\n# name = \"tool\"\n# ///\n";
        assert_eq!(
            check(text),
            vec![
                "requires-python must include `>=3.13`",
                "uv metadata must declare `dependencies`",
            ]
        );
    }

    #[test]
    fn shebang_line_may_end_with_form_feed() {
        let text = script(">=3.13").replacen('\n', "\x0c\n", 1);
        assert!(check(&text).is_empty());
    }

    #[test]
    fn shebang_must_be_first_line() {
        let text = format!("\n{}", script(">=3.13"));
        assert_eq!(
            check(&text),
            vec!["missing expected uv shebang `#!/usr/bin/env -S uv run python`"]
        );
    }
}
