//! Rule requiring guarded, explicit execution of Cuprum commands.
//!
//! # Rationale
//!
//! Building a command is harmless; running it is not. Scripts that build
//! Cuprum commands must run them inside `scoped(allowlist=...)` and must
//! actually call `run()` or `run_sync()`.
//!
//! Scripts that never build a Cuprum command are exempt.

use script_baseline_core::{BaselineIssue, ScriptContext, ScriptRule};
use script_baseline_ts::{CommandUsageDetector, SyntaxTreeDetector};
use tracing::debug;

/// Rule code for cuprum-posture.
pub const CODE: &str = "SB003";

/// Rule name for cuprum-posture.
pub const NAME: &str = "cuprum-posture";

/// Call text that marks guarded execution.
pub const GUARD_CALL: &str = "scoped(";

/// Requires `scoped(...)` and a run invocation in Cuprum scripts.
pub struct CuprumPosture {
    detector: Box<dyn CommandUsageDetector>,
}

impl Default for CuprumPosture {
    fn default() -> Self {
        Self::new()
    }
}

impl CuprumPosture {
    /// Creates a new rule backed by syntax-tree detection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            detector: Box::new(SyntaxTreeDetector::new()),
        }
    }

    /// Replaces the usage detector.
    #[must_use]
    pub fn with_detector(mut self, detector: impl CommandUsageDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }
}

impl ScriptRule for CuprumPosture {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires scoped(...allowlist=...) and run()/run_sync() when Cuprum commands are built"
    }

    fn check(&self, ctx: &ScriptContext) -> Vec<BaselineIssue> {
        if !self.detector.uses_command_builder(ctx.content) {
            debug!("No Cuprum usage in {}", ctx.relative_path.display());
            return Vec::new();
        }

        let mut issues = Vec::new();

        if !ctx.content.contains(GUARD_CALL) {
            issues.push(BaselineIssue::new(
                ctx.path,
                "Cuprum command execution must use `scoped(...allowlist=...)`",
            ));
        }

        if !self.detector.run_invocation_present(ctx.content) {
            issues.push(BaselineIssue::new(
                ctx.path,
                "Cuprum commands must use `run_sync()` or `run()`",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use script_baseline_ts::TextDetector;
    use std::path::Path;

    const GUARD_ISSUE: &str = "Cuprum command execution must use `scoped(...allowlist=...)`";
    const RUN_ISSUE: &str = "Cuprum commands must use `run_sync()` or `run()`";

    fn check_with(rule: &CuprumPosture, content: &str) -> Vec<String> {
        let ctx = ScriptContext::new(Path::new("/s/a.py"), content, Path::new("/s"));
        rule.check(&ctx).into_iter().map(|i| i.message).collect()
    }

    fn check(content: &str) -> Vec<String> {
        check_with(&CuprumPosture::new(), content)
    }

    #[test]
    fn non_cuprum_script_is_exempt() {
        assert!(check("print('hello')\n").is_empty());
    }

    #[test]
    fn compliant_script_passes() {
        let source = "from cuprum import Program, scoped, sh\n\
                      TOFU = Program(\"tofu\")\n\
                      tofu = sh.make(TOFU)\n\
                      with scoped(allowlist=frozenset([TOFU])):\n    \
                          tofu(\"plan\").run_sync()\n";
        assert!(check(source).is_empty());
    }

    #[test]
    fn missing_guard_reported_even_with_run_sync() {
        let source = "from cuprum import Program, sh\n\
                      TOFU = Program(\"tofu\")\n\
                      tofu = sh.make(TOFU)\n\
                      tofu(\"plan\").run_sync()\n";
        assert_eq!(check(source), vec![GUARD_ISSUE]);
    }

    #[test]
    fn missing_run_reported() {
        let source = "from cuprum import Program, scoped, sh\n\
                      TOFU = Program(\"tofu\")\n\
                      with scoped(allowlist=frozenset([TOFU])):\n    \
                          cmd = sh.make(TOFU)\n";
        assert_eq!(check(source), vec![RUN_ISSUE]);
    }

    #[test]
    fn run_without_cuprum_import_is_not_evidence() {
        let source = "from helpers import Program, scoped\n\
                      with scoped(allowlist=[]):\n    \
                          Program(\"git\").run_sync()\n";
        assert_eq!(check(source), vec![RUN_ISSUE]);
    }

    #[test]
    fn text_detector_can_be_injected() {
        let rule = CuprumPosture::new().with_detector(TextDetector);
        let source = "# Program( mentioned in a comment\nprint('x')\n";
        assert_eq!(check_with(&rule, source), vec![GUARD_ISSUE, RUN_ISSUE]);
        assert!(check(source).is_empty());
    }
}
