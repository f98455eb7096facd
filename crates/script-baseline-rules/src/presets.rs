//! The baseline rule set.

use crate::{CuprumPosture, ForbiddenPatterns, MatchingTest, RuntimeMetadata};
use script_baseline_core::RuleBox;

/// Returns the baseline rules in validation order.
///
/// Issue order per script follows this order:
/// - `runtime-metadata` (SB001) - uv shebang and metadata block
/// - `forbidden-patterns` (SB002) - unsafe command-execution patterns
/// - `cuprum-posture` (SB003) - `scoped(...)` and `run()`/`run_sync()`
/// - `matching-test` (SB004) - companion test file
#[must_use]
pub fn baseline_rules() -> Vec<RuleBox> {
    vec![
        Box::new(RuntimeMetadata::new()),
        Box::new(ForbiddenPatterns::new()),
        Box::new(CuprumPosture::new()),
        Box::new(MatchingTest::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_order() {
        let codes: Vec<&str> = baseline_rules().iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["SB001", "SB002", "SB003", "SB004"]);
    }

    #[test]
    fn test_rules_are_described() {
        assert!(baseline_rules().iter().all(|r| !r.description().is_empty()));
    }
}
