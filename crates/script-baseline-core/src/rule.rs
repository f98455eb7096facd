//! Rule trait for defining baseline checks.

use crate::context::ScriptContext;
use crate::types::BaselineIssue;

/// A per-script baseline rule.
///
/// Rules see the full script text and its location. Each returns zero or
/// more issues; the checker concatenates them in registration order.
///
/// # Example
///
/// ```ignore
/// use script_baseline_core::{BaselineIssue, ScriptContext, ScriptRule};
///
/// pub struct NoTabs;
///
/// impl ScriptRule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///     fn code(&self) -> &'static str { "SB900" }
///
///     fn check(&self, ctx: &ScriptContext) -> Vec<BaselineIssue> {
///         if ctx.content.contains('\t') {
///             vec![BaselineIssue::new(ctx.path, "tabs are forbidden")]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait ScriptRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "runtime-metadata").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SB001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single script and returns any issues found.
    fn check(&self, ctx: &ScriptContext) -> Vec<BaselineIssue>;
}

/// Type alias for boxed `ScriptRule` trait objects.
pub type RuleBox = Box<dyn ScriptRule>;
