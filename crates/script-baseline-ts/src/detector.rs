//! Detection of Cuprum command-builder usage.
//!
//! Two strategies answer the same questions. [`SyntaxTreeDetector`] inspects
//! call expressions and imports; when no syntax tree is available it defers
//! to [`TextDetector`], which searches for fixed call texts. Callers see a
//! plain boolean either way.

use tracing::warn;

use crate::extractor::ModuleAnalysis;
use crate::python::PythonExtractor;

/// Module name of the sanctioned command-execution library.
pub const API_MODULE: &str = "cuprum";

/// Constructor of a program handle.
pub const CONSTRUCTOR: &str = "Program";

/// Module-like object exposing the command factory.
pub const FACTORY_OBJECT: &str = "sh";

/// Factory method building a command from a program.
pub const FACTORY_METHOD: &str = "make";

/// Method names that execute a built command.
pub const RUN_METHODS: &[&str] = &["run", "run_sync"];

/// Answers whether a script builds and runs Cuprum commands.
pub trait CommandUsageDetector: Send + Sync {
    /// Returns true when the script constructs Cuprum programs or commands.
    fn uses_command_builder(&self, source: &str) -> bool;

    /// Returns true when the script demonstrably executes built commands.
    fn run_invocation_present(&self, source: &str) -> bool;
}

/// Fixed-string heuristics, used when no syntax tree is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDetector;

impl CommandUsageDetector for TextDetector {
    fn uses_command_builder(&self, source: &str) -> bool {
        source.contains(&format!("{CONSTRUCTOR}("))
            || source.contains(&format!("{FACTORY_OBJECT}.{FACTORY_METHOD}("))
    }

    fn run_invocation_present(&self, source: &str) -> bool {
        source.contains("run_sync(") || source.contains(".run(")
    }
}

/// Syntax-tree inspection with a text fallback.
#[derive(Default)]
pub struct SyntaxTreeDetector {
    extractor: PythonExtractor,
    fallback: TextDetector,
}

impl SyntaxTreeDetector {
    /// Creates a new detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn analysis(&self, source: &str) -> Option<ModuleAnalysis> {
        let analysis = self.extractor.analyze(source);
        if analysis.is_none() {
            warn!("No syntax tree available, using text heuristics");
        }
        analysis
    }

    fn builds_commands(analysis: &ModuleAnalysis) -> bool {
        analysis.calls.iter().any(|call| {
            call.is_name(CONSTRUCTOR) || call.is_method_on(FACTORY_OBJECT, FACTORY_METHOD)
        })
    }

    fn imports_api(analysis: &ModuleAnalysis) -> bool {
        analysis
            .imports
            .iter()
            .any(|import| import.module.contains(API_MODULE))
    }

    fn calls_run(analysis: &ModuleAnalysis) -> bool {
        analysis
            .calls
            .iter()
            .filter_map(|call| call.attribute())
            .any(|attribute| RUN_METHODS.contains(&attribute))
    }
}

impl CommandUsageDetector for SyntaxTreeDetector {
    fn uses_command_builder(&self, source: &str) -> bool {
        match self.analysis(source) {
            Some(analysis) => Self::builds_commands(&analysis),
            None => self.fallback.uses_command_builder(source),
        }
    }

    fn run_invocation_present(&self, source: &str) -> bool {
        match self.analysis(source) {
            Some(analysis) => Self::imports_api(&analysis) && Self::calls_run(&analysis),
            None => self.fallback.run_invocation_present(source),
        }
    }
}
