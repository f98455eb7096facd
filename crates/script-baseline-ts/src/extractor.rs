//! Language-agnostic extraction types.
//!
//! The usage detector only needs two facts about a module: which calls it
//! makes and which modules it imports at top level.

/// Shape of the expression being called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    /// A bare identifier: `Program(...)`.
    Name(String),
    /// An attribute access: `sh.make(...)`, `cmd("x").run_sync()`.
    Attribute {
        /// Identifier on the left of the dot, when it is a plain name.
        object: Option<String>,
        /// Attribute name on the right of the dot.
        attribute: String,
    },
    /// Anything else (subscripts, nested calls, lambdas...).
    Other,
}

/// A single call expression extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// What is being called.
    pub callee: Callee,
}

impl CallInfo {
    /// Returns true for a plain-name call to `name`.
    #[must_use]
    pub fn is_name(&self, name: &str) -> bool {
        matches!(&self.callee, Callee::Name(n) if n == name)
    }

    /// Returns true for `object.attribute(...)` where `object` is a plain name.
    #[must_use]
    pub fn is_method_on(&self, object: &str, attribute: &str) -> bool {
        matches!(
            &self.callee,
            Callee::Attribute { object: Some(o), attribute: a } if o == object && a == attribute
        )
    }

    /// Returns the attribute name when the callee is an attribute access.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        match &self.callee {
            Callee::Attribute { attribute, .. } => Some(attribute),
            _ => None,
        }
    }
}

/// A top-level import statement extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Imported module path as written (e.g., `cuprum.sh`, `.helpers`).
    pub module: String,
}

/// Result of analyzing a single module.
#[derive(Debug, Clone, Default)]
pub struct ModuleAnalysis {
    /// Every call expression, at any nesting depth.
    pub calls: Vec<CallInfo>,
    /// Imports that appear directly in the module body.
    pub imports: Vec<ImportInfo>,
}
