//! Python extractor using Tree-sitter.

use tree_sitter::{Language, Node, Parser};
use tracing::warn;

use crate::extractor::{CallInfo, Callee, ImportInfo, ModuleAnalysis};

/// Python 2 statement kinds.
const LEGACY_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Extracts calls and top-level imports from Python source.
pub struct PythonExtractor {
    language: Language,
}

impl PythonExtractor {
    /// Creates a new Python extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        node.utf8_text(src).unwrap_or("")
    }

    fn line(node: &Node<'_>) -> usize {
        node.start_position().row + 1
    }

    fn classify_callee(function: &Node<'_>, src: &[u8]) -> Callee {
        match function.kind() {
            "identifier" => Callee::Name(Self::text(function, src).to_owned()),
            "attribute" => {
                let object = function
                    .child_by_field_name("object")
                    .filter(|o| o.kind() == "identifier")
                    .map(|o| Self::text(&o, src).to_owned());
                let attribute = function
                    .child_by_field_name("attribute")
                    .map(|a| Self::text(&a, src).to_owned())
                    .unwrap_or_default();
                Callee::Attribute { object, attribute }
            }
            _ => Callee::Other,
        }
    }

    /// Returns true when the tree holds statements Python 3 rejects but the
    /// grammar still accepts.
    fn has_legacy_statement(root: &Node<'_>) -> bool {
        let mut stack = vec![*root];
        while let Some(node) = stack.pop() {
            if LEGACY_STATEMENTS.contains(&node.kind()) {
                return true;
            }
            let mut cursor = node.walk();
            stack.extend(node.named_children(&mut cursor));
        }
        false
    }

    fn collect_calls(root: &Node<'_>, src: &[u8]) -> Vec<CallInfo> {
        let mut calls = Vec::new();
        let mut stack = vec![*root];

        while let Some(node) = stack.pop() {
            if node.kind() == "call" {
                if let Some(function) = node.child_by_field_name("function") {
                    calls.push(CallInfo {
                        line: Self::line(&node),
                        callee: Self::classify_callee(&function, src),
                    });
                }
            }

            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        calls.sort_by_key(|c| c.line);
        calls
    }

    fn extract_imports(node: &Node<'_>, src: &[u8]) -> Vec<ImportInfo> {
        let line = Self::line(node);
        let mut cursor = node.walk();

        match node.kind() {
            "import_statement" => node
                .children_by_field_name("name", &mut cursor)
                .filter_map(|name| match name.kind() {
                    "dotted_name" => Some(name),
                    "aliased_import" => name.child_by_field_name("name"),
                    _ => None,
                })
                .map(|module| ImportInfo {
                    line,
                    module: Self::text(&module, src).to_owned(),
                })
                .collect(),
            "import_from_statement" => node
                .child_by_field_name("module_name")
                .map(|module| ImportInfo {
                    line,
                    module: Self::text(&module, src).to_owned(),
                })
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Analyzes Python source.
    ///
    /// Returns `None` when no syntax tree is available: the grammar could
    /// not be loaded, the source does not parse cleanly, or it uses Python 2
    /// `print`/`exec` statements.
    #[must_use]
    pub fn analyze(&self, source: &str) -> Option<ModuleAnalysis> {
        let mut parser = Parser::new();
        if let Err(error) = parser.set_language(&self.language) {
            warn!("Python grammar unavailable: {error}");
            return None;
        }

        let src = source.as_bytes();
        let tree = parser.parse(src, None)?;
        let root = tree.root_node();
        if root.has_error() || Self::has_legacy_statement(&root) {
            return None;
        }

        let mut imports = Vec::new();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            imports.extend(Self::extract_imports(&node, src));
        }

        Some(ModuleAnalysis {
            calls: Self::collect_calls(&root, src),
            imports,
        })
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(src: &str) -> ModuleAnalysis {
        PythonExtractor::new()
            .analyze(src)
            .expect("source should parse")
    }

    #[test]
    fn extracts_plain_and_from_imports() {
        let a = analyze(
            "import os, cuprum.sh as csh\nfrom cuprum import Program, sh\nfrom . import helpers\n",
        );
        let modules: Vec<&str> = a.imports.iter().map(|i| i.module.as_str()).collect();
        assert_eq!(modules, vec!["os", "cuprum.sh", "cuprum", "."]);
    }

    #[test]
    fn nested_imports_are_not_top_level() {
        let a = analyze("def main():\n    import cuprum\n    return cuprum\n");
        assert!(a.imports.is_empty());
    }

    #[test]
    fn future_import_is_ignored() {
        let a = analyze("from __future__ import annotations\n");
        assert!(a.imports.is_empty());
    }

    #[test]
    fn classifies_callees() {
        let a = analyze("TOFU = Program(\"tofu\")\ntofu = sh.make(TOFU)\ntofu(\"plan\").run_sync()\n");
        assert_eq!(a.calls.len(), 4);
        assert!(a.calls.iter().any(|c| c.is_name("Program")));
        assert!(a.calls.iter().any(|c| c.is_method_on("sh", "make")));
        assert!(a.calls.iter().any(|c| c.attribute() == Some("run_sync")
            && matches!(&c.callee, Callee::Attribute { object: None, .. })));
    }

    #[test]
    fn finds_calls_inside_nested_scopes() {
        let a = analyze(
            "def build():\n    with scoped(allowlist=x):\n        return [Program(n) for n in names]\n",
        );
        assert!(a.calls.iter().any(|c| c.is_name("scoped")));
        assert!(a.calls.iter().any(|c| c.is_name("Program")));
    }

    #[test]
    fn invalid_syntax_has_no_analysis() {
        assert!(PythonExtractor::new().analyze("def broken(:\n    pass\n").is_none());
    }

    #[test]
    fn python2_statements_have_no_analysis() {
        let extractor = PythonExtractor::new();
        assert!(extractor.analyze("print \"Program(\"\n").is_none());
        assert!(extractor.analyze("exec \"x = 1\"\n").is_none());
        assert!(extractor.analyze("print(\"Program(\")\n").is_some());
    }

    #[test]
    fn empty_source() {
        let a = analyze("");
        assert!(a.calls.is_empty());
        assert!(a.imports.is_empty());
    }
}
