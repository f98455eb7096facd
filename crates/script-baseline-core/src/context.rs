//! Context types for rule execution.

use crate::metadata::split_lines;
use std::path::{Path, PathBuf};

/// Context provided to per-script rules.
///
/// Holds the script text together with where the script lives, so rules
/// that need the filesystem (the matching-test check) can resolve paths.
#[derive(Debug, Clone)]
pub struct ScriptContext<'a> {
    /// Absolute path to the script.
    pub path: &'a Path,
    /// Script contents.
    pub content: &'a str,
    /// Scan root the script was discovered under.
    pub root: &'a Path,
    /// Path relative to the scan root.
    pub relative_path: PathBuf,
}

impl<'a> ScriptContext<'a> {
    /// Creates a new script context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &'a Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            root,
            relative_path,
        }
    }

    /// Returns the first line of the script, or `""` for an empty script.
    #[must_use]
    pub fn first_line(&self) -> &'a str {
        split_lines(self.content).first().copied().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_strips_root() {
        let ctx = ScriptContext::new(
            Path::new("/repo/scripts/ops/deploy.py"),
            "",
            Path::new("/repo/scripts"),
        );
        assert_eq!(ctx.relative_path, PathBuf::from("ops/deploy.py"));
    }

    #[test]
    fn relative_path_keeps_foreign_path() {
        let ctx = ScriptContext::new(Path::new("/tmp/x.py"), "", Path::new("/repo/scripts"));
        assert_eq!(ctx.relative_path, PathBuf::from("/tmp/x.py"));
    }

    #[test]
    fn first_line_of_empty_script() {
        let ctx = ScriptContext::new(Path::new("/a.py"), "", Path::new("/"));
        assert_eq!(ctx.first_line(), "");
    }

    #[test]
    fn first_line_handles_crlf() {
        let ctx = ScriptContext::new(Path::new("/a.py"), "#!/bin/sh\r\nrest\r\n", Path::new("/"));
        assert_eq!(ctx.first_line(), "#!/bin/sh");
    }

    #[test]
    fn first_line_ends_at_form_feed() {
        let ctx = ScriptContext::new(Path::new("/a.py"), "#!/bin/sh\x0c\nrest\n", Path::new("/"));
        assert_eq!(ctx.first_line(), "#!/bin/sh");
    }
}
