//! Inline uv metadata parsing.
//!
//! A roadmap script declares its runtime in a comment block:
//!
//! ```text
//! #!/usr/bin/env -S uv run python
//! # /// script
//! # requires-python = ">=3.13"
//! # dependencies = ["cuprum==0.1.0"]
//! # ///
//! ```

use std::collections::BTreeMap;

/// Required first line of every roadmap script.
pub const UV_SHEBANG: &str = "#!/usr/bin/env -S uv run python";

/// Line opening the metadata block.
pub const UV_BLOCK_START: &str = "# /// script";

/// Line closing the metadata block.
pub const UV_BLOCK_END: &str = "# ///";

/// Characters that end a line, besides the `\r\n` pair.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Splits text into lines on every Unicode line boundary.
///
/// `\r\n` counts as one break, a trailing break does not start an empty
/// line, and separators such as form feed end a line too.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while let Some(index) = rest.find(LINE_BREAKS) {
        lines.push(&rest[..index]);
        let tail = &rest[index..];
        let width = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[width..];
    }

    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

/// Key/value pairs parsed from one metadata block.
///
/// Duplicate keys keep the last value seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true when `key` was declared.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns true when no entries were parsed.
    ///
    /// An empty mapping means "no usable metadata block", which callers
    /// report separately from missing individual fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Parses key-value lines from the inline uv metadata block.
///
/// Returns an empty mapping when either marker line is missing. Lines
/// inside the block without `=` are skipped.
#[must_use]
pub fn parse_uv_metadata(script_text: &str) -> Metadata {
    let lines = split_lines(script_text);

    let Some(start) = lines.iter().position(|line| *line == UV_BLOCK_START) else {
        return Metadata::default();
    };
    let Some(end_offset) = lines[start + 1..]
        .iter()
        .position(|line| *line == UV_BLOCK_END)
    else {
        return Metadata::default();
    };
    let end = start + 1 + end_offset;

    let mut metadata = Metadata::default();
    for line in &lines[start + 1..end] {
        let cleaned = line.strip_prefix('#').unwrap_or(line).trim();
        let Some((key, value)) = cleaned.split_once('=') else {
            continue;
        };
        metadata
            .entries
            .insert(key.trim().to_string(), value.trim().to_string());
    }

    metadata
}
