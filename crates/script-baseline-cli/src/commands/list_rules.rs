//! List rules command implementation.

use anyhow::Result;
use script_baseline_rules::baseline_rules;
use std::io::Write;

/// Runs the list-rules command.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Baseline rules:\n")?;
    writeln!(out, "{:<8} {:<20} Description", "Code", "Name")?;
    writeln!(out, "{}", "-".repeat(80))?;

    for rule in baseline_rules() {
        writeln!(
            out,
            "{:<8} {:<20} {}",
            rule.code(),
            rule.name(),
            rule.description()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_rule() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for code in ["SB001", "SB002", "SB003", "SB004"] {
            assert!(text.contains(code), "missing {code} in:\n{text}");
        }
    }
}
