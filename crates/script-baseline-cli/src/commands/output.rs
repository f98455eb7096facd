//! Shared output formatting for baseline reports.

use anyhow::Result;
use script_baseline_core::BaselineReport;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::OutputFormat;

#[derive(Serialize)]
struct JsonIssue {
    path: String,
    message: String,
}

#[derive(Serialize)]
struct JsonReport {
    passed: bool,
    scripts_checked: usize,
    issues: Vec<JsonIssue>,
}

/// Write a baseline report in the specified format.
pub fn print(
    report: &BaselineReport,
    root: &Path,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", report.render(root))?,
        OutputFormat::Json => print_json(report, root, out)?,
    }
    Ok(())
}

fn print_json(report: &BaselineReport, root: &Path, out: &mut dyn Write) -> Result<()> {
    let json = JsonReport {
        passed: !report.has_issues(),
        scripts_checked: report.scripts_checked,
        issues: report
            .sorted_issues()
            .into_iter()
            .map(|issue| JsonIssue {
                path: issue.display_path(root).display().to_string(),
                message: issue.message.clone(),
            })
            .collect(),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
    Ok(())
}
