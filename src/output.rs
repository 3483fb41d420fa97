//! @ai:module:intent Format output for different formats (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_diagnostics, format_file_report, format_lint_result
//! @ai:module:depends_on linter, diagnostic
//! @ai:module:stateless true

use crate::diagnostic::Diagnostic;
use crate::linter::{FileReport, LintResult};
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a bare diagnostic list, labelled with where the text came from
/// @ai:effects pure
pub fn format_diagnostics(source: &str, diagnostics: &[Diagnostic], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(diagnostics, false),
        OutputFormat::JsonPretty => to_json(diagnostics, true),
        OutputFormat::Text => {
            let mut output = String::new();
            push_diagnostics(&mut output, source, diagnostics);
            push_status(&mut output, diagnostics.len(), usize::from(!diagnostics.is_empty()));
            output
        }
    }
}

/// @ai:intent Format the report of a single file
/// @ai:effects pure
pub fn format_file_report(report: &FileReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report, false),
        OutputFormat::JsonPretty => to_json(report, true),
        OutputFormat::Text => format_diagnostics(
            &report.path.display().to_string(),
            &report.diagnostics,
            OutputFormat::Text,
        ),
    }
}

/// @ai:intent Format lint results as a string
/// @ai:effects pure
pub fn format_lint_result(result: &LintResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(result, false),
        OutputFormat::JsonPretty => to_json(result, true),
        OutputFormat::Text => format_lint_result_text(result),
    }
}

/// @ai:intent Format lint results as human-readable text
/// @ai:effects pure
fn format_lint_result_text(result: &LintResult) -> String {
    let mut output = String::new();

    for report in result.reports.iter().filter(|r| !r.is_valid()) {
        push_diagnostics(
            &mut output,
            &report.path.display().to_string(),
            &report.diagnostics,
        );
    }

    output.push('\n');
    output.push_str(&format!(
        "Checked {} files ({} empty skipped)\n",
        result.files_checked, result.files_skipped
    ));
    push_status(&mut output, result.diagnostics, result.invalid_files);

    output
}

fn push_diagnostics(output: &mut String, source: &str, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let location = format!("{}:{}", source, diag.line);
        output.push_str(&format!(
            "{} {} - {}\n",
            "ERROR".red().bold(),
            location.dimmed(),
            diag.message
        ));
    }
}

fn push_status(output: &mut String, diagnostics: usize, files: usize) {
    if diagnostics > 0 {
        output.push_str(&format!(
            "{} diagnostics in {} files\n",
            diagnostics.to_string().red().bold(),
            files
        ));
    } else {
        output.push_str(&format!("{} No issues found\n", "OK".green().bold()));
    }
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}
