//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format,
//! and the plain output of the query commands.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, HoistSummary, InitSummary, ParamsSummary, PatternsSummary,
    RefsSummary, ResolveSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format.
///
/// Issues are sorted and displayed with severity, location, source context,
/// and details.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(files: usize, locales: usize) {
    print_success_to(files, locales, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, locales: usize, writer: &mut W) {
    let msg = format!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} FTL {} in {} {} - no issues found",
            files,
            if files == 1 { "file" } else { "files" },
            locales,
            if locales == 1 { "locale" } else { "locales" }
        )
        .green()
    );
    let _ = writeln!(writer, "{}", msg);
}

/// Print a warning about files that could not be read.
pub fn print_file_error_warning(count: usize, verbose: bool) {
    print_file_error_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a file error warning to a custom writer.
pub fn print_file_error_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);

    // Print source context if available
    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    // Print hint if present
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "\n{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::Message(ctx) => (ctx.file_path(), ctx.line(), ctx.col(), None),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| {
            let loc = i.location();
            match loc {
                ReportLocation::Source(ctx) => Some(ctx.line()),
                ReportLocation::Message(ctx) => Some(ctx.line()),
                ReportLocation::File { .. } => None,
            }
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

pub fn print(result: &CommandResult, verbose: bool) {
    print_command_output(result, &mut io::stdout().lock());

    if matches!(result.summary, CommandSummary::Check) && result.issues.is_empty() {
        print_success(result.files_checked, result.locales_checked);
    }

    print_file_error_warning(result.file_error_count, verbose);
}

fn print_command_output<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Check => {
            report_to(&result.issues, writer);
        }
        CommandSummary::Params(summary) => print_params(summary, writer),
        CommandSummary::Refs(summary) => print_refs(summary, writer),
        CommandSummary::Hoist(summary) => print_hoist(summary, writer),
        CommandSummary::Patterns(summary) => print_patterns(summary, writer),
        CommandSummary::Resolve(summary) => print_resolve(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_json<W: Write, T: serde::Serialize>(value: &T, writer: &mut W) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        Err(e) => eprintln!("{} {}", "error:".bold().red(), e),
    }
}

fn print_params<W: Write>(summary: &ParamsSummary, writer: &mut W) {
    print_json(&summary.params, writer);
}

fn print_refs<W: Write>(summary: &RefsSummary, writer: &mut W) {
    print_json(&summary.references, writer);
}

fn print_hoist<W: Write>(summary: &HoistSummary, writer: &mut W) {
    match summary {
        HoistSummary::Json(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        HoistSummary::Ftl(ftl) => {
            let _ = write!(writer, "{}", ftl);
        }
    }
}

fn print_patterns<W: Write>(summary: &PatternsSummary, writer: &mut W) {
    for sample in &summary.samples {
        let label = match &sample.attribute {
            Some(attribute) => format!("{}.{}", summary.key, attribute),
            None => summary.key.clone(),
        };
        let _ = writeln!(writer, "{} {}", format!("{}:", label).dimmed(), sample.text);
    }
}

fn print_resolve<W: Write>(summary: &ResolveSummary, writer: &mut W) {
    let _ = writeln!(writer, "{}", summary.text);

    if summary.locale != summary.requested_locale {
        eprintln!(
            "{} '{}' resolved from {} (chain: {})",
            "note:".bold(),
            summary.key,
            summary.locale,
            summary.chain
        );
    }
    for error in &summary.format_errors {
        eprintln!("{} {}", "warning:".bold().yellow(), error);
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
