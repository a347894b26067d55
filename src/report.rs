//! Report formatting and printing utilities.
//!
//! This module displays issues in cargo-style format and summarizes what a
//! command did. Separate from core logic so dayshift can be used as a
//! library without printing side effects.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::cli::commands::{CommandResult, CommandSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::activation_prologue;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result to stdout.
pub fn print_result(result: &CommandResult, verbose: bool) {
    print_result_to(result, verbose, &mut io::stdout().lock());
}

/// Print a command result to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn print_result_to<W: Write>(result: &CommandResult, _verbose: bool, writer: &mut W) {
    let mut sorted: Vec<&Issue> = result.issues.iter().collect();
    sorted.sort_by_key(|issue| sort_key(issue));

    let max_line_width = sorted
        .iter()
        .filter_map(|issue| match issue.location() {
            ReportLocation::Source(ctx) => Some(ctx.location.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|line| line.to_string().len())
        .unwrap_or(1);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_requirements(result, writer);
    print_summary(result, writer);
}

fn sort_key(issue: &Issue) -> (String, usize, usize) {
    match issue.location() {
        ReportLocation::Source(ctx) => (
            ctx.location.file_path.clone(),
            ctx.location.line,
            ctx.location.col,
        ),
        ReportLocation::File { path } => (path.to_string(), 0, 0),
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(ctx) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.location.file_path,
                ctx.location.line,
                ctx.location.col
            );

            let caret = match issue.severity() {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = max_line_width);
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                ctx.location.line.to_string().blue(),
                "|".blue(),
                ctx.source_line,
                width = max_line_width
            );
            // Use unicode display width so the caret lands right even with
            // CJK characters before the column.
            let prefix: String = ctx
                .source_line
                .chars()
                .take(ctx.location.col.saturating_sub(1))
                .collect();
            let padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret,
                width = max_line_width,
                padding = padding
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

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
    let _ = writeln!(writer);
}

/// The plugin/locale advisory block: what the migrated code now depends on
/// and the bootstrap lines that activate it.
fn print_requirements<W: Write>(result: &CommandResult, writer: &mut W) {
    if result.required_plugins.is_empty() && result.required_locales.is_empty() {
        return;
    }

    if !result.required_plugins.is_empty() {
        let plugins: Vec<&str> = result.required_plugins.iter().map(String::as_str).collect();
        let _ = writeln!(
            writer,
            "{} {}",
            "Required Day.js plugins:".bold(),
            plugins.join(", ")
        );
    }
    if !result.required_locales.is_empty() {
        let locales: Vec<&str> = result.required_locales.iter().map(String::as_str).collect();
        let _ = writeln!(
            writer,
            "{} {}",
            "Required locales:".bold(),
            locales.join(", ")
        );
    }

    let _ = writeln!(writer);
    let _ = writeln!(writer, "Add this to your app's bootstrap module:");
    let prologue = activation_prologue(&result.required_plugins, &result.required_locales);
    for line in prologue.lines() {
        let _ = writeln!(writer, "    {}", line);
    }
    let _ = writeln!(writer);
}

fn print_summary<W: Write>(result: &CommandResult, writer: &mut W) {
    let line = match &result.summary {
        CommandSummary::Migrate(summary) if summary.is_apply => format!(
            "{} Migrated {} of {} files",
            SUCCESS_MARK, result.files_changed, result.files_scanned
        ),
        CommandSummary::Migrate(_) => format!(
            "{} {} of {} files would change (run with --apply to write)",
            SUCCESS_MARK, result.files_changed, result.files_scanned
        ),
        CommandSummary::Check => {
            if result.files_changed == 0 && result.issues.is_empty() {
                format!(
                    "{} Checked {} files - nothing left to migrate",
                    SUCCESS_MARK, result.files_scanned
                )
            } else {
                format!(
                    "{} {} of {} files still use moment",
                    FAILURE_MARK, result.files_changed, result.files_scanned
                )
            }
        }
        CommandSummary::Init(_) => format!("{} Created {}", SUCCESS_MARK, CONFIG_FILE_NAME),
    };

    let failed = result.error_count > 0
        || (result.fail_on_pending && (result.files_changed > 0 || result.warning_count > 0));
    if failed {
        let _ = writeln!(writer, "{}", line.red());
    } else {
        let _ = writeln!(writer, "{}", line.green());
    }

    if result.error_count > 0 || result.warning_count > 0 {
        let _ = writeln!(
            writer,
            "{} error(s), {} warning(s)",
            result.error_count, result.warning_count
        );
    }
}
