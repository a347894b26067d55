//! Parallel batch transform over the scanned file set.
//!
//! One task per file: the rule table is shared read-only, every file gets
//! its own context, and nothing is coordinated across files beyond
//! collecting results at the end.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;

use super::{CommandResult, CommandSummary};
use crate::config::Config;
use crate::core::{DiagnosticKind, FileDiagnostic, TransformError, transform_source};
use crate::issues::{
    AmbiguousAliasIssue, EmitErrorIssue, Issue, ParseErrorIssue, Severity, SourceContext,
    SourceLocation, UnrecognizedPatternIssue,
};
use crate::scanner::scan_files;

/// Per-file result of a batch run.
pub struct FileOutcome {
    /// Display path, relative to the scanned root.
    pub path: String,
    pub changed: bool,
    pub plugins: BTreeSet<String>,
    pub locales: BTreeSet<String>,
}

pub struct BatchOutcome {
    /// One entry per file that transformed successfully, sorted by path.
    pub outcomes: Vec<FileOutcome>,
    pub issues: Vec<Issue>,
    pub files_scanned: usize,
    /// Files actually written back to disk (apply mode only).
    pub files_written: usize,
}

/// Transform every scanned file, optionally writing results back.
///
/// Dry-run (`apply == false`) performs the full transform and reports what
/// would change without persisting anything.
pub fn migrate_project(
    root: &Path,
    config: &Config,
    apply: bool,
    verbose: bool,
) -> Result<BatchOutcome> {
    let root_str = root.to_string_lossy();
    let scan = scan_files(&root_str, config, verbose);

    if scan.skipped_count > 0 {
        eprintln!(
            "Warning: {} path(s) skipped due to access errors{}",
            scan.skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }

    let mut files: Vec<&String> = scan.files.iter().collect();
    files.sort();

    let per_file: Vec<(Option<FileOutcome>, Vec<Issue>, bool)> = files
        .par_iter()
        .map(|file_path| transform_one(root, file_path, apply))
        .collect();

    let mut outcomes = Vec::new();
    let mut issues = Vec::new();
    let mut files_written = 0;
    for (outcome, file_issues, written) in per_file {
        if let Some(outcome) = outcome {
            outcomes.push(outcome);
        }
        issues.extend(file_issues);
        if written {
            files_written += 1;
        }
    }

    Ok(BatchOutcome {
        outcomes,
        issues,
        files_scanned: files.len(),
        files_written,
    })
}

/// Fold a batch outcome into the command result the reporter consumes.
pub fn finish(summary: CommandSummary, batch: BatchOutcome, fail_on_pending: bool) -> CommandResult {
    let error_count = batch
        .issues
        .iter()
        .filter(|issue| issue.severity() == Severity::Error)
        .count();
    let warning_count = batch.issues.len() - error_count;

    let mut required_plugins = BTreeSet::new();
    let mut required_locales = BTreeSet::new();
    let mut files_changed = 0;
    for outcome in batch.outcomes.iter().filter(|outcome| outcome.changed) {
        files_changed += 1;
        required_plugins.extend(outcome.plugins.iter().cloned());
        required_locales.extend(outcome.locales.iter().cloned());
    }

    CommandResult {
        summary,
        issues: batch.issues,
        error_count,
        warning_count,
        files_scanned: batch.files_scanned,
        files_changed,
        required_plugins,
        required_locales,
        fail_on_pending,
    }
}

fn transform_one(root: &Path, file_path: &str, apply: bool) -> (Option<FileOutcome>, Vec<Issue>, bool) {
    let display = display_path(root, file_path);

    let source = match fs::read_to_string(file_path) {
        Ok(source) => source,
        Err(err) => {
            let issue = Issue::ParseError(ParseErrorIssue {
                file_path: display,
                error: format!("Failed to read file: {}", err),
            });
            return (None, vec![issue], false);
        }
    };

    match transform_source(&source, file_path) {
        Ok(output) => {
            let mut issues: Vec<Issue> = output
                .diagnostics
                .into_iter()
                .map(|diagnostic| issue_from_diagnostic(diagnostic, &display))
                .collect();

            let mut written = false;
            if output.changed && apply {
                match fs::write(file_path, &output.text) {
                    Ok(()) => written = true,
                    Err(err) => issues.push(Issue::EmitError(EmitErrorIssue {
                        file_path: display.clone(),
                        error: format!("Failed to write file: {}", err),
                    })),
                }
            }

            let outcome = FileOutcome {
                path: display,
                changed: output.changed,
                plugins: output.plugins,
                locales: output.locales,
            };
            (Some(outcome), issues, written)
        }
        Err(TransformError::Parse(error)) => {
            let issue = Issue::ParseError(ParseErrorIssue {
                file_path: display,
                error,
            });
            (None, vec![issue], false)
        }
        Err(TransformError::Emit(error)) => {
            let issue = Issue::EmitError(EmitErrorIssue {
                file_path: display,
                error,
            });
            (None, vec![issue], false)
        }
    }
}

fn issue_from_diagnostic(diagnostic: FileDiagnostic, display_path: &str) -> Issue {
    let context = SourceContext {
        location: SourceLocation {
            file_path: display_path.to_string(),
            line: diagnostic.line,
            col: diagnostic.col,
        },
        source_line: diagnostic.source_line,
    };
    match diagnostic.kind {
        DiagnosticKind::UnrecognizedPattern { member } => {
            Issue::UnrecognizedPattern(UnrecognizedPatternIssue { context, member })
        }
        DiagnosticKind::AmbiguousAlias { alias } => {
            Issue::AmbiguousAlias(AmbiguousAliasIssue { context, alias })
        }
    }
}

fn display_path(root: &Path, file_path: &str) -> String {
    Path::new(file_path)
        .strip_prefix(root)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| file_path.to_string())
}
