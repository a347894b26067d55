use std::collections::BTreeSet;

use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Migrate(MigrateSummary),
    Check,
    Init(InitSummary),
}

#[derive(Debug)]
pub struct MigrateSummary {
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a dayshift command.
pub struct CommandResult {
    pub summary: CommandSummary,
    /// All issues found while transforming.
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub warning_count: usize,
    /// Number of source files scanned.
    pub files_scanned: usize,
    /// Number of files whose tree actually changed.
    pub files_changed: usize,
    /// Union of plugin requirements across all changed files.
    pub required_plugins: BTreeSet<String>,
    /// Union of locale requirements across all changed files.
    pub required_locales: BTreeSet<String>,
    /// If true, pending migrations (changed files or warnings) exit with
    /// failure. Used by `check` as a CI gate.
    pub fail_on_pending: bool,
}
