//! Per-file migration state.
//!
//! One `FileContext` is created when a file's pipeline starts and discarded
//! when its output is produced. Nothing in it is shared across files, which
//! is what makes parallel batch runs lock-free.

use std::collections::BTreeSet;

use swc_common::Span;

use crate::core::rules::SOURCE_LIB;

/// A recoverable finding attached to a span.
///
/// Converted to a reportable issue with line/column information once the
/// whole file has been processed (the span only means something next to the
/// file's own `SourceMap`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A member reached through the source alias had no rewrite rule.
    UnrecognizedPattern { member: String },
    /// A second binding of the source library; the first one wins.
    AmbiguousAlias { alias: String },
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

/// Mutable per-file accumulator threaded through every pass.
#[derive(Debug, Default)]
pub struct FileContext {
    /// Local name bound to the source library's default export, once the
    /// import resolver has run.
    pub alias: Option<String>,
    /// The file already imports the target library's type name.
    pub has_target_type_import: bool,
    /// Day.js plugins the rewritten file requires.
    pub plugins: BTreeSet<String>,
    /// Day.js locale files the rewritten file requires.
    pub locales: BTreeSet<String>,
    /// Recoverable findings to surface after the pass.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any pass actually changed the tree.
    pub mutated: bool,
}

impl FileContext {
    /// The resolved alias, falling back to the conventional default name
    /// when no binding was found in the file.
    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(SOURCE_LIB)
    }

    /// Merge a rule's plugin requirements. Set semantics: recording the same
    /// plugin from many match sites keeps a single entry.
    pub fn require_plugins(&mut self, plugins: &[&str]) {
        for plugin in plugins {
            self.plugins.insert((*plugin).to_string());
        }
    }

    pub fn require_locale(&mut self, code: &str) {
        self.locales.insert(code.to_string());
    }

    pub fn warn(&mut self, kind: DiagnosticKind, span: Span) {
        self.diagnostics.push(Diagnostic { kind, span });
    }
}

#[cfg(test)]
mod tests {
    use swc_common::DUMMY_SP;

    use super::*;

    #[test]
    fn alias_defaults_to_conventional_name() {
        let mut ctx = FileContext::default();
        assert_eq!(ctx.alias(), "moment");

        ctx.alias = Some("m".to_string());
        assert_eq!(ctx.alias(), "m");
    }

    #[test]
    fn plugin_requirements_deduplicate() {
        let mut ctx = FileContext::default();
        ctx.require_plugins(&["utc"]);
        ctx.require_plugins(&["utc", "timezone"]);
        ctx.require_plugins(&["utc"]);

        assert_eq!(
            ctx.plugins.iter().collect::<Vec<_>>(),
            vec!["timezone", "utc"]
        );
    }

    #[test]
    fn locale_requirements_deduplicate() {
        let mut ctx = FileContext::default();
        ctx.require_locale("zh-cn");
        ctx.require_locale("zh-cn");
        ctx.require_locale("de");

        assert_eq!(ctx.locales.iter().collect::<Vec<_>>(), vec!["de", "zh-cn"]);
    }

    #[test]
    fn diagnostics_accumulate_in_order() {
        let mut ctx = FileContext::default();
        ctx.warn(
            DiagnosticKind::UnrecognizedPattern {
                member: "fooBar".to_string(),
            },
            DUMMY_SP,
        );
        ctx.warn(
            DiagnosticKind::AmbiguousAlias {
                alias: "m2".to_string(),
            },
            DUMMY_SP,
        );

        assert_eq!(ctx.diagnostics.len(), 2);
        assert!(matches!(
            ctx.diagnostics[0].kind,
            DiagnosticKind::UnrecognizedPattern { .. }
        ));
    }
}
