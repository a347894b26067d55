//! The per-file rewrite pipeline.
//!
//! Passes run in a strict order over one shared tree: resolve the alias,
//! rewrite locale references, run the four call-site passes, then serialize.
//! A file either comes out fully serialized or fails with the original text
//! untouched — there is no observable half-rewritten state.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use swc_common::SourceMap;

use crate::core::context::{DiagnosticKind, FileContext};
use crate::core::imports::resolve_imports;
use crate::core::locales::LocaleRewriter;
use crate::core::matcher::rewrite_call_sites;
use crate::core::parser::parse_source;
use crate::core::printer::print_module;
use crate::core::rules::TARGET_LIB;

/// Why a file was skipped. Both variants leave the original untouched.
#[derive(Debug)]
pub enum TransformError {
    /// The input is not parseable source.
    Parse(String),
    /// The mutated tree could not be rendered.
    Emit(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Parse(msg) => write!(f, "parse failure: {}", msg),
            TransformError::Emit(msg) => write!(f, "serialization failure: {}", msg),
        }
    }
}

impl std::error::Error for TransformError {}

/// A context diagnostic resolved to a printable location.
#[derive(Debug, Clone)]
pub struct FileDiagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line in the original source.
    pub line: usize,
    /// 1-based display column.
    pub col: usize,
    /// The original source line, for caret display.
    pub source_line: String,
}

/// Result of a successful per-file transform.
#[derive(Debug)]
pub struct TransformOutput {
    /// The rewritten source text.
    pub text: String,
    /// Day.js plugins the file now requires, deduplicated.
    pub plugins: BTreeSet<String>,
    /// Day.js locale files the file now requires, deduplicated.
    pub locales: BTreeSet<String>,
    /// Recoverable findings for the caller's diagnostic channel.
    pub diagnostics: Vec<FileDiagnostic>,
    /// Whether any pass actually changed the tree. Callers use this to
    /// leave untouched files on disk unreformatted.
    pub changed: bool,
}

/// Transform one file's source text.
///
/// The single entry point of the engine. Everything here is synchronous and
/// allocation-local: no I/O, no shared mutable state, safe to call from one
/// task per file.
pub fn transform_source(source: &str, file_path: &str) -> Result<TransformOutput, TransformError> {
    let parsed = parse_source(source.to_string(), file_path)
        .map_err(|e| TransformError::Parse(e.to_string()))?;
    let mut module = parsed.module;

    let mut ctx = FileContext::default();
    resolve_imports(&mut module, &mut ctx);
    LocaleRewriter::rewrite(&mut module, &mut ctx);
    rewrite_call_sites(&mut module, &mut ctx);

    let text = print_module(&module, parsed.source_map.clone(), &parsed.comments)
        .map_err(|e| TransformError::Emit(e.to_string()))?;

    let diagnostics = resolve_diagnostics(&ctx, &parsed.source_map, source);

    Ok(TransformOutput {
        text,
        plugins: ctx.plugins,
        locales: ctx.locales,
        diagnostics,
        changed: ctx.mutated,
    })
}

fn resolve_diagnostics(
    ctx: &FileContext,
    source_map: &Arc<SourceMap>,
    source: &str,
) -> Vec<FileDiagnostic> {
    ctx.diagnostics
        .iter()
        .map(|diagnostic| {
            let loc = source_map.lookup_char_pos(diagnostic.span.lo);
            let source_line = source
                .lines()
                .nth(loc.line.saturating_sub(1))
                .unwrap_or_default()
                .to_string();
            FileDiagnostic {
                kind: diagnostic.kind.clone(),
                line: loc.line,
                col: loc.col_display + 1,
                source_line,
            }
        })
        .collect()
}

/// Render the bootstrap block that activates the collected plugins and
/// locales.
///
/// Advisory output: the engine never injects this into rewritten files; the
/// caller pastes it into an entry module or bootstrap file.
pub fn activation_prologue(plugins: &BTreeSet<String>, locales: &BTreeSet<String>) -> String {
    let mut out = String::new();
    for plugin in plugins {
        out.push_str(&format!(
            "import {plugin} from '{TARGET_LIB}/plugin/{plugin}';\n"
        ));
    }
    for locale in locales {
        out.push_str(&format!("import '{TARGET_LIB}/locale/{locale}';\n"));
    }
    if !plugins.is_empty() {
        out.push('\n');
        for plugin in plugins {
            out.push_str(&format!("{TARGET_LIB}.extend({plugin});\n"));
        }
    }
    out
}
