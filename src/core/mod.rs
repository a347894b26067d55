//! The rewrite engine.
//!
//! Everything under `core` is pure transformation: text in, text plus
//! advisory plugin/locale lists out. File discovery, parallel driving and
//! writing results back to disk live in the CLI layer.
//!
//! ## Pipeline order
//!
//! 1. `imports` — resolve the moment binding, rewrite it to Day.js
//! 2. `locales` — rewrite `moment/locale/<code>` references
//! 3. `matcher` — Static → Instance → Constructor → TypeRef passes,
//!    consulting `rules` and accumulating into `context`
//! 4. `printer` — serialize the mutated tree

pub mod context;
pub mod imports;
pub mod locales;
pub mod matcher;
pub mod parser;
pub mod pipeline;
pub mod printer;
pub mod rules;

pub use context::{Diagnostic, DiagnosticKind, FileContext};
pub use pipeline::{
    FileDiagnostic, TransformError, TransformOutput, activation_prologue, transform_source,
};
pub use rules::{RewriteRule, RuleTable, SOURCE_LIB, TARGET_LIB, rule_table};
