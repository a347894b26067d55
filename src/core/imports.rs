//! Source-library import and require resolution.
//!
//! Finds the binding of moment's default export in a file, records its local
//! name as the alias for the call-site passes, and rewrites the binding to
//! Day.js. A pre-existing Day.js import is never duplicated: specifiers from
//! the rewritten import merge into it instead.

use std::collections::HashSet;

use swc_ecma_ast::{
    CallExpr, Callee, Decl, Expr, ImportDecl, ImportNamedSpecifier, ImportSpecifier, Lit, Module,
    ModuleDecl, ModuleExportName, ModuleItem, ObjectPatProp, Pat, PropName, Stmt, Str,
};

use crate::core::context::{DiagnosticKind, FileContext};
use crate::core::rules::{SOURCE_LIB, SOURCE_TYPE, TARGET_LIB, TARGET_TYPE};

/// What the file already imports from the target library.
struct TargetImport {
    index: usize,
    has_default: bool,
    named: HashSet<String>,
}

/// Resolve the moment binding and rewrite it to Day.js.
///
/// Must run before any call-site pass: the matcher passes read the alias
/// this records.
pub fn resolve_imports(module: &mut Module, ctx: &mut FileContext) {
    let target = scan_target_import(module, ctx);
    let rewritten = rewrite_source_import(module, ctx);

    if let (Some(target), Some(rewritten_idx)) = (target, rewritten) {
        merge_into_existing(module, &target, rewritten_idx);
    }

    rewrite_require_bindings(module, ctx);
}

fn scan_target_import(module: &Module, ctx: &mut FileContext) -> Option<TargetImport> {
    for (index, item) in module.body.iter().enumerate() {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
            continue;
        };
        if import.src.value.as_str().unwrap_or("") != TARGET_LIB {
            continue;
        }

        let mut has_default = false;
        let mut named = HashSet::new();
        for spec in &import.specifiers {
            match spec {
                ImportSpecifier::Default(_) => has_default = true,
                ImportSpecifier::Named(spec) => {
                    let name = imported_name(spec).to_string();
                    if name == TARGET_TYPE {
                        ctx.has_target_type_import = true;
                    }
                    named.insert(name);
                }
                ImportSpecifier::Namespace(_) => {}
            }
        }
        return Some(TargetImport {
            index,
            has_default,
            named,
        });
    }
    None
}

/// Rewrite the first moment import in place; warn about any later one.
fn rewrite_source_import(module: &mut Module, ctx: &mut FileContext) -> Option<usize> {
    let mut rewritten = None;

    for (index, item) in module.body.iter_mut().enumerate() {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
            continue;
        };
        if import.src.value.as_str().unwrap_or("") != SOURCE_LIB {
            continue;
        }

        if rewritten.is_some() {
            ctx.warn(
                DiagnosticKind::AmbiguousAlias {
                    alias: local_binding_name(import),
                },
                import.span,
            );
            continue;
        }

        for spec in import.specifiers.iter_mut() {
            match spec {
                ImportSpecifier::Default(spec) => {
                    if ctx.alias.is_none() {
                        ctx.alias = Some(spec.local.sym.to_string());
                    }
                    spec.local.sym = TARGET_LIB.into();
                }
                ImportSpecifier::Namespace(spec) => {
                    // `import * as m from 'moment'` binds the default export
                    // too; only the first binding becomes the alias.
                    if ctx.alias.is_none() {
                        ctx.alias = Some(spec.local.sym.to_string());
                        spec.local.sym = TARGET_LIB.into();
                    }
                }
                ImportSpecifier::Named(spec) => {
                    if imported_name(spec) == SOURCE_TYPE {
                        rename_named_specifier(spec);
                        ctx.has_target_type_import = true;
                    }
                }
            }
        }

        import.src = Box::new(Str {
            span: import.src.span,
            value: TARGET_LIB.into(),
            raw: None,
        });
        ctx.mutated = true;
        rewritten = Some(index);
    }

    rewritten
}

/// Move the rewritten import's specifiers into the pre-existing target
/// import and drop the now-empty declaration: one Day.js import per file.
fn merge_into_existing(module: &mut Module, target: &TargetImport, rewritten_idx: usize) {
    if target.index == rewritten_idx {
        return;
    }

    let moved: Vec<ImportSpecifier> = match &mut module.body[rewritten_idx] {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => import.specifiers.drain(..).collect(),
        _ => return,
    };

    if let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = &mut module.body[target.index] {
        for spec in moved {
            let duplicate = match &spec {
                ImportSpecifier::Default(_) => target.has_default,
                ImportSpecifier::Named(named) => target.named.contains(imported_name(named)),
                ImportSpecifier::Namespace(_) => false,
            };
            if duplicate {
                continue;
            }
            if matches!(spec, ImportSpecifier::Default(_)) {
                // A default specifier must precede named specifiers.
                import.specifiers.insert(0, spec);
            } else {
                import.specifiers.push(spec);
            }
        }
    }

    module.body.remove(rewritten_idx);
}

/// `const moment = require('moment')` and the destructured type-alias form.
fn rewrite_require_bindings(module: &mut Module, ctx: &mut FileContext) {
    for item in module.body.iter_mut() {
        let ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) = item else {
            continue;
        };
        for decl in var.decls.iter_mut() {
            let Some(init) = &mut decl.init else { continue };
            let Expr::Call(call) = &mut **init else {
                continue;
            };
            if !is_require_of(call, SOURCE_LIB) {
                continue;
            }

            match &mut decl.name {
                Pat::Ident(binding) => {
                    if ctx.alias.is_some() {
                        ctx.warn(
                            DiagnosticKind::AmbiguousAlias {
                                alias: binding.id.sym.to_string(),
                            },
                            binding.id.span,
                        );
                        continue;
                    }
                    ctx.alias = Some(binding.id.sym.to_string());
                    binding.id.sym = TARGET_LIB.into();
                }
                Pat::Object(pattern) => {
                    for prop in pattern.props.iter_mut() {
                        match prop {
                            ObjectPatProp::Assign(assign) => {
                                if assign.key.id.sym.as_ref() == SOURCE_TYPE {
                                    assign.key.id.sym = TARGET_TYPE.into();
                                    ctx.has_target_type_import = true;
                                }
                            }
                            ObjectPatProp::KeyValue(kv) => {
                                if let PropName::Ident(key) = &mut kv.key
                                    && key.sym.as_ref() == SOURCE_TYPE
                                {
                                    key.sym = TARGET_TYPE.into();
                                    ctx.has_target_type_import = true;
                                }
                            }
                            ObjectPatProp::Rest(_) => {}
                        }
                    }
                }
                _ => continue,
            }

            set_module_arg(call, TARGET_LIB);
            ctx.mutated = true;
        }
    }
}

fn imported_name(spec: &ImportNamedSpecifier) -> &str {
    match &spec.imported {
        Some(ModuleExportName::Ident(ident)) => ident.sym.as_ref(),
        Some(ModuleExportName::Str(s)) => s.value.as_str().unwrap_or(""),
        None => spec.local.sym.as_ref(),
    }
}

fn rename_named_specifier(spec: &mut ImportNamedSpecifier) {
    match &mut spec.imported {
        Some(ModuleExportName::Ident(ident)) => ident.sym = TARGET_TYPE.into(),
        Some(ModuleExportName::Str(s)) => {
            s.value = TARGET_TYPE.into();
            s.raw = None;
        }
        None => spec.local.sym = TARGET_TYPE.into(),
    }
}

/// Best-effort name for the ambiguous-binding warning.
fn local_binding_name(import: &ImportDecl) -> String {
    for spec in &import.specifiers {
        match spec {
            ImportSpecifier::Default(spec) => return spec.local.sym.to_string(),
            ImportSpecifier::Namespace(spec) => return spec.local.sym.to_string(),
            ImportSpecifier::Named(_) => {}
        }
    }
    SOURCE_LIB.to_string()
}

fn is_require_of(call: &CallExpr, module_name: &str) -> bool {
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    let Expr::Ident(ident) = &**callee else {
        return false;
    };
    if ident.sym.as_ref() != "require" || call.args.len() != 1 || call.args[0].spread.is_some() {
        return false;
    }
    matches!(&*call.args[0].expr, Expr::Lit(Lit::Str(s)) if s.value.as_str().unwrap_or("") == module_name)
}

fn set_module_arg(call: &mut CallExpr, value: &str) {
    if let Expr::Lit(Lit::Str(s)) = &mut *call.args[0].expr {
        s.value = value.into();
        s.raw = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::core::parser::parse_source;
    use crate::core::printer::print_module;

    use super::*;

    fn resolve(code: &str) -> (String, FileContext) {
        let parsed = parse_source(code.to_string(), "test.ts").unwrap();
        let mut module = parsed.module;
        let mut ctx = FileContext::default();
        resolve_imports(&mut module, &mut ctx);
        let text = print_module(&module, parsed.source_map, &parsed.comments).unwrap();
        (text, ctx)
    }

    #[test]
    fn rewrites_default_import() {
        let (text, ctx) = resolve("import moment from 'moment';");
        assert!(text.contains("import dayjs from \"dayjs\""));
        assert_eq!(ctx.alias.as_deref(), Some("moment"));
        assert!(ctx.mutated);
    }

    #[test]
    fn records_renamed_default_import_as_alias() {
        let (text, ctx) = resolve("import m from 'moment';");
        assert!(text.contains("import dayjs from \"dayjs\""));
        assert_eq!(ctx.alias.as_deref(), Some("m"));
    }

    #[test]
    fn rewrites_type_specifier() {
        let (text, ctx) = resolve("import moment, { Moment } from 'moment';");
        assert!(text.contains("Dayjs"));
        assert!(!text.contains("Moment"));
        assert!(ctx.has_target_type_import);
    }

    #[test]
    fn keeps_local_name_of_renamed_type_import() {
        let (text, ctx) = resolve("import { Moment as M } from 'moment';");
        assert!(text.contains("Dayjs as M"));
        assert!(ctx.has_target_type_import);
    }

    #[test]
    fn merges_into_existing_target_import() {
        let (text, ctx) = resolve("import { Dayjs } from 'dayjs';\nimport moment from 'moment';");
        assert_eq!(text.matches("import").count(), 1);
        assert!(text.contains("import dayjs, { Dayjs } from 'dayjs'"));
        assert!(ctx.has_target_type_import);
    }

    #[test]
    fn drops_duplicate_default_on_merge() {
        let (text, _) = resolve("import dayjs from 'dayjs';\nimport moment from 'moment';");
        assert_eq!(text.matches("import").count(), 1);
        assert!(text.contains("import dayjs from 'dayjs'"));
    }

    #[test]
    fn rewrites_side_effect_import() {
        let (text, ctx) = resolve("import 'moment';");
        assert!(text.contains("import \"dayjs\""));
        assert!(ctx.alias.is_none());
        assert_eq!(ctx.alias(), "moment");
    }

    #[test]
    fn rewrites_require_binding() {
        let (text, ctx) = resolve("const moment = require('moment');");
        assert!(text.contains("const dayjs = require(\"dayjs\")"));
        assert_eq!(ctx.alias.as_deref(), Some("moment"));
    }

    #[test]
    fn rewrites_destructured_require_type() {
        let (text, ctx) = resolve("const { Moment } = require('moment');");
        assert!(text.contains("Dayjs"));
        assert!(text.contains("require(\"dayjs\")"));
        assert!(ctx.has_target_type_import);
    }

    #[test]
    fn first_binding_wins_on_conflict() {
        let (text, ctx) = resolve("import moment from 'moment';\nimport m2 from 'moment';");
        assert!(text.contains("import dayjs from \"dayjs\""));
        // The later binding is reported and left alone for a human to audit.
        assert!(text.contains("import m2 from 'moment'"));
        assert_eq!(ctx.diagnostics.len(), 1);
        assert!(matches!(
            &ctx.diagnostics[0].kind,
            DiagnosticKind::AmbiguousAlias { alias } if alias == "m2"
        ));
        assert_eq!(ctx.alias.as_deref(), Some("moment"));
    }

    #[test]
    fn import_beats_later_require() {
        let (text, ctx) =
            resolve("import moment from 'moment';\nconst m = require('moment');");
        assert_eq!(ctx.alias.as_deref(), Some("moment"));
        assert!(text.contains("const m = require('moment')"));
        assert_eq!(ctx.diagnostics.len(), 1);
    }

    #[test]
    fn no_binding_leaves_file_alone() {
        let (text, ctx) = resolve("const x = 1;");
        assert!(text.contains("const x = 1"));
        assert!(ctx.alias.is_none());
        assert!(!ctx.mutated);
    }
}
