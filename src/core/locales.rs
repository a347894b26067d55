//! Locale resource rewriting.
//!
//! moment ships locale data under `moment/locale/<code>` (or
//! `moment/dist/locale/<code>`); Day.js under `dayjs/locale/<code>`. This
//! pass rewrites every such module reference — static imports, `require`
//! calls and dynamic `import()` calls — and records the locale code so the
//! caller knows which locale files the migrated file depends on.

use std::sync::LazyLock;

use regex::Regex;
use swc_ecma_ast::{CallExpr, Callee, Expr, ImportDecl, Lit, Module, Str};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::core::context::FileContext;
use crate::core::rules::TARGET_LIB;

static LOCALE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^moment/(?:dist/)?locale/([a-z-]+)$").unwrap());

pub struct LocaleRewriter<'a> {
    ctx: &'a mut FileContext,
}

impl<'a> LocaleRewriter<'a> {
    pub fn rewrite(module: &mut Module, ctx: &'a mut FileContext) {
        module.visit_mut_with(&mut LocaleRewriter { ctx });
    }

    fn rewrite_str(&mut self, s: &mut Str) {
        let Some(code) = locale_code(s.value.as_str().unwrap_or("")) else {
            return;
        };
        s.value = format!("{TARGET_LIB}/locale/{code}").into();
        s.raw = None;
        self.ctx.require_locale(&code);
        self.ctx.mutated = true;
    }
}

impl VisitMut for LocaleRewriter<'_> {
    fn visit_mut_import_decl(&mut self, import: &mut ImportDecl) {
        self.rewrite_str(&mut import.src);
        import.visit_mut_children_with(self);
    }

    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        let is_module_load = match &call.callee {
            Callee::Import(_) => true,
            Callee::Expr(callee) => {
                matches!(&**callee, Expr::Ident(ident) if ident.sym.as_ref() == "require")
            }
            Callee::Super(_) => false,
        };
        if is_module_load
            && let Some(first) = call.args.first_mut()
            && first.spread.is_none()
            && let Expr::Lit(Lit::Str(s)) = &mut *first.expr
        {
            self.rewrite_str(s);
        }
        call.visit_mut_children_with(self);
    }
}

/// Record a literal locale code in the conventional third constructor
/// argument, e.g. `moment('15-08-2022', 'DD-MM-YYYY', 'es')`. The call
/// itself is not altered; activation is the caller's concern.
pub fn record_constructor_locale(call: &CallExpr, ctx: &mut FileContext) {
    if let Some(third) = call.args.get(2)
        && third.spread.is_none()
        && let Expr::Lit(Lit::Str(s)) = &*third.expr
    {
        ctx.require_locale(s.value.as_str().unwrap_or(""));
    }
}

fn locale_code(path: &str) -> Option<String> {
    LOCALE_PATH
        .captures(path)
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use crate::core::parser::parse_source;
    use crate::core::printer::print_module;

    use super::*;

    fn rewrite(code: &str) -> (String, FileContext) {
        let parsed = parse_source(code.to_string(), "test.ts").unwrap();
        let mut module = parsed.module;
        let mut ctx = FileContext::default();
        LocaleRewriter::rewrite(&mut module, &mut ctx);
        let text = print_module(&module, parsed.source_map, &parsed.comments).unwrap();
        (text, ctx)
    }

    #[test]
    fn rewrites_require_locale() {
        let (text, ctx) = rewrite("require('moment/locale/zh-cn');");
        assert!(text.contains("require(\"dayjs/locale/zh-cn\")"));
        assert!(ctx.locales.contains("zh-cn"));
    }

    #[test]
    fn rewrites_import_locale() {
        let (text, ctx) = rewrite("import 'moment/locale/de';");
        assert!(text.contains("import \"dayjs/locale/de\""));
        assert!(ctx.locales.contains("de"));
    }

    #[test]
    fn rewrites_dist_locale_path() {
        let (text, ctx) = rewrite("import 'moment/dist/locale/fr';");
        assert!(text.contains("\"dayjs/locale/fr\""));
        assert!(ctx.locales.contains("fr"));
    }

    #[test]
    fn rewrites_dynamic_import_locale() {
        let (text, ctx) = rewrite("import('moment/locale/ja');");
        assert!(text.contains("import(\"dayjs/locale/ja\")"));
        assert!(ctx.locales.contains("ja"));
    }

    #[test]
    fn leaves_other_modules_alone() {
        let (text, ctx) = rewrite("import 'moment';\nrequire('lodash');");
        assert!(text.contains("'moment'"));
        assert!(text.contains("'lodash'"));
        assert!(ctx.locales.is_empty());
        assert!(!ctx.mutated);
    }

    #[test]
    fn records_constructor_locale_without_touching_call() {
        let parsed = parse_source(
            "moment('15-08-2022', 'DD-MM-YYYY', 'es');".to_string(),
            "test.ts",
        )
        .unwrap();
        let mut ctx = FileContext::default();
        // The constructor pass hands its calls here.
        if let swc_ecma_ast::ModuleItem::Stmt(swc_ecma_ast::Stmt::Expr(stmt)) =
            &parsed.module.body[0]
            && let Expr::Call(call) = &*stmt.expr
        {
            record_constructor_locale(call, &mut ctx);
        }
        assert!(ctx.locales.contains("es"));
        assert!(!ctx.mutated);
    }
}
