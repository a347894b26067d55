//! Call-site matching passes.
//!
//! Four passes run in fixed order over one tree: Static → Instance →
//! Constructor → TypeRef. The most specific shape claims a call site first,
//! and a replaced node is never revisited by a later pass. Every rewrite is
//! a single assignment into the parent's slot, so no pass ever observes a
//! half-applied node.

use swc_common::{Span, SyntaxContext};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, ExprOrSpread, Ident, IdentName, Invalid, Lit, MemberExpr, MemberProp,
    Module, Str, TsEntityName, TsTypeRef,
};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::core::context::{DiagnosticKind, FileContext};
use crate::core::locales::record_constructor_locale;
use crate::core::rules::{SOURCE_TYPE, StructuralTransform, TARGET_LIB, TARGET_TYPE, rule_table};

/// Run all four passes. The alias must already be resolved.
pub fn rewrite_call_sites(module: &mut Module, ctx: &mut FileContext) {
    let alias = ctx.alias().to_string();
    module.visit_mut_with(&mut StaticPass {
        alias: &alias,
        ctx: &mut *ctx,
    });
    module.visit_mut_with(&mut InstancePass {
        alias: &alias,
        ctx: &mut *ctx,
    });
    module.visit_mut_with(&mut ConstructorPass {
        alias: &alias,
        ctx: &mut *ctx,
    });
    module.visit_mut_with(&mut TypeRefPass { ctx });
}

fn ident(name: &str, span: Span) -> Ident {
    Ident {
        span,
        ctxt: SyntaxContext::empty(),
        sym: name.into(),
        optional: false,
    }
}

fn prop_ident(name: &str, span: Span) -> IdentName {
    IdentName {
        span,
        sym: name.into(),
    }
}

fn str_lit(value: &str, span: Span) -> Str {
    Str {
        span,
        value: value.into(),
        raw: None,
    }
}

/// Whether the receiver chain is (transitively) rooted at the alias, e.g.
/// `m`, `m()`, `m().add(1, 'day')`, `(m())`.
fn receiver_is_alias(expr: &Expr, alias: &str) -> bool {
    match expr {
        Expr::Ident(i) => i.sym.as_ref() == alias,
        Expr::Call(call) => match &call.callee {
            Callee::Expr(callee) => receiver_is_alias(callee, alias),
            _ => false,
        },
        Expr::Member(member) => receiver_is_alias(&member.obj, alias),
        Expr::Paren(paren) => receiver_is_alias(&paren.expr, alias),
        _ => false,
    }
}

// ------------------------------------------------------------------
// Pass 1: static members, `alias.member(...)`.
// ------------------------------------------------------------------

struct StaticPass<'a> {
    alias: &'a str,
    ctx: &'a mut FileContext,
}

impl VisitMut for StaticPass<'_> {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if let Some(replacement) = self.reshape_call(expr) {
            *expr = replacement;
        } else if let Expr::Member(member) = expr {
            self.rewrite_member(member);
        }
        expr.visit_mut_children_with(self);
    }
}

impl StaticPass<'_> {
    /// `alias.isDate(x)` → `dayjs(x).isValid()`, the one static rule whose
    /// target equivalent is a different call shape.
    fn reshape_call(&mut self, expr: &mut Expr) -> Option<Expr> {
        let Expr::Call(call) = expr else { return None };
        {
            let Callee::Expr(callee) = &call.callee else {
                return None;
            };
            let Expr::Member(member) = &**callee else {
                return None;
            };
            let Expr::Ident(obj) = &*member.obj else {
                return None;
            };
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            if obj.sym.as_ref() != self.alias {
                return None;
            }
            let rule = rule_table().static_member(prop.sym.as_ref())?;
            if rule.transform != Some(StructuralTransform::WrapIsValid) {
                return None;
            }
            self.ctx.require_plugins(rule.plugins);
        }

        self.ctx.mutated = true;
        let span = call.span;
        let args: Vec<ExprOrSpread> = call.args.drain(..).collect();
        let construction = Expr::Call(CallExpr {
            span,
            ctxt: SyntaxContext::empty(),
            callee: Callee::Expr(Box::new(Expr::Ident(ident(TARGET_LIB, span)))),
            args,
            type_args: None,
        });
        Some(Expr::Call(CallExpr {
            span,
            ctxt: SyntaxContext::empty(),
            callee: Callee::Expr(Box::new(Expr::Member(MemberExpr {
                span,
                obj: Box::new(construction),
                prop: MemberProp::Ident(prop_ident("isValid", span)),
            }))),
            args: Vec::new(),
            type_args: None,
        }))
    }

    fn rewrite_member(&mut self, member: &mut MemberExpr) {
        let span = member.span;
        let Expr::Ident(obj) = &mut *member.obj else {
            return;
        };
        if obj.sym.as_ref() != self.alias {
            return;
        }
        let MemberProp::Ident(prop) = &mut member.prop else {
            return;
        };

        match rule_table().static_member(prop.sym.as_ref()) {
            Some(rule) => {
                if let Some(to) = rule.rename {
                    prop.sym = to.into();
                }
                self.ctx.require_plugins(rule.plugins);
            }
            None => {
                // No mapping. Rebind the namespace anyway so the import can
                // go, and leave an audit trail for a human.
                self.ctx.warn(
                    DiagnosticKind::UnrecognizedPattern {
                        member: prop.sym.to_string(),
                    },
                    span,
                );
            }
        }

        obj.sym = TARGET_LIB.into();
        self.ctx.mutated = true;
    }
}

// ------------------------------------------------------------------
// Pass 2: instance members, `recv.member(...)` for any receiver.
// ------------------------------------------------------------------

struct InstancePass<'a> {
    alias: &'a str,
    ctx: &'a mut FileContext,
}

impl VisitMut for InstancePass<'_> {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if let Some(replacement) = self.rewrite_call(expr) {
            *expr = replacement;
        }
        expr.visit_mut_children_with(self);
    }
}

impl InstancePass<'_> {
    /// Returns a replacement expression when the matched rule reshapes the
    /// whole call; plain renames mutate in place and return `None`.
    fn rewrite_call(&mut self, expr: &mut Expr) -> Option<Expr> {
        let Expr::Call(call) = expr else { return None };
        let span = call.span;
        let Callee::Expr(callee) = &mut call.callee else {
            return None;
        };
        let Expr::Member(member) = &mut **callee else {
            return None;
        };
        let MemberProp::Ident(prop) = &mut member.prop else {
            return None;
        };

        let Some(rule) = rule_table().instance_member(prop.sym.as_ref()) else {
            // The source library encourages chaining, so receivers are
            // matched by name; only alias-rooted chains are worth flagging.
            if receiver_is_alias(&member.obj, self.alias) {
                let member_name = prop.sym.to_string();
                self.ctx.warn(
                    DiagnosticKind::UnrecognizedPattern {
                        member: member_name,
                    },
                    span,
                );
            }
            return None;
        };

        self.ctx.require_plugins(rule.plugins);

        match rule.transform {
            Some(StructuralTransform::GetSet { unit }) => {
                if call.args.len() == 1 {
                    // One argument is the setter overload.
                    let value = call.args.remove(0);
                    let recv =
                        std::mem::replace(&mut member.obj, Box::new(Expr::Invalid(Invalid { span })));
                    self.ctx.mutated = true;
                    return Some(set_call(recv, unit, value, span));
                }
                // Zero arguments is the getter; the plural collapses to the
                // singular unit name.
                if prop.sym.as_ref() != unit {
                    prop.sym = unit.into();
                    self.ctx.mutated = true;
                }
                None
            }
            _ => {
                if let Some(to) = rule.rename
                    && prop.sym.as_ref() != to
                {
                    prop.sym = to.into();
                    self.ctx.mutated = true;
                }
                None
            }
        }
    }
}

/// `recv.set('<unit>', value)`
fn set_call(recv: Box<Expr>, unit: &str, value: ExprOrSpread, span: Span) -> Expr {
    Expr::Call(CallExpr {
        span,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(Box::new(Expr::Member(MemberExpr {
            span,
            obj: recv,
            prop: MemberProp::Ident(prop_ident("set", span)),
        }))),
        args: vec![
            ExprOrSpread {
                spread: None,
                expr: Box::new(Expr::Lit(Lit::Str(str_lit(unit, span)))),
            },
            value,
        ],
        type_args: None,
    })
}

// ------------------------------------------------------------------
// Pass 3: bare construction, `alias(...)`.
// ------------------------------------------------------------------

struct ConstructorPass<'a> {
    alias: &'a str,
    ctx: &'a mut FileContext,
}

impl VisitMut for ConstructorPass<'_> {
    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        if let Callee::Expr(callee) = &mut call.callee
            && let Expr::Ident(id) = &mut **callee
            && id.sym.as_ref() == self.alias
        {
            id.sym = TARGET_LIB.into();
            self.ctx.mutated = true;
            if call.args.len() > 1 {
                // Day.js does not parse explicit format strings by default.
                self.ctx.require_plugins(&["customParseFormat"]);
            }
            record_constructor_locale(call, self.ctx);
        }
        call.visit_mut_children_with(self);
    }
}

// ------------------------------------------------------------------
// Pass 4: type references, `Moment` → `Dayjs`.
// ------------------------------------------------------------------

struct TypeRefPass<'a> {
    ctx: &'a mut FileContext,
}

impl VisitMut for TypeRefPass<'_> {
    fn visit_mut_ts_type_ref(&mut self, type_ref: &mut TsTypeRef) {
        // Rewritten whether or not an explicit import was seen: some
        // dialects reference ambient types without one.
        if let TsEntityName::Ident(name) = &mut type_ref.type_name
            && name.sym.as_ref() == SOURCE_TYPE
        {
            name.sym = TARGET_TYPE.into();
            self.ctx.mutated = true;
        }
        type_ref.visit_mut_children_with(self);
    }
}
