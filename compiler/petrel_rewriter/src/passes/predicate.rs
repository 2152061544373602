//! Predicate methods over bare instance variables.
//!
//! A zero-parameter method named `foo?` whose whole body is `@foo` is a
//! common truthiness predicate. Inference would type it as whatever `@foo`
//! holds; wrapping the body in double negation makes the boolean intent
//! explicit:
//!
//! ```text
//! def admin?
//!   @admin
//! end
//! ```
//!
//! becomes `def admin?; @admin.!.!; end`. Any other body shape or arity is
//! left alone.

use super::{Replacement, RewriterPass};
use crate::RewriteCtx;
use petrel_ast::{Expr, ExprKind, VarKind};
use smallvec::smallvec;

pub struct BoolPredicate;

impl RewriterPass for BoolPredicate {
    fn name(&self) -> &'static str {
        "BoolPredicate"
    }

    fn replace(&self, ctx: &RewriteCtx<'_>, stat: &Expr, _prev: Option<&Expr>) -> Replacement {
        let ExprKind::MethodDef {
            decl_loc,
            name,
            args,
            rhs,
            flags,
            ..
        } = &stat.kind
        else {
            return Replacement::new();
        };
        if !args.is_empty() {
            return Replacement::new();
        }
        if !ctx.gs().show_name(*name).ends_with('?') {
            return Replacement::new();
        }
        let ExprKind::UnresolvedIdent {
            kind: VarKind::Instance,
            name: ivar,
        } = &rhs.kind
        else {
            return Replacement::new();
        };

        let b = ctx.builder();
        let bang = ctx.known().bang;
        let loc = stat.loc;

        let ivar_read = b.unresolved_ident(rhs.loc, VarKind::Instance, *ivar);
        let negated = b.send(loc, ivar_read, bang, vec![], None);
        let coerced = b.send(loc, negated, bang, vec![], None);
        let def = b.method_def(loc, *decl_loc, *name, vec![], coerced, *flags);
        smallvec![def]
    }
}
