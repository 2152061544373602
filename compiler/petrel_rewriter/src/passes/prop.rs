//! `prop` declarations.
//!
//! Rewrites a declarative property call
//!
//! ```text
//! prop :title, type: String
//! ```
//!
//! into an explicit reader and writer pair:
//!
//! ```text
//! def title
//!   @title
//! end
//! def title=(title)
//!   @title = title
//! end
//! ```
//!
//! Both synthesized definitions carry the source location of the original
//! call so downstream diagnostics point at the `prop` line.

use super::{Replacement, RewriterPass};
use crate::RewriteCtx;
use petrel_ast::{Expr, ExprKind, MethodFlags, VarKind};
use smallvec::smallvec;

pub struct Prop;

impl Prop {
    /// The keyword hash must carry a `type:` entry for the declaration to
    /// mean anything to inference.
    fn has_type_key(ctx: &RewriteCtx<'_>, arg: &Expr) -> bool {
        let ExprKind::Hash { keys, .. } = &arg.kind else {
            return false;
        };
        keys.iter().any(|key| {
            matches!(
                &key.kind,
                ExprKind::Literal(value) if value.as_symbol() == Some(ctx.known().type_key)
            )
        })
    }
}

impl RewriterPass for Prop {
    fn name(&self) -> &'static str {
        "Prop"
    }

    fn replace(&self, ctx: &RewriteCtx<'_>, stat: &Expr, _prev: Option<&Expr>) -> Replacement {
        let ExprKind::Send {
            recv,
            fun,
            args,
            block,
        } = &stat.kind
        else {
            return Replacement::new();
        };
        if *fun != ctx.known().prop || block.is_some() {
            return Replacement::new();
        }
        if !recv.is_empty_tree() && !matches!(recv.kind, ExprKind::SelfRef { .. }) {
            return Replacement::new();
        }
        // Exactly `prop :name, type: ...`; anything else is a shape this
        // rule cannot safely rewrite.
        if args.len() != 2 {
            return Replacement::new();
        }
        let ExprKind::Literal(first) = &args[0].kind else {
            return Replacement::new();
        };
        let Some(prop_name) = first.as_symbol() else {
            return Replacement::new();
        };
        if !Self::has_type_key(ctx, &args[1]) {
            return Replacement::new();
        }

        let gs = ctx.gs();
        let b = ctx.builder();
        let loc = stat.loc;

        let base = gs.show_name(prop_name);
        let ivar_name = ctx.intern(&format!("@{base}"));
        let setter_name = ctx.intern(&format!("{base}="));

        let reader_body = b.unresolved_ident(loc, VarKind::Instance, ivar_name);
        let reader = b.method_def(
            loc,
            loc,
            prop_name,
            vec![],
            reader_body,
            MethodFlags::SYNTHESIZED,
        );

        let writer_arg = b.unresolved_ident(loc, VarKind::Local, prop_name);
        let writer_body = b.assign(
            loc,
            b.unresolved_ident(loc, VarKind::Instance, ivar_name),
            b.unresolved_ident(loc, VarKind::Local, prop_name),
        );
        let writer = b.method_def(
            loc,
            loc,
            setter_name,
            vec![writer_arg],
            writer_body,
            MethodFlags::SYNTHESIZED,
        );

        smallvec![reader, writer]
    }
}
