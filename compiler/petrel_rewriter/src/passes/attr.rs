//! `attr_reader` / `attr_writer` / `attr_accessor`.
//!
//! Each symbol argument becomes an explicit reader and/or writer
//! definition. When the statement immediately before the attr call is a
//! `sig` declaration, that signature belongs to the first generated
//! definition; a copy of it is spliced in front of every later generated
//! definition so each one keeps a signature. The original `sig` statement
//! stays in the body untouched.

use super::{Replacement, RewriterPass};
use crate::RewriteCtx;
use petrel_ast::{Expr, ExprKind, MethodFlags, VarKind};
use petrel_core::NameRef;

pub struct AttrMethods;

impl AttrMethods {
    /// A `sig { ... }` declaration: a block-bearing send of `sig`.
    fn is_sig(ctx: &RewriteCtx<'_>, stat: &Expr) -> bool {
        matches!(
            &stat.kind,
            ExprKind::Send { fun, block, .. } if *fun == ctx.known().sig && block.is_some()
        )
    }

    fn reader(ctx: &RewriteCtx<'_>, stat: &Expr, name: NameRef, ivar: NameRef) -> Expr {
        let b = ctx.builder();
        let body = b.unresolved_ident(stat.loc, VarKind::Instance, ivar);
        b.method_def(
            stat.loc,
            stat.loc,
            name,
            vec![],
            body,
            MethodFlags::SYNTHESIZED,
        )
    }

    fn writer(ctx: &RewriteCtx<'_>, stat: &Expr, name: NameRef, ivar: NameRef) -> Expr {
        let b = ctx.builder();
        let base = ctx.gs().show_name(name);
        let setter = ctx.intern(&format!("{base}="));
        let arg = b.unresolved_ident(stat.loc, VarKind::Local, name);
        let body = b.assign(
            stat.loc,
            b.unresolved_ident(stat.loc, VarKind::Instance, ivar),
            b.unresolved_ident(stat.loc, VarKind::Local, name),
        );
        b.method_def(
            stat.loc,
            stat.loc,
            setter,
            vec![arg],
            body,
            MethodFlags::SYNTHESIZED,
        )
    }
}

impl RewriterPass for AttrMethods {
    fn name(&self) -> &'static str {
        "AttrMethods"
    }

    fn replace(&self, ctx: &RewriteCtx<'_>, stat: &Expr, prev: Option<&Expr>) -> Replacement {
        let ExprKind::Send {
            recv,
            fun,
            args,
            block,
        } = &stat.kind
        else {
            return Replacement::new();
        };
        let known = ctx.known();
        let (make_reader, make_writer) = if *fun == known.attr_reader {
            (true, false)
        } else if *fun == known.attr_writer {
            (false, true)
        } else if *fun == known.attr_accessor {
            (true, true)
        } else {
            return Replacement::new();
        };
        if block.is_some() || args.is_empty() {
            return Replacement::new();
        }
        if !recv.is_empty_tree() && !matches!(recv.kind, ExprKind::SelfRef { .. }) {
            return Replacement::new();
        }

        // Every argument must be a symbol literal, or the whole statement
        // is left alone.
        let mut names = Vec::with_capacity(args.len());
        for arg in args {
            let ExprKind::Literal(value) = &arg.kind else {
                return Replacement::new();
            };
            let Some(name) = value.as_symbol() else {
                return Replacement::new();
            };
            names.push(name);
        }

        // Read-only lookahead: a preceding sig fuses with the generated
        // definitions. The driver keeps the original in place.
        let sig = prev.filter(|p| Self::is_sig(ctx, p));

        let mut out = Replacement::new();
        for name in names {
            let base = ctx.gs().show_name(name);
            let ivar = ctx.intern(&format!("@{base}"));
            if make_reader {
                if !out.is_empty() {
                    if let Some(sig) = sig {
                        out.push(sig.clone());
                    }
                }
                out.push(Self::reader(ctx, stat, name, ivar));
            }
            if make_writer {
                if !out.is_empty() {
                    if let Some(sig) = sig {
                        out.push(sig.clone());
                    }
                }
                out.push(Self::writer(ctx, stat, name, ivar));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petrel_ast::TreeBuilder;
    use petrel_core::{GlobalState, Loc, NullSink};

    fn attr_call(gs: &GlobalState, fun: &str, names: &[&str]) -> Expr {
        let b = TreeBuilder::new(&NullSink);
        let args = names
            .iter()
            .map(|n| b.sym(Loc::NONE, gs.intern(n)))
            .collect();
        b.self_send(Loc::NONE, gs.intern(fun), args)
    }

    fn sig_stat(gs: &GlobalState) -> Expr {
        let b = TreeBuilder::new(&NullSink);
        let blk = b.block(Loc::NONE, vec![], b.empty_tree());
        b.send(
            Loc::NONE,
            b.self_ref(Loc::NONE),
            gs.intern("sig"),
            vec![],
            Some(blk),
        )
    }

    fn def_names(gs: &GlobalState, out: &Replacement) -> Vec<String> {
        out.iter()
            .filter_map(|stat| match &stat.kind {
                ExprKind::MethodDef { name, .. } => Some(gs.show_name(*name).to_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_accessor_generates_reader_then_writer() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let stat = attr_call(&gs, "attr_accessor", &["title"]);
        let out = AttrMethods.replace(&ctx, &stat, None);
        assert_eq!(out.len(), 2);
        assert_eq!(def_names(&gs, &out), vec!["title", "title="]);
    }

    #[test]
    fn test_reader_per_symbol_in_order() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let stat = attr_call(&gs, "attr_reader", &["a", "b"]);
        let out = AttrMethods.replace(&ctx, &stat, None);
        assert_eq!(def_names(&gs, &out), vec!["a", "b"]);
    }

    #[test]
    fn test_preceding_sig_copied_between_defs() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let sig = sig_stat(&gs);
        let stat = attr_call(&gs, "attr_accessor", &["title"]);
        let out = AttrMethods.replace(&ctx, &stat, Some(&sig));
        // reader, copied sig, writer; the original sig stays in the body.
        assert_eq!(out.len(), 3);
        assert!(matches!(out[0].kind, ExprKind::MethodDef { .. }));
        assert_eq!(out[1], sig);
        assert!(matches!(out[2].kind, ExprKind::MethodDef { .. }));
    }

    #[test]
    fn test_non_sig_prev_is_ignored() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let b = TreeBuilder::new(&NullSink);
        let prev = b.int(Loc::NONE, 1);
        let stat = attr_call(&gs, "attr_accessor", &["title"]);
        let out = AttrMethods.replace(&ctx, &stat, Some(&prev));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_declines_non_symbol_argument() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let b = TreeBuilder::new(&NullSink);
        let stat = b.self_send(
            Loc::NONE,
            gs.intern("attr_reader"),
            vec![
                b.sym(Loc::NONE, gs.intern("ok")),
                b.str_(Loc::NONE, gs.intern("not_a_symbol")),
            ],
        );
        assert!(AttrMethods.replace(&ctx, &stat, None).is_empty());
    }

    #[test]
    fn test_declines_empty_argument_list() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let stat = attr_call(&gs, "attr_writer", &[]);
        assert!(AttrMethods.replace(&ctx, &stat, None).is_empty());
    }
}
