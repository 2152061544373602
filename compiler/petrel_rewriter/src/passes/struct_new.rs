//! `Name = Struct.new(:field, ...)`.
//!
//! A constant assignment whose right-hand side is a `Struct.new` call over
//! symbol literals declares a record class. The assignment is replaced by
//! an explicit class definition so later stages see ordinary methods:
//!
//! ```text
//! Point = Struct.new(:x, :y)
//! ```
//!
//! becomes
//!
//! ```text
//! class Point < Struct
//!   def initialize(x = nil, y = nil); end
//!   def x; @x; end
//!   def x=(x); @x = x; end
//!   def y; @y; end
//!   def y=(y); @y = y; end
//! end
//! ```
//!
//! `Struct.new` with a block defines arbitrary extra methods this rule
//! cannot see through, so it declines.

use super::{Replacement, RewriterPass};
use crate::RewriteCtx;
use petrel_ast::{ClassDefKind, Expr, ExprKind, MethodFlags, VarKind};
use smallvec::smallvec;

pub struct StructNew;

impl RewriterPass for StructNew {
    fn name(&self) -> &'static str {
        "StructNew"
    }

    fn replace(&self, ctx: &RewriteCtx<'_>, stat: &Expr, _prev: Option<&Expr>) -> Replacement {
        let ExprKind::Assign { lhs, rhs } = &stat.kind else {
            return Replacement::new();
        };
        if !matches!(lhs.kind, ExprKind::UnresolvedConstantLit { .. }) {
            return Replacement::new();
        }
        let ExprKind::Send {
            recv,
            fun,
            args,
            block,
        } = &rhs.kind
        else {
            return Replacement::new();
        };
        let known = ctx.known();
        if *fun != known.new_fn || block.is_some() || args.is_empty() {
            return Replacement::new();
        }
        if !matches!(
            &recv.kind,
            ExprKind::UnresolvedConstantLit { cnst, .. } if *cnst == known.struct_const
        ) {
            return Replacement::new();
        }

        let mut fields = Vec::with_capacity(args.len());
        for arg in args {
            let ExprKind::Literal(value) = &arg.kind else {
                return Replacement::new();
            };
            let Some(field) = value.as_symbol() else {
                return Replacement::new();
            };
            fields.push(field);
        }

        let gs = ctx.gs();
        let b = ctx.builder();
        let loc = stat.loc;

        let mut body = Vec::with_capacity(fields.len() * 2 + 1);

        let init_args = fields
            .iter()
            .map(|&field| {
                let ident = b.unresolved_ident(loc, VarKind::Local, field);
                b.optional_arg(loc, ident, b.nil(loc))
            })
            .collect();
        body.push(b.method_def(
            loc,
            loc,
            known.initialize,
            init_args,
            b.empty_tree(),
            MethodFlags::SYNTHESIZED,
        ));

        for &field in &fields {
            let base = gs.show_name(field);
            let ivar = ctx.intern(&format!("@{base}"));
            let setter = ctx.intern(&format!("{base}="));

            let reader_body = b.unresolved_ident(loc, VarKind::Instance, ivar);
            body.push(b.method_def(
                loc,
                loc,
                field,
                vec![],
                reader_body,
                MethodFlags::SYNTHESIZED,
            ));

            let writer_arg = b.unresolved_ident(loc, VarKind::Local, field);
            let writer_body = b.assign(
                loc,
                b.unresolved_ident(loc, VarKind::Instance, ivar),
                b.unresolved_ident(loc, VarKind::Local, field),
            );
            body.push(b.method_def(
                loc,
                loc,
                setter,
                vec![writer_arg],
                writer_body,
                MethodFlags::SYNTHESIZED,
            ));
        }

        let class = b.class_def(
            loc,
            loc,
            ClassDefKind::Class,
            (**lhs).clone(),
            vec![(**recv).clone()],
            body,
        );
        smallvec![class]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petrel_ast::TreeBuilder;
    use petrel_core::{GlobalState, Loc, NullSink};

    fn struct_assign(gs: &GlobalState, fields: &[&str], block: bool) -> Expr {
        let b = TreeBuilder::new(&NullSink);
        let lhs = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Point"));
        let struct_const = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Struct"));
        let args = fields
            .iter()
            .map(|f| b.sym(Loc::NONE, gs.intern(f)))
            .collect();
        let blk = block.then(|| b.block(Loc::NONE, vec![], b.empty_tree()));
        let rhs = b.send(Loc::NONE, struct_const, gs.intern("new"), args, blk);
        b.assign(Loc::NONE, lhs, rhs)
    }

    #[test]
    fn test_rewrites_to_class_def() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let stat = struct_assign(&gs, &["x", "y"], false);
        let out = StructNew.replace(&ctx, &stat, None);
        assert_eq!(out.len(), 1);

        let ExprKind::ClassDef {
            kind,
            ancestors,
            rhs,
            ..
        } = &out[0].kind
        else {
            panic!("expected ClassDef, got {:?}", out[0].kind);
        };
        assert_eq!(*kind, ClassDefKind::Class);
        assert_eq!(ancestors.len(), 1);
        // initialize plus reader+writer per field.
        assert_eq!(rhs.len(), 5);
        let ExprKind::MethodDef { name, args, .. } = &rhs[0].kind else {
            panic!("expected initialize, got {:?}", rhs[0].kind);
        };
        assert_eq!(gs.show_name(*name), "initialize");
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0].kind, ExprKind::OptionalArg { .. }));
    }

    #[test]
    fn test_declines_block_bodied_struct() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let stat = struct_assign(&gs, &["x"], true);
        assert!(StructNew.replace(&ctx, &stat, None).is_empty());
    }

    #[test]
    fn test_declines_non_constant_lhs() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let b = TreeBuilder::new(&NullSink);
        let lhs = b.unresolved_ident(Loc::NONE, VarKind::Local, gs.intern("point"));
        let struct_const = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Struct"));
        let rhs = b.send(
            Loc::NONE,
            struct_const,
            gs.intern("new"),
            vec![b.sym(Loc::NONE, gs.intern("x"))],
            None,
        );
        let stat = b.assign(Loc::NONE, lhs, rhs);
        assert!(StructNew.replace(&ctx, &stat, None).is_empty());
    }

    #[test]
    fn test_declines_non_symbol_field() {
        let gs = GlobalState::new();
        let ctx = RewriteCtx::new(&gs);
        let b = TreeBuilder::new(&NullSink);
        let lhs = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Point"));
        let struct_const = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Struct"));
        let rhs = b.send(
            Loc::NONE,
            struct_const,
            gs.intern("new"),
            vec![b.int(Loc::NONE, 3)],
            None,
        );
        let stat = b.assign(Loc::NONE, lhs, rhs);
        assert!(StructNew.replace(&ctx, &stat, None).is_empty());
    }
}
