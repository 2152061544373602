//! The statement-splicing driver.
//!
//! [`Rewriter`] plugs into the generic treemap traversal: when the
//! traversal hands it a class definition (children already rewritten, so
//! nested scopes were processed independently), it offers every body
//! statement to the ordered pass list for that statement's shape:
//!
//! - assignment-shaped statements → the assignment list,
//! - call-shaped statements → the call list,
//! - definition-shaped statements → the definition list,
//! - anything else is kept as-is.
//!
//! Within a list the first pass returning a non-empty replacement wins and
//! later passes are not consulted. The new body is the flat concatenation
//! of replacement-or-original per original statement, preserving relative
//! order. Shapes are mutually exclusive across the three lists by
//! construction of the dispatch match.

use crate::context::RewriteCtx;
use crate::passes::{AttrMethods, BoolPredicate, Prop, Replacement, RewriterPass, StructNew};
use petrel_ast::treemap::{self, TreeMapPass};
use petrel_ast::{Expr, ExprKind};
use petrel_core::GlobalState;

/// Ordered pass lists per statement shape.
pub struct PassTable {
    assign: Vec<Box<dyn RewriterPass>>,
    call: Vec<Box<dyn RewriterPass>>,
    definition: Vec<Box<dyn RewriterPass>>,
}

impl PassTable {
    /// A table with no passes registered; statements pass through.
    pub fn empty() -> Self {
        PassTable {
            assign: Vec::new(),
            call: Vec::new(),
            definition: Vec::new(),
        }
    }

    /// The built-in passes in their fixed priority order.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.register_assign(Box::new(StructNew));
        table.register_call(Box::new(Prop));
        table.register_call(Box::new(AttrMethods));
        table.register_definition(Box::new(BoolPredicate));
        table
    }

    /// Append a pass to the assignment-shaped list.
    pub fn register_assign(&mut self, pass: Box<dyn RewriterPass>) {
        self.assign.push(pass);
    }

    /// Append a pass to the call-shaped list.
    pub fn register_call(&mut self, pass: Box<dyn RewriterPass>) {
        self.call.push(pass);
    }

    /// Append a pass to the definition-shaped list.
    pub fn register_definition(&mut self, pass: Box<dyn RewriterPass>) {
        self.definition.push(pass);
    }

    fn passes_for(&self, stat: &Expr) -> Option<&[Box<dyn RewriterPass>]> {
        match stat.kind {
            ExprKind::Assign { .. } => Some(&self.assign),
            ExprKind::Send { .. } => Some(&self.call),
            ExprKind::MethodDef { .. } => Some(&self.definition),
            _ => None,
        }
    }

    /// Offer one statement to its shape's list, first match wins.
    fn dispatch(&self, ctx: &RewriteCtx<'_>, stat: &Expr, prev: Option<&Expr>) -> Replacement {
        let Some(passes) = self.passes_for(stat) else {
            return Replacement::new();
        };
        for pass in passes {
            let out = pass.replace(ctx, stat, prev);
            if !out.is_empty() {
                tracing::debug!(
                    pass = pass.name(),
                    loc = ?stat.loc,
                    replacements = out.len(),
                    "rewrote class-body statement"
                );
                return out;
            }
        }
        Replacement::new()
    }
}

impl Default for PassTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Treemap handler that splices class bodies through a [`PassTable`].
pub struct Rewriter {
    table: PassTable,
}

impl Rewriter {
    pub fn new(table: PassTable) -> Self {
        Rewriter { table }
    }
}

impl TreeMapPass for Rewriter {
    fn post_transform_class_def(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        let Expr { loc, kind } = expr;
        match kind {
            ExprKind::ClassDef {
                decl_loc,
                kind,
                symbol,
                name,
                ancestors,
                rhs,
            } => {
                let ctx = RewriteCtx::new(gs);

                // First collect replacements against the original body, so
                // every pass sees original statements as context.
                let mut replacements: Vec<Replacement> = Vec::with_capacity(rhs.len());
                let mut prev: Option<&Expr> = None;
                for stat in &rhs {
                    replacements.push(self.table.dispatch(&ctx, stat, prev));
                    prev = Some(stat);
                }

                // Then splice: replacement-or-original per position.
                let mut new_rhs = Vec::with_capacity(rhs.len());
                for (stat, replacement) in rhs.into_iter().zip(replacements) {
                    if replacement.is_empty() {
                        new_rhs.push(stat);
                    } else {
                        new_rhs.extend(replacement);
                    }
                }

                Expr::new(
                    loc,
                    ExprKind::ClassDef {
                        decl_loc,
                        kind,
                        symbol,
                        name,
                        ancestors,
                        rhs: new_rhs,
                    },
                )
            }
            other => Expr::new(loc, other),
        }
    }
}

/// Run the built-in desugaring passes over a tree.
pub fn run(gs: &GlobalState, tree: Expr) -> Expr {
    run_with(gs, PassTable::builtin(), tree)
}

/// Run a specific pass table over a tree.
pub fn run_with(gs: &GlobalState, table: PassTable, tree: Expr) -> Expr {
    let mut rewriter = Rewriter::new(table);
    treemap::apply(gs, &mut rewriter, tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::Replacement;
    use petrel_ast::{ClassDefKind, MethodFlags, TreeBuilder, VarKind};
    use petrel_core::{FileId, GlobalState, Loc, NullSink};
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn class_with(gs: &GlobalState, stats: Vec<Expr>) -> Expr {
        let b = TreeBuilder::new(&NullSink);
        let name = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Widget"));
        b.class_def(Loc::NONE, Loc::NONE, ClassDefKind::Class, name, vec![], stats)
    }

    fn body_of(expr: &Expr) -> &[Expr] {
        match &expr.kind {
            ExprKind::ClassDef { rhs, .. } => rhs,
            other => panic!("expected ClassDef, got {other:?}"),
        }
    }

    fn prop_stat(gs: &GlobalState, loc: Loc, name: &str) -> Expr {
        let b = TreeBuilder::new(&NullSink);
        let hash = b.hash(
            loc,
            vec![b.sym(loc, gs.intern("type"))],
            vec![b.unresolved_constant(loc, b.empty_tree(), gs.intern("String"))],
        );
        let recv = b.self_ref(loc);
        b.send(
            loc,
            recv,
            gs.intern("prop"),
            vec![b.sym(loc, gs.intern(name)), hash],
            None,
        )
    }

    #[test]
    fn test_prop_becomes_reader_then_writer() {
        let gs = GlobalState::new();
        let loc = Loc::new(FileId::new(0), 10, 34);
        let tree = class_with(&gs, vec![prop_stat(&gs, loc, "title")]);

        let rewritten = run(&gs, tree);
        let body = body_of(&rewritten);
        assert_eq!(body.len(), 2);

        let ExprKind::MethodDef { name, flags, .. } = &body[0].kind else {
            panic!("expected reader MethodDef, got {:?}", body[0].kind);
        };
        assert_eq!(gs.show_name(*name), "title");
        assert!(flags.contains(MethodFlags::SYNTHESIZED));
        assert_eq!(body[0].loc, loc);

        let ExprKind::MethodDef { name, .. } = &body[1].kind else {
            panic!("expected writer MethodDef, got {:?}", body[1].kind);
        };
        assert_eq!(gs.show_name(*name), "title=");
        assert_eq!(body[1].loc, loc);
    }

    #[test]
    fn test_unrecognized_statements_untouched() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);
        let other_call = b.self_send(Loc::NONE, gs.intern("include"), vec![]);
        let literal = b.int(Loc::NONE, 7);
        let tree = class_with(&gs, vec![other_call.clone(), literal.clone()]);

        let rewritten = run(&gs, tree);
        let body = body_of(&rewritten);
        assert_eq!(body.len(), 2);
        assert_eq!(body[0], other_call);
        assert_eq!(body[1], literal);
    }

    #[test]
    fn test_splice_changes_count_by_replacements_minus_one() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);
        let before = b.int(Loc::NONE, 0);
        let after = b.int(Loc::NONE, 1);
        let accessor = b.self_send(
            Loc::NONE,
            gs.intern("attr_accessor"),
            vec![b.sym(Loc::NONE, gs.intern("name"))],
        );
        let tree = class_with(
            &gs,
            vec![before, prop_stat(&gs, Loc::NONE, "title"), accessor, after],
        );

        let rewritten = run(&gs, tree);
        let body = body_of(&rewritten);
        // 1 kept + 2 (prop) + 2 (accessor) + 1 kept.
        assert_eq!(body.len(), 6);
        // Relative order of the untouched statements is preserved.
        assert_eq!(body[0].show(&gs), "0");
        assert_eq!(body[5].show(&gs), "1");
    }

    /// Pass that rewrites any call-shaped statement into one marker
    /// literal, for dispatch-order tests.
    struct Marker(i64);

    impl RewriterPass for Marker {
        fn name(&self) -> &'static str {
            "Marker"
        }

        fn replace(
            &self,
            ctx: &RewriteCtx<'_>,
            stat: &Expr,
            _prev: Option<&Expr>,
        ) -> Replacement {
            let b = ctx.builder();
            smallvec![b.int(stat.loc, self.0)]
        }
    }

    #[test]
    fn test_first_matching_pass_wins() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);
        let stat = b.self_send(Loc::NONE, gs.intern("anything"), vec![]);

        let mut table = PassTable::empty();
        table.register_call(Box::new(Marker(111)));
        table.register_call(Box::new(Marker(222)));
        let rewritten = run_with(&gs, table, class_with(&gs, vec![stat.clone()]));
        assert_eq!(body_of(&rewritten)[0].show(&gs), "111");

        // Registration order decides, not anything about the passes.
        let mut table = PassTable::empty();
        table.register_call(Box::new(Marker(222)));
        table.register_call(Box::new(Marker(111)));
        let rewritten = run_with(&gs, table, class_with(&gs, vec![stat]));
        assert_eq!(body_of(&rewritten)[0].show(&gs), "222");
    }

    #[test]
    fn test_declining_pass_falls_through_to_next() {
        struct Decline;
        impl RewriterPass for Decline {
            fn name(&self) -> &'static str {
                "Decline"
            }
            fn replace(
                &self,
                _ctx: &RewriteCtx<'_>,
                _stat: &Expr,
                _prev: Option<&Expr>,
            ) -> Replacement {
                Replacement::new()
            }
        }

        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);
        let stat = b.self_send(Loc::NONE, gs.intern("anything"), vec![]);

        let mut table = PassTable::empty();
        table.register_call(Box::new(Decline));
        table.register_call(Box::new(Marker(7)));
        let rewritten = run_with(&gs, table, class_with(&gs, vec![stat]));
        assert_eq!(body_of(&rewritten)[0].show(&gs), "7");
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);
        let accessor = b.self_send(
            Loc::NONE,
            gs.intern("attr_accessor"),
            vec![
                b.sym(Loc::NONE, gs.intern("a")),
                b.sym(Loc::NONE, gs.intern("b")),
            ],
        );
        let tree = class_with(&gs, vec![prop_stat(&gs, Loc::NONE, "title"), accessor]);

        let first = run(&gs, tree.clone());
        let second = run(&gs, tree);
        assert_eq!(first.show_raw(&gs), second.show_raw(&gs));
        assert_eq!(first.show(&gs), second.show(&gs));
    }

    #[test]
    fn test_nested_class_bodies_processed_independently() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);
        let inner = {
            let name = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Inner"));
            b.class_def(
                Loc::NONE,
                Loc::NONE,
                ClassDefKind::Class,
                name,
                vec![],
                vec![prop_stat(&gs, Loc::NONE, "inner_title")],
            )
        };
        let tree = class_with(&gs, vec![inner, prop_stat(&gs, Loc::NONE, "outer_title")]);

        let rewritten = run(&gs, tree);
        let body = body_of(&rewritten);
        // Inner class kept as one statement, outer prop split into two.
        assert_eq!(body.len(), 3);
        assert_eq!(body_of(&body[0]).len(), 2);
    }

    #[test]
    fn test_sig_context_fuses_into_attr_rewrite() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);
        let sig = {
            let blk = b.block(Loc::NONE, vec![], b.empty_tree());
            b.send(
                Loc::NONE,
                b.self_ref(Loc::NONE),
                gs.intern("sig"),
                vec![],
                Some(blk),
            )
        };
        let accessor = b.self_send(
            Loc::NONE,
            gs.intern("attr_accessor"),
            vec![b.sym(Loc::NONE, gs.intern("title"))],
        );
        let tree = class_with(&gs, vec![sig.clone(), accessor]);

        let rewritten = run(&gs, tree);
        let body = body_of(&rewritten);
        // Original sig, reader, copied sig, writer.
        assert_eq!(body.len(), 4);
        assert_eq!(body[0], sig);
        assert_eq!(body[2], sig);
        assert!(matches!(body[1].kind, ExprKind::MethodDef { .. }));
        assert!(matches!(body[3].kind, ExprKind::MethodDef { .. }));
    }

    #[test]
    fn test_assign_and_definition_families_dispatch() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);

        let struct_assign = {
            let lhs = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Point"));
            let struct_const =
                b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Struct"));
            let rhs = b.send(
                Loc::NONE,
                struct_const,
                gs.intern("new"),
                vec![b.sym(Loc::NONE, gs.intern("x"))],
                None,
            );
            b.assign(Loc::NONE, lhs, rhs)
        };
        let predicate = {
            let body = b.unresolved_ident(Loc::NONE, VarKind::Instance, gs.intern("@admin"));
            b.method_def(
                Loc::NONE,
                Loc::NONE,
                gs.intern("admin?"),
                vec![],
                body,
                MethodFlags::empty(),
            )
        };
        let tree = class_with(&gs, vec![struct_assign, predicate]);

        let rewritten = run(&gs, tree);
        let body = body_of(&rewritten);
        assert_eq!(body.len(), 2);
        assert!(matches!(body[0].kind, ExprKind::ClassDef { .. }));
        let ExprKind::MethodDef { rhs, .. } = &body[1].kind else {
            panic!("expected MethodDef, got {:?}", body[1].kind);
        };
        assert!(matches!(rhs.kind, ExprKind::Send { .. }));
    }

    #[test]
    fn test_rewritten_trees_stay_structurally_valid() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);
        let accessor = b.self_send(
            Loc::NONE,
            gs.intern("attr_accessor"),
            vec![b.sym(Loc::NONE, gs.intern("name"))],
        );
        let struct_assign = {
            let lhs = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Pair"));
            let struct_const =
                b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Struct"));
            let rhs = b.send(
                Loc::NONE,
                struct_const,
                gs.intern("new"),
                vec![
                    b.sym(Loc::NONE, gs.intern("left")),
                    b.sym(Loc::NONE, gs.intern("right")),
                ],
                None,
            );
            b.assign(Loc::NONE, lhs, rhs)
        };
        let tree = class_with(
            &gs,
            vec![prop_stat(&gs, Loc::NONE, "title"), accessor, struct_assign],
        );

        let rewritten = run(&gs, tree);
        assert_eq!(petrel_ast::validate::tree(&rewritten), Ok(()));
    }
}
