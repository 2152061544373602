//! Node construction.
//!
//! All tree construction, by the parser glue and by rewrite passes,
//! goes through a [`TreeBuilder`], which records construction counters and
//! size histograms on its injected metrics sink and enforces each node's
//! structural invariants. A failed invariant here is a bug in the caller
//! and aborts the process.
//!
//! Declarations are created with [`SymbolRef::TODO`]; resolution fills in
//! real symbols later.

use crate::tree::{ClassDefKind, Expr, ExprKind, LiteralValue, MethodFlags, VarKind};
use crate::validate;
use petrel_core::{fatal, Loc, LocalVar, MetricsSink, NameRef, SymbolRef};

/// Constructs tree nodes, reporting metrics to an injected sink.
pub struct TreeBuilder<'a> {
    sink: &'a dyn MetricsSink,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(sink: &'a dyn MetricsSink) -> Self {
        TreeBuilder { sink }
    }

    fn node(&self, loc: Loc, kind: ExprKind) -> Expr {
        let expr = Expr::new(loc, kind);
        if let Err(err) = validate::node(&expr) {
            fatal::raise(&err.to_string(), file!(), line!());
        }
        expr
    }

    pub fn class_def(
        &self,
        loc: Loc,
        decl_loc: Loc,
        kind: ClassDefKind,
        name: Expr,
        ancestors: Vec<Expr>,
        rhs: Vec<Expr>,
    ) -> Expr {
        self.sink.counter_inc("trees", "classdef");
        self.sink.histogram_inc("trees.classdef.ancestors", ancestors.len());
        self.node(
            loc,
            ExprKind::ClassDef {
                decl_loc,
                kind,
                symbol: SymbolRef::TODO,
                name: Box::new(name),
                ancestors,
                rhs,
            },
        )
    }

    pub fn method_def(
        &self,
        loc: Loc,
        decl_loc: Loc,
        name: NameRef,
        args: Vec<Expr>,
        rhs: Expr,
        flags: MethodFlags,
    ) -> Expr {
        self.sink.counter_inc("trees", "methoddef");
        self.sink.histogram_inc("trees.methoddef.args", args.len());
        self.node(
            loc,
            ExprKind::MethodDef {
                decl_loc,
                symbol: SymbolRef::TODO,
                name,
                args,
                rhs: Box::new(rhs),
                flags,
            },
        )
    }

    pub fn if_(&self, loc: Loc, cond: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
        self.sink.counter_inc("trees", "if");
        self.node(
            loc,
            ExprKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
        )
    }

    pub fn while_(&self, loc: Loc, cond: Expr, body: Expr) -> Expr {
        self.sink.counter_inc("trees", "while");
        self.node(
            loc,
            ExprKind::While {
                cond: Box::new(cond),
                body: Box::new(body),
            },
        )
    }

    pub fn break_(&self, loc: Loc, expr: Expr) -> Expr {
        self.sink.counter_inc("trees", "break");
        self.node(loc, ExprKind::Break { expr: Box::new(expr) })
    }

    pub fn next_(&self, loc: Loc, expr: Expr) -> Expr {
        self.sink.counter_inc("trees", "next");
        self.node(loc, ExprKind::Next { expr: Box::new(expr) })
    }

    pub fn return_(&self, loc: Loc, expr: Expr) -> Expr {
        self.sink.counter_inc("trees", "return");
        self.node(loc, ExprKind::Return { expr: Box::new(expr) })
    }

    pub fn retry(&self, loc: Loc) -> Expr {
        self.sink.counter_inc("trees", "retry");
        self.node(loc, ExprKind::Retry)
    }

    pub fn rescue(
        &self,
        loc: Loc,
        body: Expr,
        rescue_cases: Vec<Expr>,
        else_branch: Expr,
        ensure: Expr,
    ) -> Expr {
        self.sink.counter_inc("trees", "rescue");
        self.sink.histogram_inc("trees.rescue.rescuecases", rescue_cases.len());
        self.node(
            loc,
            ExprKind::Rescue {
                body: Box::new(body),
                rescue_cases,
                else_branch: Box::new(else_branch),
                ensure: Box::new(ensure),
            },
        )
    }

    pub fn rescue_case(&self, loc: Loc, exceptions: Vec<Expr>, var: Expr, body: Expr) -> Expr {
        self.sink.counter_inc("trees", "rescuecase");
        self.sink.histogram_inc("trees.rescuecase.exceptions", exceptions.len());
        self.node(
            loc,
            ExprKind::RescueCase {
                exceptions,
                var: Box::new(var),
                body: Box::new(body),
            },
        )
    }

    pub fn assign(&self, loc: Loc, lhs: Expr, rhs: Expr) -> Expr {
        self.sink.counter_inc("trees", "assign");
        self.node(
            loc,
            ExprKind::Assign {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
        )
    }

    pub fn send(
        &self,
        loc: Loc,
        recv: Expr,
        fun: NameRef,
        args: Vec<Expr>,
        block: Option<Expr>,
    ) -> Expr {
        self.sink.counter_inc("trees", "send");
        if block.is_some() {
            self.sink.counter_inc("trees", "send.with_block");
        }
        self.sink.histogram_inc("trees.send.args", args.len());
        self.node(
            loc,
            ExprKind::Send {
                recv: Box::new(recv),
                fun,
                args,
                block: block.map(Box::new),
            },
        )
    }

    /// A call on the implicit receiver, as idiomatic class-body macros are
    /// parsed.
    pub fn self_send(&self, loc: Loc, fun: NameRef, args: Vec<Expr>) -> Expr {
        let recv = self.self_ref(loc);
        self.send(loc, recv, fun, args, None)
    }

    pub fn yield_(&self, loc: Loc, args: Vec<Expr>) -> Expr {
        self.sink.counter_inc("trees", "yield");
        self.node(loc, ExprKind::Yield { args })
    }

    pub fn zsuper_args(&self, loc: Loc) -> Expr {
        self.sink.counter_inc("trees", "zsuper");
        self.node(loc, ExprKind::ZSuperArgs)
    }

    pub fn self_ref(&self, loc: Loc) -> Expr {
        self.sink.counter_inc("trees", "self");
        self.node(
            loc,
            ExprKind::SelfRef {
                claz: SymbolRef::TODO,
            },
        )
    }

    pub fn cast(&self, loc: Loc, cast: NameRef, ty: Expr, arg: Expr) -> Expr {
        self.sink.counter_inc("trees", "cast");
        self.node(
            loc,
            ExprKind::Cast {
                cast,
                ty: Box::new(ty),
                arg: Box::new(arg),
            },
        )
    }

    pub fn hash(&self, loc: Loc, keys: Vec<Expr>, values: Vec<Expr>) -> Expr {
        self.sink.counter_inc("trees", "hash");
        self.sink.histogram_inc("trees.hash.entries", keys.len());
        self.node(loc, ExprKind::Hash { keys, values })
    }

    pub fn array(&self, loc: Loc, elems: Vec<Expr>) -> Expr {
        self.sink.counter_inc("trees", "array");
        self.sink.histogram_inc("trees.array.elems", elems.len());
        self.node(loc, ExprKind::Array { elems })
    }

    pub fn literal(&self, loc: Loc, value: LiteralValue) -> Expr {
        self.sink.counter_inc("trees", "literal");
        self.node(loc, ExprKind::Literal(value))
    }

    pub fn int(&self, loc: Loc, value: i64) -> Expr {
        self.literal(loc, LiteralValue::Integer(value))
    }

    pub fn float(&self, loc: Loc, value: f64) -> Expr {
        self.literal(loc, LiteralValue::Float(value.to_bits()))
    }

    pub fn str_(&self, loc: Loc, value: NameRef) -> Expr {
        self.literal(loc, LiteralValue::Str(value))
    }

    pub fn sym(&self, loc: Loc, value: NameRef) -> Expr {
        self.literal(loc, LiteralValue::Sym(value))
    }

    pub fn nil(&self, loc: Loc) -> Expr {
        self.literal(loc, LiteralValue::Nil)
    }

    pub fn true_(&self, loc: Loc) -> Expr {
        self.literal(loc, LiteralValue::True)
    }

    pub fn false_(&self, loc: Loc) -> Expr {
        self.literal(loc, LiteralValue::False)
    }

    pub fn unresolved_constant(&self, loc: Loc, scope: Expr, cnst: NameRef) -> Expr {
        self.sink.counter_inc("trees", "constantlit");
        self.node(
            loc,
            ExprKind::UnresolvedConstantLit {
                scope: Box::new(scope),
                cnst,
            },
        )
    }

    /// Resolution-only node; the builder exists for the resolver and for
    /// printer tests.
    pub fn constant_lit(
        &self,
        loc: Loc,
        symbol: SymbolRef,
        original: Option<Expr>,
        type_alias: Option<Expr>,
    ) -> Expr {
        self.sink.counter_inc("trees", "resolvedconstantlit");
        self.node(
            loc,
            ExprKind::ConstantLit {
                symbol,
                original: original.map(Box::new),
                type_alias: type_alias.map(Box::new),
            },
        )
    }

    pub fn block(&self, loc: Loc, args: Vec<Expr>, body: Expr) -> Expr {
        self.sink.counter_inc("trees", "block");
        self.node(
            loc,
            ExprKind::Block {
                args,
                body: Box::new(body),
            },
        )
    }

    pub fn ins_seq(&self, loc: Loc, stats: Vec<Expr>, expr: Expr) -> Expr {
        self.sink.counter_inc("trees", "insseq");
        self.sink.histogram_inc("trees.insseq.stats", stats.len());
        self.node(
            loc,
            ExprKind::InsSeq {
                stats,
                expr: Box::new(expr),
            },
        )
    }

    pub fn local(&self, loc: Loc, var: LocalVar) -> Expr {
        self.sink.counter_inc("trees", "local");
        self.node(loc, ExprKind::Local { var })
    }

    pub fn field(&self, loc: Loc, symbol: SymbolRef) -> Expr {
        self.sink.counter_inc("trees", "field");
        self.node(loc, ExprKind::Field { symbol })
    }

    pub fn unresolved_ident(&self, loc: Loc, kind: VarKind, name: NameRef) -> Expr {
        self.sink.counter_inc("trees", "unresolvedident");
        self.node(loc, ExprKind::UnresolvedIdent { kind, name })
    }

    pub fn rest_arg(&self, loc: Loc, expr: Expr) -> Expr {
        self.sink.counter_inc("trees", "restarg");
        self.node(loc, ExprKind::RestArg { expr: Box::new(expr) })
    }

    pub fn keyword_arg(&self, loc: Loc, expr: Expr) -> Expr {
        self.sink.counter_inc("trees", "keywordarg");
        self.node(loc, ExprKind::KeywordArg { expr: Box::new(expr) })
    }

    pub fn optional_arg(&self, loc: Loc, expr: Expr, default: Expr) -> Expr {
        self.sink.counter_inc("trees", "optionalarg");
        self.node(
            loc,
            ExprKind::OptionalArg {
                expr: Box::new(expr),
                default: Box::new(default),
            },
        )
    }

    pub fn shadow_arg(&self, loc: Loc, expr: Expr) -> Expr {
        self.sink.counter_inc("trees", "shadowarg");
        self.node(loc, ExprKind::ShadowArg { expr: Box::new(expr) })
    }

    pub fn block_arg(&self, loc: Loc, expr: Expr) -> Expr {
        self.sink.counter_inc("trees", "blockarg");
        self.node(loc, ExprKind::BlockArg { expr: Box::new(expr) })
    }

    pub fn empty_tree(&self) -> Expr {
        self.sink.counter_inc("trees", "emptytree");
        self.node(Loc::NONE, ExprKind::EmptyTree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petrel_core::{Counters, GlobalState, NullSink};

    #[test]
    fn test_construction_reports_counters() {
        let gs = GlobalState::new();
        let sink = Counters::new();
        let b = TreeBuilder::new(&sink);

        let fun = gs.intern("each");
        let recv = b.unresolved_ident(Loc::NONE, VarKind::Local, gs.intern("xs"));
        let arg = b.int(Loc::NONE, 1);
        let blk = b.block(Loc::NONE, vec![], b.empty_tree());
        b.send(Loc::NONE, recv, fun, vec![arg], Some(blk));

        assert_eq!(sink.counter_value("trees", "send"), 1);
        assert_eq!(sink.counter_value("trees", "send.with_block"), 1);
        assert_eq!(sink.counter_value("trees", "literal"), 1);
        assert_eq!(sink.histogram_count("trees.send.args", 1), 1);
    }

    #[test]
    fn test_declarations_start_as_todo() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);

        let name = b.unresolved_constant(Loc::NONE, b.empty_tree(), gs.intern("Widget"));
        let class = b.class_def(
            Loc::NONE,
            Loc::NONE,
            ClassDefKind::Class,
            name,
            vec![],
            vec![],
        );
        match class.kind {
            ExprKind::ClassDef { symbol, .. } => assert!(symbol.is_todo()),
            other => panic!("expected ClassDef, got {other:?}"),
        }
    }

    #[test]
    fn test_quiet_construction_records_nothing() {
        let gs = GlobalState::new();
        let b = TreeBuilder::new(&NullSink);
        let def = b.method_def(
            Loc::NONE,
            Loc::NONE,
            gs.intern("foo"),
            vec![],
            b.empty_tree(),
            MethodFlags::empty(),
        );
        assert_eq!(def.node_name(), "MethodDef");
    }
}
