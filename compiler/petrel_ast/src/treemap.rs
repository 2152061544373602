//! Generic tree rewriting.
//!
//! [`apply`] walks a tree depth-first and, for every node, rebuilds the
//! children first and then hands the node (by value, children already
//! rewritten) to the handler's hook for that node kind. A hook returns
//! the replacement node; the default for every hook is identity, so
//! unhandled kinds pass through unchanged.
//!
//! The traversal is single-threaded, deterministic, and total: the node
//! hierarchy is a tree by construction, so there is nothing to cycle on,
//! and each physical node is dispatched exactly once. Ownership of the
//! incoming node transfers to the hook, which decides its fate; replacing
//! a subtree is a move, never aliasing.

use crate::tree::{Expr, ExprKind};
use petrel_core::GlobalState;

/// Per-kind rewrite hooks, invoked post-order.
///
/// Override the hooks for the kinds of interest; every default is
/// identity. Hooks may allocate new nodes and drop the one they were
/// given.
#[expect(unused_variables, reason = "default hooks return their input unchanged")]
pub trait TreeMapPass {
    fn post_transform_class_def(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_method_def(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_if(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_while(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_break(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_next(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_return(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_retry(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_rescue(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_rescue_case(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_assign(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_send(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_yield(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_zsuper_args(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_self_ref(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_cast(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_hash(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_array(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_literal(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_unresolved_constant_lit(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_constant_lit(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_block(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_ins_seq(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_local(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_field(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_unresolved_ident(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_rest_arg(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_keyword_arg(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_optional_arg(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_shadow_arg(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_block_arg(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
    fn post_transform_empty_tree(&mut self, gs: &GlobalState, expr: Expr) -> Expr {
        expr
    }
}

/// Rewrite a tree with the given handler.
pub fn apply<H: TreeMapPass + ?Sized>(gs: &GlobalState, handler: &mut H, tree: Expr) -> Expr {
    map_expr(gs, handler, tree)
}

fn map_box<H: TreeMapPass + ?Sized>(gs: &GlobalState, h: &mut H, expr: Box<Expr>) -> Box<Expr> {
    Box::new(map_expr(gs, h, *expr))
}

fn map_vec<H: TreeMapPass + ?Sized>(gs: &GlobalState, h: &mut H, exprs: Vec<Expr>) -> Vec<Expr> {
    exprs.into_iter().map(|e| map_expr(gs, h, e)).collect()
}

fn map_opt<H: TreeMapPass + ?Sized>(
    gs: &GlobalState,
    h: &mut H,
    expr: Option<Box<Expr>>,
) -> Option<Box<Expr>> {
    expr.map(|e| map_box(gs, h, e))
}

fn map_expr<H: TreeMapPass + ?Sized>(gs: &GlobalState, h: &mut H, expr: Expr) -> Expr {
    let Expr { loc, kind } = expr;
    let kind = match kind {
        ExprKind::ClassDef {
            decl_loc,
            kind,
            symbol,
            name,
            ancestors,
            rhs,
        } => ExprKind::ClassDef {
            decl_loc,
            kind,
            symbol,
            name: map_box(gs, h, name),
            ancestors: map_vec(gs, h, ancestors),
            rhs: map_vec(gs, h, rhs),
        },
        ExprKind::MethodDef {
            decl_loc,
            symbol,
            name,
            args,
            rhs,
            flags,
        } => ExprKind::MethodDef {
            decl_loc,
            symbol,
            name,
            args: map_vec(gs, h, args),
            rhs: map_box(gs, h, rhs),
            flags,
        },
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => ExprKind::If {
            cond: map_box(gs, h, cond),
            then_branch: map_box(gs, h, then_branch),
            else_branch: map_box(gs, h, else_branch),
        },
        ExprKind::While { cond, body } => ExprKind::While {
            cond: map_box(gs, h, cond),
            body: map_box(gs, h, body),
        },
        ExprKind::Break { expr } => ExprKind::Break {
            expr: map_box(gs, h, expr),
        },
        ExprKind::Next { expr } => ExprKind::Next {
            expr: map_box(gs, h, expr),
        },
        ExprKind::Return { expr } => ExprKind::Return {
            expr: map_box(gs, h, expr),
        },
        ExprKind::Rescue {
            body,
            rescue_cases,
            else_branch,
            ensure,
        } => ExprKind::Rescue {
            body: map_box(gs, h, body),
            rescue_cases: map_vec(gs, h, rescue_cases),
            else_branch: map_box(gs, h, else_branch),
            ensure: map_box(gs, h, ensure),
        },
        ExprKind::RescueCase {
            exceptions,
            var,
            body,
        } => ExprKind::RescueCase {
            exceptions: map_vec(gs, h, exceptions),
            var: map_box(gs, h, var),
            body: map_box(gs, h, body),
        },
        ExprKind::Assign { lhs, rhs } => ExprKind::Assign {
            lhs: map_box(gs, h, lhs),
            rhs: map_box(gs, h, rhs),
        },
        ExprKind::Send {
            recv,
            fun,
            args,
            block,
        } => ExprKind::Send {
            recv: map_box(gs, h, recv),
            fun,
            args: map_vec(gs, h, args),
            block: map_opt(gs, h, block),
        },
        ExprKind::Yield { args } => ExprKind::Yield {
            args: map_vec(gs, h, args),
        },
        ExprKind::Cast { cast, ty, arg } => ExprKind::Cast {
            cast,
            ty: map_box(gs, h, ty),
            arg: map_box(gs, h, arg),
        },
        ExprKind::Hash { keys, values } => ExprKind::Hash {
            keys: map_vec(gs, h, keys),
            values: map_vec(gs, h, values),
        },
        ExprKind::Array { elems } => ExprKind::Array {
            elems: map_vec(gs, h, elems),
        },
        ExprKind::UnresolvedConstantLit { scope, cnst } => ExprKind::UnresolvedConstantLit {
            scope: map_box(gs, h, scope),
            cnst,
        },
        ExprKind::ConstantLit {
            symbol,
            original,
            type_alias,
        } => ExprKind::ConstantLit {
            symbol,
            original: map_opt(gs, h, original),
            type_alias: map_opt(gs, h, type_alias),
        },
        ExprKind::Block { args, body } => ExprKind::Block {
            args: map_vec(gs, h, args),
            body: map_box(gs, h, body),
        },
        ExprKind::InsSeq { stats, expr } => ExprKind::InsSeq {
            stats: map_vec(gs, h, stats),
            expr: map_box(gs, h, expr),
        },
        ExprKind::RestArg { expr } => ExprKind::RestArg {
            expr: map_box(gs, h, expr),
        },
        ExprKind::KeywordArg { expr } => ExprKind::KeywordArg {
            expr: map_box(gs, h, expr),
        },
        ExprKind::OptionalArg { expr, default } => ExprKind::OptionalArg {
            expr: map_box(gs, h, expr),
            default: map_box(gs, h, default),
        },
        ExprKind::ShadowArg { expr } => ExprKind::ShadowArg {
            expr: map_box(gs, h, expr),
        },
        ExprKind::BlockArg { expr } => ExprKind::BlockArg {
            expr: map_box(gs, h, expr),
        },
        leaf @ (ExprKind::Retry
        | ExprKind::ZSuperArgs
        | ExprKind::SelfRef { .. }
        | ExprKind::Literal(_)
        | ExprKind::Local { .. }
        | ExprKind::Field { .. }
        | ExprKind::UnresolvedIdent { .. }
        | ExprKind::EmptyTree) => leaf,
    };
    dispatch(gs, h, Expr::new(loc, kind))
}

/// Hand the already-rewritten node to the hook for its kind.
///
/// The hook is selected while the node is only borrowed, then invoked with
/// the node by value once the borrow has ended.
fn dispatch<H: TreeMapPass + ?Sized>(gs: &GlobalState, h: &mut H, expr: Expr) -> Expr {
    let hook: fn(&mut H, &GlobalState, Expr) -> Expr = match &expr.kind {
        ExprKind::ClassDef { .. } => H::post_transform_class_def,
        ExprKind::MethodDef { .. } => H::post_transform_method_def,
        ExprKind::If { .. } => H::post_transform_if,
        ExprKind::While { .. } => H::post_transform_while,
        ExprKind::Break { .. } => H::post_transform_break,
        ExprKind::Next { .. } => H::post_transform_next,
        ExprKind::Return { .. } => H::post_transform_return,
        ExprKind::Retry => H::post_transform_retry,
        ExprKind::Rescue { .. } => H::post_transform_rescue,
        ExprKind::RescueCase { .. } => H::post_transform_rescue_case,
        ExprKind::Assign { .. } => H::post_transform_assign,
        ExprKind::Send { .. } => H::post_transform_send,
        ExprKind::Yield { .. } => H::post_transform_yield,
        ExprKind::ZSuperArgs => H::post_transform_zsuper_args,
        ExprKind::SelfRef { .. } => H::post_transform_self_ref,
        ExprKind::Cast { .. } => H::post_transform_cast,
        ExprKind::Hash { .. } => H::post_transform_hash,
        ExprKind::Array { .. } => H::post_transform_array,
        ExprKind::Literal(_) => H::post_transform_literal,
        ExprKind::UnresolvedConstantLit { .. } => H::post_transform_unresolved_constant_lit,
        ExprKind::ConstantLit { .. } => H::post_transform_constant_lit,
        ExprKind::Block { .. } => H::post_transform_block,
        ExprKind::InsSeq { .. } => H::post_transform_ins_seq,
        ExprKind::Local { .. } => H::post_transform_local,
        ExprKind::Field { .. } => H::post_transform_field,
        ExprKind::UnresolvedIdent { .. } => H::post_transform_unresolved_ident,
        ExprKind::RestArg { .. } => H::post_transform_rest_arg,
        ExprKind::KeywordArg { .. } => H::post_transform_keyword_arg,
        ExprKind::OptionalArg { .. } => H::post_transform_optional_arg,
        ExprKind::ShadowArg { .. } => H::post_transform_shadow_arg,
        ExprKind::BlockArg { .. } => H::post_transform_block_arg,
        ExprKind::EmptyTree => H::post_transform_empty_tree,
    };
    hook(h, gs, expr)
}
