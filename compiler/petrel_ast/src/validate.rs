//! Structural invariant checks.
//!
//! [`node`] checks the invariants a single node must satisfy at
//! construction; [`tree`] re-checks a whole subtree, which rewrite-pass
//! tests use to prove no pass ever emits a structurally invalid node.
//!
//! An invariant failure can only be caused by a bug in the parser or a
//! pass, so the enforcing entry points route to [`petrel_core::fatal`]
//! instead of returning the error to the caller.

use crate::tree::{Expr, ExprKind};
use petrel_core::{fatal, Loc};

/// A violated structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("Hash at {loc:?} has {keys} keys but {values} values")]
    HashArity { loc: Loc, keys: usize, values: usize },

    #[error("{wrapper} at {loc:?} wraps {found}, expected a reference")]
    NonReferenceArg {
        wrapper: &'static str,
        loc: Loc,
        found: &'static str,
    },

    #[error("ClassDef name at {loc:?} is {found}, expected a constant literal")]
    BadClassName { loc: Loc, found: &'static str },

    #[error("MethodDef parameter at {loc:?} is {found}, expected a reference or argument shape")]
    BadParam { loc: Loc, found: &'static str },

    #[error("RescueCase variable at {loc:?} is {found}, expected a reference or <emptyTree>")]
    BadRescueVar { loc: Loc, found: &'static str },
}

/// Check the node-local invariants of one node. Children are not visited.
pub fn node(expr: &Expr) -> Result<(), InvariantError> {
    match &expr.kind {
        ExprKind::Hash { keys, values } => {
            if keys.len() != values.len() {
                return Err(InvariantError::HashArity {
                    loc: expr.loc,
                    keys: keys.len(),
                    values: values.len(),
                });
            }
        }
        ExprKind::RestArg { expr: wrapped }
        | ExprKind::KeywordArg { expr: wrapped }
        | ExprKind::OptionalArg { expr: wrapped, .. }
        | ExprKind::ShadowArg { expr: wrapped }
        | ExprKind::BlockArg { expr: wrapped } => {
            if !wrapped.is_reference() {
                return Err(InvariantError::NonReferenceArg {
                    wrapper: expr.node_name(),
                    loc: expr.loc,
                    found: wrapped.node_name(),
                });
            }
        }
        ExprKind::ClassDef { name, .. } => {
            if !matches!(
                name.kind,
                ExprKind::UnresolvedConstantLit { .. }
                    | ExprKind::ConstantLit { .. }
                    | ExprKind::EmptyTree
            ) {
                return Err(InvariantError::BadClassName {
                    loc: expr.loc,
                    found: name.node_name(),
                });
            }
        }
        ExprKind::MethodDef { args, .. } => {
            for arg in args {
                if !arg.is_reference() {
                    return Err(InvariantError::BadParam {
                        loc: expr.loc,
                        found: arg.node_name(),
                    });
                }
            }
        }
        ExprKind::RescueCase { var, .. } => {
            if !var.is_reference() && !var.is_empty_tree() {
                return Err(InvariantError::BadRescueVar {
                    loc: expr.loc,
                    found: var.node_name(),
                });
            }
        }
        _ => {}
    }
    Ok(())
}

/// Check a whole subtree, depth-first.
pub fn tree(expr: &Expr) -> Result<(), InvariantError> {
    node(expr)?;
    for child in expr.children() {
        tree(child)?;
    }
    Ok(())
}

/// Abort the process if the subtree violates any structural invariant.
pub fn enforce_tree(expr: &Expr) {
    if let Err(err) = tree(expr) {
        fatal::raise(&err.to_string(), file!(), line!());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::LiteralValue;
    use petrel_core::GlobalState;

    fn int(n: i64) -> Expr {
        Expr::new(Loc::NONE, ExprKind::Literal(LiteralValue::Integer(n)))
    }

    #[test]
    fn test_hash_arity_mismatch() {
        let bad = Expr::new(
            Loc::NONE,
            ExprKind::Hash {
                keys: vec![int(1), int(2)],
                values: vec![int(3)],
            },
        );
        assert_eq!(
            node(&bad),
            Err(InvariantError::HashArity {
                loc: Loc::NONE,
                keys: 2,
                values: 1
            })
        );
    }

    #[test]
    fn test_arg_shape_must_wrap_reference() {
        let bad = Expr::new(
            Loc::NONE,
            ExprKind::RestArg {
                expr: Box::new(int(1)),
            },
        );
        assert!(matches!(
            node(&bad),
            Err(InvariantError::NonReferenceArg {
                wrapper: "RestArg",
                found: "Literal",
                ..
            })
        ));
    }

    #[test]
    fn test_tree_finds_nested_violation() {
        let gs = GlobalState::new();
        let bad_hash = Expr::new(
            Loc::NONE,
            ExprKind::Hash {
                keys: vec![int(1)],
                values: vec![],
            },
        );
        let wrapped = Expr::new(
            Loc::NONE,
            ExprKind::Send {
                recv: Box::new(Expr::new(Loc::NONE, ExprKind::EmptyTree)),
                fun: gs.intern("f"),
                args: vec![bad_hash],
                block: None,
            },
        );
        assert!(node(&wrapped).is_ok());
        assert!(tree(&wrapped).is_err());
    }

    #[test]
    fn test_well_formed_tree_passes() {
        let gs = GlobalState::new();
        let ok = Expr::new(
            Loc::NONE,
            ExprKind::Assign {
                lhs: Box::new(Expr::new(
                    Loc::NONE,
                    ExprKind::UnresolvedIdent {
                        kind: crate::tree::VarKind::Instance,
                        name: gs.intern("@x"),
                    },
                )),
                rhs: Box::new(int(42)),
            },
        );
        assert_eq!(tree(&ok), Ok(()));
    }
}
