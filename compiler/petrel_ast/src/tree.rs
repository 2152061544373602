//! Expression tree nodes.
//!
//! One closed tagged union covers every syntactic form the parser can
//! produce, loosely grouped as control flow, instructions, references,
//! argument shapes, and definitions. Child slots are owned boxes or
//! vectors: the tree is a tree, never a graph, and replacing a subtree is
//! an explicit move-out/move-in, never aliasing.
//!
//! Required child slots are never absent; "no expression" is the explicit
//! [`ExprKind::EmptyTree`] placeholder, compared by kind rather than
//! identity.

use petrel_core::{Loc, LocalVar, NameRef, SymbolRef};

bitflags::bitflags! {
    /// Flag bits on a method definition.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct MethodFlags: u16 {
        /// Defined on the singleton class (`def self.foo`).
        const SELF_METHOD = 1 << 0;
        /// Synthesized by a rewrite pass rather than written in source.
        const SYNTHESIZED = 1 << 1;
    }
}

/// Whether a `ClassDef` introduces a class or a module.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClassDefKind {
    Class,
    Module,
}

/// Scope kind of an identifier the resolver has not seen yet.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VarKind {
    Local,
    Instance,
    Class,
    Global,
}

/// A resolved literal value.
///
/// Floats are stored as IEEE bits so nodes stay `Eq`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LiteralValue {
    Integer(i64),
    Float(u64),
    Str(NameRef),
    Sym(NameRef),
    True,
    False,
    Nil,
}

impl LiteralValue {
    pub fn is_symbol(&self) -> bool {
        matches!(self, LiteralValue::Sym(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, LiteralValue::Str(_))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, LiteralValue::Nil)
    }

    pub fn is_true(&self) -> bool {
        matches!(self, LiteralValue::True)
    }

    pub fn is_false(&self) -> bool {
        matches!(self, LiteralValue::False)
    }

    /// The interned name of a symbol literal.
    pub fn as_symbol(&self) -> Option<NameRef> {
        match self {
            LiteralValue::Sym(name) => Some(*name),
            _ => None,
        }
    }

    /// The interned contents of a string literal.
    pub fn as_string(&self) -> Option<NameRef> {
        match self {
            LiteralValue::Str(name) => Some(*name),
            _ => None,
        }
    }
}

/// An expression node: a source location plus one of the closed node kinds.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub loc: Loc,
    pub kind: ExprKind,
}

/// The closed set of node kinds.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    // Definitions
    /// `class Name < Ancestor ... end` / `module Name ... end`.
    ClassDef {
        /// Span of the `class Name` header alone.
        decl_loc: Loc,
        kind: ClassDefKind,
        /// Placeholder until resolution assigns the real symbol.
        symbol: SymbolRef,
        name: Box<Expr>,
        ancestors: Vec<Expr>,
        /// Ordered body statements; the rewrite driver splices here.
        rhs: Vec<Expr>,
    },
    /// `def name(args) ... end`.
    MethodDef {
        decl_loc: Loc,
        symbol: SymbolRef,
        name: NameRef,
        args: Vec<Expr>,
        rhs: Box<Expr>,
        flags: MethodFlags,
    },

    // Control flow
    /// All three slots present; an absent branch is `EmptyTree`.
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    While {
        cond: Box<Expr>,
        body: Box<Expr>,
    },
    Break {
        expr: Box<Expr>,
    },
    Next {
        expr: Box<Expr>,
    },
    Return {
        expr: Box<Expr>,
    },
    Retry,
    /// `else`/`ensure` default to `EmptyTree`, never absent.
    Rescue {
        body: Box<Expr>,
        rescue_cases: Vec<Expr>,
        else_branch: Box<Expr>,
        ensure: Box<Expr>,
    },
    RescueCase {
        exceptions: Vec<Expr>,
        /// The bound variable; `EmptyTree` when the case binds nothing.
        var: Box<Expr>,
        body: Box<Expr>,
    },

    // Instructions
    Assign {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Method call. The block is the only optional child slot on a send.
    Send {
        recv: Box<Expr>,
        fun: NameRef,
        args: Vec<Expr>,
        block: Option<Box<Expr>>,
    },
    Yield {
        args: Vec<Expr>,
    },
    /// Forward the enclosing method's arguments to `super`.
    ZSuperArgs,
    SelfRef {
        claz: SymbolRef,
    },
    /// Type assertion kept in the tree for the inference stage.
    Cast {
        cast: NameRef,
        ty: Box<Expr>,
        arg: Box<Expr>,
    },
    /// Parallel key/value lists of equal length.
    Hash {
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },
    Array {
        elems: Vec<Expr>,
    },
    Literal(LiteralValue),
    /// `Scope::NAME` before resolution.
    UnresolvedConstantLit {
        scope: Box<Expr>,
        cnst: NameRef,
    },
    /// Produced only by resolution, never by parsing.
    ConstantLit {
        symbol: SymbolRef,
        original: Option<Box<Expr>>,
        type_alias: Option<Box<Expr>>,
    },
    /// `do |args| body end`.
    Block {
        args: Vec<Expr>,
        body: Box<Expr>,
    },
    /// Instruction sequence: ordered statements plus a final value.
    InsSeq {
        stats: Vec<Expr>,
        expr: Box<Expr>,
    },

    // References
    Local {
        var: LocalVar,
    },
    Field {
        symbol: SymbolRef,
    },
    /// Exists only before resolution.
    UnresolvedIdent {
        kind: VarKind,
        name: NameRef,
    },

    // Argument shapes, each wrapping exactly one reference
    RestArg {
        expr: Box<Expr>,
    },
    KeywordArg {
        expr: Box<Expr>,
    },
    OptionalArg {
        expr: Box<Expr>,
        default: Box<Expr>,
    },
    ShadowArg {
        expr: Box<Expr>,
    },
    BlockArg {
        expr: Box<Expr>,
    },

    /// The canonical "no expression" placeholder.
    EmptyTree,
}

impl Expr {
    pub fn new(loc: Loc, kind: ExprKind) -> Self {
        Expr { loc, kind }
    }

    /// Whether this node is the `EmptyTree` placeholder.
    pub fn is_empty_tree(&self) -> bool {
        matches!(self.kind, ExprKind::EmptyTree)
    }

    /// Whether this node is an assignable/referenceable location or an
    /// argument shape wrapping one.
    pub fn is_reference(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Local { .. }
                | ExprKind::Field { .. }
                | ExprKind::UnresolvedIdent { .. }
                | ExprKind::RestArg { .. }
                | ExprKind::KeywordArg { .. }
                | ExprKind::OptionalArg { .. }
                | ExprKind::ShadowArg { .. }
                | ExprKind::BlockArg { .. }
        )
    }

    /// Name of the node kind, as used by the structural printer.
    pub fn node_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::ClassDef { .. } => "ClassDef",
            ExprKind::MethodDef { .. } => "MethodDef",
            ExprKind::If { .. } => "If",
            ExprKind::While { .. } => "While",
            ExprKind::Break { .. } => "Break",
            ExprKind::Next { .. } => "Next",
            ExprKind::Return { .. } => "Return",
            ExprKind::Retry => "Retry",
            ExprKind::Rescue { .. } => "Rescue",
            ExprKind::RescueCase { .. } => "RescueCase",
            ExprKind::Assign { .. } => "Assign",
            ExprKind::Send { .. } => "Send",
            ExprKind::Yield { .. } => "Yield",
            ExprKind::ZSuperArgs => "ZSuperArgs",
            ExprKind::SelfRef { .. } => "Self",
            ExprKind::Cast { .. } => "Cast",
            ExprKind::Hash { .. } => "Hash",
            ExprKind::Array { .. } => "Array",
            ExprKind::Literal(_) => "Literal",
            ExprKind::UnresolvedConstantLit { .. } => "UnresolvedConstantLit",
            ExprKind::ConstantLit { .. } => "ConstantLit",
            ExprKind::Block { .. } => "Block",
            ExprKind::InsSeq { .. } => "InsSeq",
            ExprKind::Local { .. } => "Local",
            ExprKind::Field { .. } => "Field",
            ExprKind::UnresolvedIdent { .. } => "UnresolvedIdent",
            ExprKind::RestArg { .. } => "RestArg",
            ExprKind::KeywordArg { .. } => "KeywordArg",
            ExprKind::OptionalArg { .. } => "OptionalArg",
            ExprKind::ShadowArg { .. } => "ShadowArg",
            ExprKind::BlockArg { .. } => "BlockArg",
            ExprKind::EmptyTree => "EmptyTree",
        }
    }

    /// Direct children in traversal order.
    pub fn children(&self) -> Vec<&Expr> {
        let mut out = Vec::new();
        match &self.kind {
            ExprKind::ClassDef {
                name,
                ancestors,
                rhs,
                ..
            } => {
                out.push(&**name);
                out.extend(ancestors.iter());
                out.extend(rhs.iter());
            }
            ExprKind::MethodDef { args, rhs, .. } => {
                out.extend(args.iter());
                out.push(&**rhs);
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                out.push(&**cond);
                out.push(&**then_branch);
                out.push(&**else_branch);
            }
            ExprKind::While { cond, body } => {
                out.push(&**cond);
                out.push(&**body);
            }
            ExprKind::Break { expr } | ExprKind::Next { expr } | ExprKind::Return { expr } => {
                out.push(&**expr);
            }
            ExprKind::Rescue {
                body,
                rescue_cases,
                else_branch,
                ensure,
            } => {
                out.push(&**body);
                out.extend(rescue_cases.iter());
                out.push(&**else_branch);
                out.push(&**ensure);
            }
            ExprKind::RescueCase {
                exceptions,
                var,
                body,
            } => {
                out.extend(exceptions.iter());
                out.push(&**var);
                out.push(&**body);
            }
            ExprKind::Assign { lhs, rhs } => {
                out.push(&**lhs);
                out.push(&**rhs);
            }
            ExprKind::Send {
                recv, args, block, ..
            } => {
                out.push(&**recv);
                out.extend(args.iter());
                if let Some(block) = block {
                    out.push(&**block);
                }
            }
            ExprKind::Yield { args } => out.extend(args.iter()),
            ExprKind::Cast { ty, arg, .. } => {
                out.push(&**ty);
                out.push(&**arg);
            }
            ExprKind::Hash { keys, values } => {
                out.extend(keys.iter());
                out.extend(values.iter());
            }
            ExprKind::Array { elems } => out.extend(elems.iter()),
            ExprKind::UnresolvedConstantLit { scope, .. } => out.push(&**scope),
            ExprKind::ConstantLit {
                original,
                type_alias,
                ..
            } => {
                if let Some(original) = original {
                    out.push(&**original);
                }
                if let Some(type_alias) = type_alias {
                    out.push(&**type_alias);
                }
            }
            ExprKind::Block { args, body } => {
                out.extend(args.iter());
                out.push(&**body);
            }
            ExprKind::InsSeq { stats, expr } => {
                out.extend(stats.iter());
                out.push(&**expr);
            }
            ExprKind::RestArg { expr }
            | ExprKind::KeywordArg { expr }
            | ExprKind::ShadowArg { expr }
            | ExprKind::BlockArg { expr } => out.push(&**expr),
            ExprKind::OptionalArg { expr, default } => {
                out.push(&**expr);
                out.push(&**default);
            }
            ExprKind::Retry
            | ExprKind::ZSuperArgs
            | ExprKind::SelfRef { .. }
            | ExprKind::Literal(_)
            | ExprKind::Local { .. }
            | ExprKind::Field { .. }
            | ExprKind::UnresolvedIdent { .. }
            | ExprKind::EmptyTree => {}
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petrel_core::GlobalState;

    #[test]
    fn test_reference_predicate() {
        let gs = GlobalState::new();
        let x = gs.intern("x");

        let ident = Expr::new(
            Loc::NONE,
            ExprKind::UnresolvedIdent {
                kind: VarKind::Local,
                name: x,
            },
        );
        assert!(ident.is_reference());

        let rest = Expr::new(
            Loc::NONE,
            ExprKind::RestArg {
                expr: Box::new(ident),
            },
        );
        assert!(rest.is_reference());

        let lit = Expr::new(Loc::NONE, ExprKind::Literal(LiteralValue::Integer(1)));
        assert!(!lit.is_reference());
        assert!(!Expr::new(Loc::NONE, ExprKind::EmptyTree).is_reference());
    }

    #[test]
    fn test_literal_helpers() {
        let gs = GlobalState::new();
        let name = gs.intern("foo");

        let sym = LiteralValue::Sym(name);
        assert!(sym.is_symbol());
        assert_eq!(sym.as_symbol(), Some(name));
        assert_eq!(sym.as_string(), None);

        let s = LiteralValue::Str(name);
        assert!(s.is_string());
        assert_eq!(s.as_string(), Some(name));

        assert!(LiteralValue::Nil.is_nil());
        assert!(LiteralValue::True.is_true());
        assert!(LiteralValue::False.is_false());
        assert!(!LiteralValue::Integer(0).is_symbol());
    }

    #[test]
    fn test_children_in_order() {
        let lit = |n| Expr::new(Loc::NONE, ExprKind::Literal(LiteralValue::Integer(n)));
        let assign = Expr::new(
            Loc::NONE,
            ExprKind::Assign {
                lhs: Box::new(lit(1)),
                rhs: Box::new(lit(2)),
            },
        );
        let kids = assign.children();
        assert_eq!(kids.len(), 2);
        assert_eq!(
            kids[0].kind,
            ExprKind::Literal(LiteralValue::Integer(1))
        );
        assert_eq!(
            kids[1].kind,
            ExprKind::Literal(LiteralValue::Integer(2))
        );
        assert!(lit(3).children().is_empty());
    }
}
