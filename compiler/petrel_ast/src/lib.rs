//! Petrel AST: expression tree, printers, and rewrite traversal.
//!
//! This crate defines the tree representation the whole front end shares:
//! - [`tree`]: the closed set of expression node kinds
//! - [`builder`]: node construction with injected metrics and enforced
//!   structural invariants
//! - [`validate`]: the invariants themselves, re-checkable as a `Result`
//! - printers: `Expr::show` (readable) and `Expr::show_raw` (structural)
//! - [`treemap`]: generic post-order rewriting with per-kind hooks
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Parse → **Rewrite** (petrel_rewriter, via treemap) → Resolve → Infer
//! ```
//!
//! # Ownership
//!
//! Every node exclusively owns its children; the tree is handed whole from
//! stage to stage and rewritten by moving subtrees, never by aliasing.
//! Symbol and name handles are non-owning lookups into the tables in
//! `petrel_core`.

pub mod builder;
mod printer;
pub mod treemap;
pub mod tree;
pub mod validate;

pub use builder::TreeBuilder;
pub use tree::{ClassDefKind, Expr, ExprKind, LiteralValue, MethodFlags, VarKind};
pub use treemap::TreeMapPass;
pub use validate::InvariantError;
