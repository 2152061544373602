//! Desugaring passes.
//!
//! Each pass is a pure rule: given a class-body statement and, as
//! read-only context, the immediately preceding original statement, it
//! either declines (empty replacement) or returns the ordered statements
//! that replace the candidate. Passes never mutate the candidate or the
//! previous statement; when they match, they build fresh nodes and let the
//! driver drop the original.
//!
//! A pass that recognizes the general shape but finds a sub-shape it
//! cannot safely rewrite must decline rather than guess: declining leaves
//! the program meaning untouched, guessing would not.

use crate::RewriteCtx;
use petrel_ast::Expr;
use smallvec::SmallVec;

mod attr;
mod predicate;
mod prop;
mod struct_new;

pub use attr::AttrMethods;
pub use predicate::BoolPredicate;
pub use prop::Prop;
pub use struct_new::StructNew;

/// Ordered replacement statements; empty means the pass declined.
pub type Replacement = SmallVec<[Expr; 2]>;

/// One desugaring rule.
pub trait RewriterPass {
    /// Name used in match logging.
    fn name(&self) -> &'static str;

    /// Offer one statement. `prev` is the immediately preceding original
    /// statement of the same body, for context-sensitive matching only.
    fn replace(&self, ctx: &RewriteCtx<'_>, stat: &Expr, prev: Option<&Expr>) -> Replacement;
}
