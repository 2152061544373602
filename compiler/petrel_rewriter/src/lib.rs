//! Petrel rewriter: class-body desugaring for the type checker front end.
//!
//! Runs once over a freshly parsed tree, rewriting idiomatic
//! metaprogramming calls into the explicit definitions later stages
//! understand. Each class body is processed statement by statement: the
//! ordered pass family for the statement's shape is consulted, the first
//! matching pass's replacement is spliced into the body in place of the
//! original, and everything unrecognized is left exactly as written.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Parse → **Rewrite** → Resolve → Infer
//! ```
//!
//! # What the Built-in Passes Do
//!
//! - [`Prop`]: `prop :name, type: T` → explicit reader and writer.
//! - [`AttrMethods`]: `attr_reader`/`attr_writer`/`attr_accessor` →
//!   explicit definitions, fusing a preceding `sig` declaration.
//! - [`StructNew`]: `N = Struct.new(:a, :b)` → an explicit class
//!   definition with accessors and an initializer.
//! - [`BoolPredicate`]: `def foo?` over a bare `@foo` → boolean-coerced
//!   body.
//!
//! The single run is not a fixed point: passes are independent and none
//! may assume another has already run on sibling statements.

mod context;
mod driver;
mod passes;

pub use context::RewriteCtx;
pub use driver::{run, run_with, PassTable, Rewriter};
pub use passes::{AttrMethods, BoolPredicate, Prop, Replacement, RewriterPass, StructNew};
