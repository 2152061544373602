//! Shared context handed to rewrite passes.

use petrel_ast::TreeBuilder;
use petrel_core::{GlobalState, KnownNames, NameRef};

/// Read access to the global tables plus a builder for synthesized nodes.
///
/// Interning a freshly synthesized identifier is the only mutation a pass
/// performs outside the tree it is rewriting, and it goes through the name
/// table's own locking.
pub struct RewriteCtx<'gs> {
    gs: &'gs GlobalState,
}

impl<'gs> RewriteCtx<'gs> {
    pub fn new(gs: &'gs GlobalState) -> Self {
        RewriteCtx { gs }
    }

    pub fn gs(&self) -> &'gs GlobalState {
        self.gs
    }

    /// Builder reporting to the state's metrics sink.
    pub fn builder(&self) -> TreeBuilder<'gs> {
        TreeBuilder::new(self.gs.metrics())
    }

    /// Intern a synthesized identifier.
    pub fn intern(&self, s: &str) -> NameRef {
        self.gs.intern(s)
    }

    /// The pre-interned identifiers passes match against.
    pub fn known(&self) -> &'gs KnownNames {
        self.gs.names.known()
    }
}
