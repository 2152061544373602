//! Petrel core: shared identity primitives for the type checker.
//!
//! This crate contains the value types every other phase passes around:
//! - [`Loc`] / [`FileId`] for source locations
//! - [`NameRef`] / [`NameTable`] for interned identifiers
//! - [`SymbolRef`] / [`SymbolTable`] for declared entities
//! - [`LocalVar`] for resolved local-variable handles
//! - [`MetricsSink`] for construction-time observability
//! - [`fatal`] for process-fatal invariant failures
//!
//! [`GlobalState`] bundles the tables into the read-only snapshot that
//! printers and rewrite passes receive. Name interning goes through
//! interior locking, so synthesizing identifiers during a rewrite only
//! needs a shared reference.

pub mod fatal;
mod loc;
mod local;
mod metrics;
mod name;
mod names;
mod symbols;

pub use loc::{FileId, Loc};
pub use local::LocalVar;
pub use metrics::{Counters, MetricsSink, NullSink};
pub use name::NameRef;
pub use names::{InternError, KnownNames, NameTable};
pub use symbols::{SymbolInfo, SymbolKind, SymbolRef, SymbolTable};

/// Per-processing-unit state: name table, symbol table, metrics sink.
///
/// One `GlobalState` is created per file-processing unit; the embedding
/// driver decides how units map onto worker threads. Within this crate the
/// state is only read, except for name interning (interior locking) and
/// symbol entry during resolution (`&mut` access).
pub struct GlobalState {
    pub names: NameTable,
    pub symbols: SymbolTable,
    metrics: Box<dyn MetricsSink>,
}

impl GlobalState {
    /// State with metrics discarded.
    pub fn new() -> Self {
        Self::with_metrics(Box::new(NullSink))
    }

    /// State reporting construction metrics to `sink`.
    pub fn with_metrics(sink: Box<dyn MetricsSink>) -> Self {
        let names = NameTable::new();
        let symbols = SymbolTable::new(&names);
        GlobalState {
            names,
            symbols,
            metrics: sink,
        }
    }

    /// The injected metrics sink.
    pub fn metrics(&self) -> &dyn MetricsSink {
        &*self.metrics
    }

    /// Intern an identifier.
    pub fn intern(&self, s: &str) -> NameRef {
        self.names.intern(s)
    }

    /// The string behind an interned identifier.
    pub fn show_name(&self, name: NameRef) -> &'static str {
        self.names.lookup(name)
    }

    /// Fully qualified rendering of a symbol.
    pub fn show_symbol(&self, sym: SymbolRef) -> String {
        self.symbols.full_name(&self.names, sym)
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_state_bundles_tables() {
        let gs = GlobalState::new();
        let name = gs.intern("widget");
        assert_eq!(gs.show_name(name), "widget");
        assert_eq!(gs.show_symbol(SymbolRef::TODO), "<todo>");
        assert_eq!(gs.show_symbol(SymbolRef::SYMBOL_CLASS), "Symbol");
    }

    #[test]
    fn test_metrics_flow_through() {
        let gs = GlobalState::with_metrics(Box::new(NullSink));
        // NullSink swallows everything; this only checks the wiring.
        gs.metrics().counter_inc("trees", "literal");
    }
}
